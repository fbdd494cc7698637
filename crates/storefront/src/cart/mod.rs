//! Session-scoped cart store.
//!
//! The store keeps an ordered list of cart lines in memory and mirrors it
//! into a [`CartStorage`] slot after every mutation, so a cart survives a
//! restart. The in-memory state is authoritative: a failing slot degrades
//! the cart to session-only rather than surfacing an error, and a corrupt
//! persisted payload hydrates as an empty cart.
//!
//! Lines are keyed by the product's display name. Two distinct products
//! sharing a name would collide; a stable product ID would fix this but the
//! content source does not provide one.

mod storage;

pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use coral_core::{Price, coerce_quantity, interpret_update};

/// One distinct product held in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product display name; doubles as the uniqueness key.
    pub identifier: String,
    /// Unit price, coerced to a number at write time.
    pub unit_price: Price,
    /// Units of this product, always >= 1.
    #[serde(deserialize_with = "lenient_quantity")]
    pub quantity: u32,
}

/// Behavior when adding a line whose identifier is already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Increment the existing line's quantity by the added quantity.
    #[default]
    Merge,
    /// Leave the existing line untouched; the add is a no-op.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merge" => Ok(Self::Merge),
            "reject" => Ok(Self::Reject),
            other => Err(format!("expected 'merge' or 'reject', got '{other}'")),
        }
    }
}

/// In-memory cart state synchronized to a persistence slot.
///
/// All mutations are total: invalid inputs are coerced rather than
/// rejected, so every operation leaves the cart in a valid state.
pub struct CartStore {
    lines: Vec<CartLine>,
    storage: Box<dyn CartStorage>,
    policy: DuplicatePolicy,
}

impl CartStore {
    /// Open the cart, hydrating from the storage slot.
    ///
    /// Fails soft: a missing, unreadable, or corrupt payload yields an
    /// empty cart and a log line, never an error.
    pub fn open(storage: Box<dyn CartStorage>, policy: DuplicatePolicy) -> Self {
        let lines = match storage.read() {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<CartLine>>(&payload) {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::warn!("Discarding corrupt cart payload: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read persisted cart: {e}");
                Vec::new()
            }
        };

        Self {
            lines,
            storage,
            policy,
        }
    }

    /// Add `quantity` units of a product (default 1).
    ///
    /// A non-positive or absent quantity coerces to 1. If the identifier is
    /// already in the cart the configured [`DuplicatePolicy`] applies; new
    /// identifiers append in insertion order.
    pub fn add_line(&mut self, identifier: &str, unit_price: Price, quantity: Option<u32>) {
        let quantity = coerce_quantity(quantity);

        if let Some(line) = self.lines.iter_mut().find(|l| l.identifier == identifier) {
            match self.policy {
                DuplicatePolicy::Merge => {
                    line.quantity = line.quantity.saturating_add(quantity);
                }
                DuplicatePolicy::Reject => return,
            }
        } else {
            self.lines.push(CartLine {
                identifier: identifier.to_string(),
                unit_price,
                quantity,
            });
        }

        self.persist();
    }

    /// Set a line's quantity to an absolute value.
    ///
    /// A value below 1 removes the line; an unknown identifier is a no-op.
    pub fn set_quantity(&mut self, identifier: &str, quantity: i64) {
        let Some(line) = self.lines.iter_mut().find(|l| l.identifier == identifier) else {
            return;
        };

        match interpret_update(quantity) {
            Some(quantity) => {
                line.quantity = quantity;
                self.persist();
            }
            None => self.remove_line(identifier),
        }
    }

    /// Remove the line with a matching identifier, if present. Idempotent.
    pub fn remove_line(&mut self, identifier: &str) {
        let before = self.lines.len();
        self.lines.retain(|l| l.identifier != identifier);
        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Reset the cart to empty.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// The sum of `unit_price * quantity` over all lines.
    ///
    /// Recomputed on demand, never cached.
    #[must_use]
    pub fn grand_total(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.unit_price.line_total(l.quantity))
            .sum()
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total units across all lines, for the cart count badge.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Mirror the in-memory state into the storage slot.
    ///
    /// A write failure is logged and swallowed; the in-memory cart stays
    /// authoritative for the rest of the session.
    fn persist(&self) {
        let payload = match serde_json::to_string(&self.lines) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize cart: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.write(&payload) {
            tracing::warn!("Cart persistence failed, continuing in memory: {e}");
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Accept a quantity stored as a number or a numeric string.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawQuantity {
        Number(i64),
        Text(String),
    }

    let raw = match RawQuantity::deserialize(deserializer)? {
        RawQuantity::Number(n) => n,
        RawQuantity::Text(s) => s.trim().parse::<i64>().map_err(serde::de::Error::custom)?,
    };

    // Persisted quantities below 1 violate the cart invariant; clamp rather
    // than drop the line.
    Ok(u32::try_from(raw.max(1)).unwrap_or(u32::MAX))
}
