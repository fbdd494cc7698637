//! Unit price representation tolerant of loosely-typed upstream data.
//!
//! Product content authored in a headless CMS arrives with prices typed
//! inconsistently: sometimes a JSON number, sometimes a numeric string,
//! sometimes missing entirely. `Price` canonicalizes all of these to a
//! floating-point amount at decode time and always serializes back as a
//! number, so a persisted cart round-trips with proper numeric types.

use serde::{Deserialize, Deserializer, Serialize};

/// A product unit price in the store currency's standard unit (dollars).
///
/// Deserializes leniently: a JSON number, a numeric string (`"49.99"`), or
/// null all decode without error. Malformed or non-finite input coerces to
/// zero rather than failing the surrounding document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// A zero price, the fallback for malformed upstream data.
    pub const ZERO: Self = Self(0.0);

    /// Create a price from a numeric amount.
    ///
    /// Non-finite amounts (NaN, infinities) coerce to zero.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        if amount.is_finite() {
            Self(amount)
        } else {
            Self::ZERO
        }
    }

    /// The numeric amount.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }

    /// The extended total for `quantity` units at this price.
    #[must_use]
    pub fn line_total(self, quantity: u32) -> f64 {
        self.0 * f64::from(quantity)
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Self::new(amount)
    }
}

impl std::fmt::Display for Price {
    /// Format for display (e.g., `$19.99`).
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Raw wire shapes a price field arrives in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawPrice>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawPrice::Number(n)) => Self::new(n),
            Some(RawPrice::Text(s)) => s.trim().parse::<f64>().map_or(Self::ZERO, Self::new),
            Some(RawPrice::Other(_)) | None => Self::ZERO,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_number() {
        let price: Price = serde_json::from_str("49.99").unwrap();
        assert_eq!(price, Price::new(49.99));
    }

    #[test]
    fn test_deserialize_integer() {
        let price: Price = serde_json::from_str("30").unwrap();
        assert_eq!(price, Price::new(30.0));
    }

    #[test]
    fn test_deserialize_numeric_string() {
        let price: Price = serde_json::from_str("\"49.99\"").unwrap();
        assert_eq!(price, Price::new(49.99));
    }

    #[test]
    fn test_deserialize_padded_string() {
        let price: Price = serde_json::from_str("\" 12.5 \"").unwrap();
        assert_eq!(price, Price::new(12.5));
    }

    #[test]
    fn test_deserialize_null_coerces_to_zero() {
        let price: Price = serde_json::from_str("null").unwrap();
        assert_eq!(price, Price::ZERO);
    }

    #[test]
    fn test_deserialize_garbage_string_coerces_to_zero() {
        let price: Price = serde_json::from_str("\"N/A\"").unwrap();
        assert_eq!(price, Price::ZERO);
    }

    #[test]
    fn test_deserialize_unexpected_type_coerces_to_zero() {
        let price: Price = serde_json::from_str("{\"amount\": 5}").unwrap();
        assert_eq!(price, Price::ZERO);

        let price: Price = serde_json::from_str("true").unwrap();
        assert_eq!(price, Price::ZERO);
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Price::new(10.0)).unwrap();
        assert_eq!(json, "10.0");
    }

    #[test]
    fn test_round_trip_from_string_source() {
        // A price read from a numeric-string source must persist as a number.
        let price: Price = serde_json::from_str("\"7.25\"").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
        assert!((back.amount() - 7.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_coerces_to_zero() {
        assert_eq!(Price::new(f64::NAN), Price::ZERO);
        assert_eq!(Price::new(f64::INFINITY), Price::ZERO);
    }

    #[test]
    fn test_line_total() {
        assert!((Price::new(10.0).line_total(3) - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(19.99).to_string(), "$19.99");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }
}
