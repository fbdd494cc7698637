//! Shared state handed to the presentation layer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::{CartStore, CartStorage, JsonFileStorage, MemoryStorage};
use crate::config::StoreConfig;
use crate::storyblok::ContentClient;

/// Everything the presentation layer needs, behind one handle.
///
/// Constructed once at session start and passed down explicitly; there is
/// no ambient global to look the store up through. Cheaply cloneable via
/// `Arc`.
#[derive(Clone)]
pub struct StoreContext {
    inner: Arc<StoreContextInner>,
}

struct StoreContextInner {
    config: StoreConfig,
    content: ContentClient,
    cart: Mutex<CartStore>,
}

impl StoreContext {
    /// Build the context from configuration.
    ///
    /// The cart hydrates from the configured slot (a JSON file when
    /// `cart_path` is set, memory otherwise); hydration failures degrade to
    /// an empty cart rather than failing construction.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let content = ContentClient::new(&config.storyblok);

        let storage: Box<dyn CartStorage> = match &config.cart_path {
            Some(path) => Box::new(JsonFileStorage::new(path)),
            None => Box::new(MemoryStorage::new()),
        };
        let cart = Mutex::new(CartStore::open(storage, config.duplicate_policy));

        Self {
            inner: Arc::new(StoreContextInner {
                config,
                content,
                cart,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Get a reference to the content client.
    #[must_use]
    pub fn content(&self) -> &ContentClient {
        &self.inner.content
    }

    /// Lock the cart for a sequence of reads or mutations.
    ///
    /// Mutations are synchronous; hold the guard only for the operation at
    /// hand. A poisoned lock recovers with the current state since every
    /// cart operation is total.
    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for StoreContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreContext")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
