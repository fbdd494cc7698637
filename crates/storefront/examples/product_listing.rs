//! Fetch the product listing story and exercise the cart.
//!
//! Requires `STORYBLOK_TOKEN` in the environment (or a `.env` file):
//!
//! ```sh
//! cargo run -p coral-storefront --example product_listing
//! ```

use coral_storefront::config::StoreConfig;
use coral_storefront::state::StoreContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coral_storefront=info,product_listing=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            return;
        }
    };

    let context = StoreContext::new(config);

    let products = match context.content().product_blocks("product").await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            return;
        }
    };

    if products.is_empty() {
        tracing::warn!("No product blocks found in the listing story");
        return;
    }

    for product in &products {
        tracing::info!(name = %product.name, price = %product.price, "product");
    }

    if let Some(first) = products.first() {
        context.cart().add_line(&first.name, first.price, None);
    }

    let cart = context.cart();
    tracing::info!(
        lines = cart.lines().len(),
        units = cart.total_quantity(),
        total = cart.grand_total(),
        "cart after adding the first product"
    );
}
