//! Core types for Coral Storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod price;
pub mod quantity;

pub use price::Price;
pub use quantity::{coerce_quantity, interpret_update};
