//! Coral Core - Shared types library.
//!
//! This crate provides the common types used across all Coral Storefront
//! components: the lenient `Price` newtype and the quantity coercion rules
//! shared by cart mutation paths.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for prices and quantities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
