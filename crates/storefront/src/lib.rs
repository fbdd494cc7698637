//! Coral Storefront library.
//!
//! The headless core of a small e-commerce storefront whose product content
//! lives in the Storyblok content-delivery API. This crate provides the two
//! stateful pieces the (out-of-tree) presentation layer builds on:
//!
//! - [`cart`] - session-scoped cart store with add / set-quantity / remove /
//!   clear operations, synchronized to a persistent JSON slot
//! - [`storyblok`] - one-shot content client for product stories
//!
//! [`state::StoreContext`] bundles both behind one cheaply-cloneable handle
//! that is passed into the presentation layer explicitly rather than looked
//! up through a global.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod state;
pub mod storyblok;
