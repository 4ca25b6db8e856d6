//! Chatshop Core - Shared types library.
//!
//! This crate provides common types used across all chatshop components:
//! - `engine` - Stores and services for accounts, catalog, carts, and checkout
//! - `bot` - Text command dispatcher and console front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no store access, no command
//! handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and coupon codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
