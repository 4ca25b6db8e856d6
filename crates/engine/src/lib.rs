//! Chatshop Engine - The transactional commerce core.
//!
//! This crate owns all mutable commerce state and the operations over it:
//!
//! - [`models`] - Domain entities: users, products, coupons, orders
//! - [`store`] - In-memory stores, one per entity type, each the sole owner
//!   of its records
//! - [`service`] - Account, catalog, cart, coupon, and checkout operations
//! - [`locks`] - Per-user and catalog-wide operation locks
//! - [`error`] - The typed failure surface returned to callers
//!
//! # Consistency contract
//!
//! Four mutable resources are kept consistent under concurrent commands:
//! user balance, cart contents, product stock, and coupon redemption.
//! Operations touching a single user's state run under that user's lock;
//! checkout additionally holds the catalog lock across its whole
//! validate-then-commit sequence, so a failed checkout leaves every
//! resource exactly as it found it and a successful one applies all of its
//! mutations without interleaving.
//!
//! State lives for the process lifetime only; there is no persistence
//! layer.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod locks;
pub mod models;
pub mod service;
pub mod shop;
pub mod store;

pub use error::{ErrorKind, ShopError};
pub use shop::Shop;
