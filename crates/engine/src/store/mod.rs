//! In-memory entity stores.
//!
//! Each store is the sole owner of its entity type, guarded by an async
//! `RwLock`. Lookups never fail - absence is `None` - and `save` is an
//! upsert by primary key that keeps any secondary index (chat id for
//! users, normalized code for coupons) in sync. Ids are generated from an
//! atomic counter; saving a record with an explicit id advances the
//! counter past it, so generated and seeded ids never collide.
//!
//! Stores are thread-safe on their own, but multi-step operations over
//! them (checkout, coupon redemption) take the locks in [`crate::locks`]
//! to get operation-level atomicity.

pub mod coupons;
pub mod orders;
pub mod products;
pub mod users;

pub use coupons::CouponStore;
pub use orders::OrderStore;
pub use products::ProductStore;
pub use users::UserStore;
