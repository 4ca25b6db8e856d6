//! Typed failures returned by engine services.
//!
//! Every failure carries the context a caller needs to render it (offending
//! amounts, names, codes); none are silent no-ops and none are fatal to the
//! process. [`ShopError::kind`] classifies each variant so callers can
//! handle whole categories uniformly.

use rust_decimal::Decimal;
use thiserror::Error;

use chatshop_core::{ProductId, UserId};

/// Failure kinds returned by engine services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    /// No product with this id exists in the catalog.
    #[error("product {id} not found")]
    ProductNotFound {
        /// The requested product id.
        id: ProductId,
    },

    /// No account with this id exists.
    #[error("user {id} not found")]
    UserNotFound {
        /// The requested user id.
        id: UserId,
    },

    /// No coupon with this code exists.
    #[error("coupon code {code} not found")]
    CouponNotFound {
        /// The requested code, normalized when it was parseable.
        code: String,
    },

    /// The user has already redeemed this coupon.
    #[error("coupon code {code} has already been used")]
    CouponAlreadyUsed {
        /// The normalized code.
        code: String,
    },

    /// Checkout was attempted with nothing in the cart.
    #[error("cannot create an order from an empty cart")]
    EmptyCart,

    /// The user's balance does not cover the order total.
    #[error("required ${required}, available ${available}")]
    InsufficientBalance {
        /// The order total that would be charged.
        required: Decimal,
        /// The user's current balance.
        available: Decimal,
    },

    /// A cart line requests more units than the product has in stock.
    #[error("not enough stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        /// Product display name.
        product: String,
        /// Units currently in stock.
        available: u32,
        /// Units the cart requested.
        requested: u32,
    },

    /// A quantity argument was not a positive integer.
    #[error("quantity must be a positive integer, got {requested}")]
    InvalidQuantity {
        /// The rejected quantity.
        requested: u32,
    },
}

/// Coarse classification of a [`ShopError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity does not exist; the caller can correct the input.
    NotFound,
    /// The operation conflicts with recorded state (e.g. repeat redemption).
    Conflict,
    /// A precondition on current state failed; the caller must change the
    /// request (top up balance, reduce quantities, fill the cart).
    PreconditionFailed,
    /// The argument itself is invalid regardless of state.
    InvalidArgument,
}

impl ShopError {
    /// Classify this error into its [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ProductNotFound { .. } | Self::UserNotFound { .. } | Self::CouponNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::CouponAlreadyUsed { .. } => ErrorKind::Conflict,
            Self::EmptyCart
            | Self::InsufficientBalance { .. }
            | Self::InsufficientStock { .. } => ErrorKind::PreconditionFailed,
            Self::InvalidQuantity { .. } => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ShopError>;
