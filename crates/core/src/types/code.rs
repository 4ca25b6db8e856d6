//! Coupon code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CouponCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CouponCodeError {
    /// The input string is empty.
    #[error("coupon code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("coupon code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or a control character.
    #[error("coupon code cannot contain whitespace or control characters")]
    InvalidCharacter,
}

/// A normalized coupon code.
///
/// Codes are matched case-insensitively: parsing uppercases ASCII letters,
/// so `"welcome"` and `"WELCOME"` name the same coupon. The normalized form
/// is what stores key on and what redemption sets record.
///
/// ## Constraints
///
/// - Length: 1-64 characters
/// - No whitespace or control characters
///
/// ## Examples
///
/// ```
/// use chatshop_core::CouponCode;
///
/// let code = CouponCode::parse("welcome1000").unwrap();
/// assert_eq!(code.as_str(), "WELCOME1000");
/// assert_eq!(code, CouponCode::parse("Welcome1000").unwrap());
///
/// assert!(CouponCode::parse("").is_err());
/// assert!(CouponCode::parse("two words").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CouponCode(String);

impl CouponCode {
    /// Maximum length of a coupon code.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `CouponCode` from a string, normalizing it to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 64 characters
    /// - Contains whitespace or control characters
    pub fn parse(s: &str) -> Result<Self, CouponCodeError> {
        if s.is_empty() {
            return Err(CouponCodeError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(CouponCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CouponCodeError::InvalidCharacter);
        }

        Ok(Self(s.to_ascii_uppercase()))
    }

    /// Returns the normalized code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CouponCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CouponCode {
    type Err = CouponCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CouponCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
