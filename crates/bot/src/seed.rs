//! Catalog and coupon seeding from delimited text.
//!
//! Seed data is a flat string of records separated by `;`, with
//! comma-separated fields:
//!
//! - products: `id,name,price,stock` - e.g.
//!   `1,Good with high price,4000,5;2,good2,500,10`
//! - coupons: `code,amount` - e.g. `WELCOME1000,1000`
//!
//! Fields are trimmed; empty records (trailing `;`) are ignored. Any
//! malformed record fails the whole load with a [`SeedError`] naming the
//! record and the reason.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use chatshop_core::{CouponCode, ProductId};
use chatshop_engine::Shop;
use chatshop_engine::models::{Coupon, Product};

use crate::config::BotConfig;

/// Errors produced while parsing seed records.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A product record did not parse.
    #[error("malformed product record {record:?}: {reason}")]
    MalformedProduct {
        /// The offending record text.
        record: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A coupon record did not parse.
    #[error("malformed coupon record {record:?}: {reason}")]
    MalformedCoupon {
        /// The offending record text.
        record: String,
        /// What was wrong with it.
        reason: String,
    },
}

fn product_error(record: &str, reason: impl Into<String>) -> SeedError {
    SeedError::MalformedProduct {
        record: record.to_owned(),
        reason: reason.into(),
    }
}

fn coupon_error(record: &str, reason: impl Into<String>) -> SeedError {
    SeedError::MalformedCoupon {
        record: record.to_owned(),
        reason: reason.into(),
    }
}

/// Parse product seed records.
///
/// # Errors
///
/// Returns [`SeedError::MalformedProduct`] for the first record that does
/// not have four fields, a numeric id/stock, or a non-negative price.
pub fn parse_products(input: &str) -> Result<Vec<Product>, SeedError> {
    let mut products = Vec::new();

    for record in input.split(';').filter(|r| !r.trim().is_empty()) {
        let fields: Vec<&str> = record.split(',').map(str::trim).collect();
        let [id, name, price, stock] = fields.as_slice() else {
            return Err(product_error(record, "expected id,name,price,stock"));
        };

        let id: i64 = id
            .parse()
            .map_err(|_| product_error(record, "id is not an integer"))?;
        if name.is_empty() {
            return Err(product_error(record, "name is empty"));
        }
        let price: Decimal = price
            .parse()
            .map_err(|_| product_error(record, "price is not a decimal"))?;
        if price < Decimal::ZERO {
            return Err(product_error(record, "price is negative"));
        }
        let stock: u32 = stock
            .parse()
            .map_err(|_| product_error(record, "stock is not a non-negative integer"))?;

        products.push(Product::new(
            ProductId::new(id),
            (*name).to_owned(),
            price,
            stock,
        ));
    }

    Ok(products)
}

/// Parse coupon seed records.
///
/// # Errors
///
/// Returns [`SeedError::MalformedCoupon`] for the first record that does
/// not have two fields, a valid code, or a non-negative decimal amount.
pub fn parse_coupons(input: &str) -> Result<Vec<Coupon>, SeedError> {
    let mut coupons = Vec::new();

    for record in input.split(';').filter(|r| !r.trim().is_empty()) {
        let fields: Vec<&str> = record.split(',').map(str::trim).collect();
        let [code, amount] = fields.as_slice() else {
            return Err(coupon_error(record, "expected code,amount"));
        };

        let code = CouponCode::parse(code)
            .map_err(|e| coupon_error(record, e.to_string()))?;
        let amount: Decimal = amount
            .parse()
            .map_err(|_| coupon_error(record, "amount is not a decimal"))?;
        if amount < Decimal::ZERO {
            return Err(coupon_error(record, "amount is negative"));
        }

        coupons.push(Coupon::new(code, amount));
    }

    Ok(coupons)
}

/// Parse the seed strings in `config` and load them into the shop.
///
/// # Errors
///
/// Returns the first [`SeedError`] encountered; nothing is loaded from a
/// seed string that fails to parse (records before the bad one in the
/// *other* string are still loaded).
pub async fn load_from_config(shop: &Shop, config: &BotConfig) -> Result<(), SeedError> {
    if let Some(products) = &config.products {
        let products = parse_products(products)?;
        info!(count = products.len(), "seeding catalog");
        for product in products {
            shop.products().save(product).await;
        }
    }

    if let Some(coupons) = &config.coupons {
        let coupons = parse_coupons(coupons)?;
        info!(count = coupons.len(), "seeding coupons");
        for coupon in coupons {
            shop.coupons().save(coupon).await;
        }
    }

    Ok(())
}
