//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use chatshop_core::{OrderId, ProductId, UserId};

use super::Product;

/// Timestamp format used when presenting an order to a user.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line of a finalized order.
///
/// A value snapshot taken at checkout time: name and unit price are copied
/// out of the product, so later catalog changes cannot retroactively alter
/// what this order recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product that was purchased.
    pub product_id: ProductId,
    /// Product name at checkout time.
    pub product_name: String,
    /// Unit price at checkout time.
    pub unit_price: Decimal,
    /// Units purchased.
    pub quantity: u32,
}

impl OrderItem {
    /// Snapshot a cart line against the product it referenced.
    #[must_use]
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A finalized purchase.
///
/// Created exactly once per successful checkout and immutable thereafter.
/// Ids are assigned monotonically and never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order id.
    pub id: OrderId,
    /// The account that placed the order.
    pub user_id: UserId,
    /// Snapshot of what was purchased.
    pub items: Vec<OrderItem>,
    /// Total charged: the sum of every line total at checkout time.
    pub total: Decimal,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order stamped with the current time.
    #[must_use]
    pub fn new(id: OrderId, user_id: UserId, items: Vec<OrderItem>, total: Decimal) -> Self {
        Self {
            id,
            user_id,
            items,
            total,
            created_at: Utc::now(),
        }
    }

    /// The creation timestamp formatted for display.
    #[must_use]
    pub fn created_at_display(&self) -> String {
        self.created_at.format(DATE_FORMAT).to_string()
    }
}
