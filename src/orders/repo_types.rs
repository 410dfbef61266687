use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;

/// Lifecycle state of an order. Every state may move to every other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Processing,
    OnHold,
    Delivered,
    Failed,
    Shipping,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Processing,
        OrderStatus::OnHold,
        OrderStatus::Delivered,
        OrderStatus::Failed,
        OrderStatus::Shipping,
        OrderStatus::Returned,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Failed => "failed",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Returned => "returned",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Order as stored in the `orders` table.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    pub governorate: String,
    pub address: String,
    pub product_id: i64,
    pub product_price: i64,
    pub shipping_price: i64,
    pub total_price: i64,
    pub status: String,
    pub created_at: OffsetDateTime,
}

/// Order as returned to clients. `total_price` is the price at purchase
/// time and is never recomputed from current settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    pub governorate: String,
    pub address: String,
    pub product_id: i64,
    pub product_price: i64,
    pub shipping_price: i64,
    pub total_price: i64,
    pub status: OrderStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TryFrom<OrderRow> for Order {
    type Error = UnknownStatus;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            status: r.status.parse()?,
            id: r.id,
            customer_name: r.customer_name,
            phone: r.phone,
            governorate: r.governorate,
            address: r.address,
            product_id: r.product_id,
            product_price: r.product_price,
            shipping_price: r.shipping_price,
            total_price: r.total_price,
            created_at: r.created_at,
        })
    }
}

/// Validated input for a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone: String,
    pub governorate: String,
    pub address: String,
    pub product_id: i64,
    pub product_price: i64,
    pub shipping_price: i64,
    pub total_price: i64,
}

/// Fields to overwrite on an existing order. `None` leaves a column as is.
#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub status: Option<OrderStatus>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub governorate: Option<String>,
    pub address: Option<String>,
}

impl OrderChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.customer_name.is_none()
            && self.phone.is_none()
            && self.governorate.is_none()
            && self.address.is_none()
    }
}

/// Back-office dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: i64,
    pub processing_orders: i64,
    pub delivered_orders: i64,
    pub revenue: i64, // millimes
}
