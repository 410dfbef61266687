use tracing::{debug, info};

use super::dto::{CreateOrderRequest, ListOrdersQuery, ListOrdersResponse, UpdateOrderRequest};
use super::governorate::canonical_governorate;
use super::repo::OrderRepository;
use super::repo_types::{NewOrder, Order, OrderChanges, OrderStats, OrderStatus};
use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

fn required(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::invalid_argument(format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// Blank strings count as "not supplied".
fn supplied(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_status(raw: &str) -> Result<OrderStatus, AppError> {
    raw.parse::<OrderStatus>()
        .map_err(|e| AppError::invalid_argument(e.to_string()))
}

fn governorate(raw: &str) -> Result<String, AppError> {
    canonical_governorate(raw)
        .map(str::to_string)
        .ok_or_else(|| AppError::invalid_argument(format!("unknown governorate: {}", raw.trim())))
}

/// Records a checkout. The total is a snapshot of the prices the caller
/// supplied; later settings changes never touch it.
pub async fn create_order(
    orders: &dyn OrderRepository,
    req: CreateOrderRequest,
) -> Result<Order, AppError> {
    if req.product_price < 0 || req.shipping_price < 0 {
        return Err(AppError::invalid_argument("prices must not be negative"));
    }
    let total_price = req
        .product_price
        .checked_add(req.shipping_price)
        .ok_or_else(|| AppError::invalid_argument("total price out of range"))?;

    let new_order = NewOrder {
        customer_name: required("customerName", &req.customer_name)?,
        phone: required("phone", &req.phone)?,
        governorate: governorate(&required("governorate", &req.governorate)?)?,
        address: required("address", &req.address)?,
        product_id: req.product_id,
        product_price: req.product_price,
        shipping_price: req.shipping_price,
        total_price,
    };

    let order = orders.insert(&new_order).await?;
    info!(order_id = order.id, total_price = order.total_price, "order created");
    Ok(order)
}

pub async fn list_orders(
    orders: &dyn OrderRepository,
    query: ListOrdersQuery,
) -> Result<ListOrdersResponse, AppError> {
    let status = supplied(query.status)
        .map(|s| parse_status(&s))
        .transpose()?;
    let page = query.page.filter(|p| *p >= 1).unwrap_or(1);
    let limit = query
        .limit
        .filter(|l| *l >= 1)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);
    let offset = (page - 1).saturating_mul(limit);

    let total = orders.count(status).await?;
    let page_orders = orders.list(status, limit, offset).await?;
    debug!(?status, page, limit, total, "orders listed");

    Ok(ListOrdersResponse {
        orders: page_orders,
        total,
        page,
        limit,
    })
}

pub async fn update_order(
    orders: &dyn OrderRepository,
    id: i64,
    req: UpdateOrderRequest,
) -> Result<Order, AppError> {
    let changes = OrderChanges {
        status: supplied(req.status).map(|s| parse_status(&s)).transpose()?,
        customer_name: supplied(req.customer_name),
        phone: supplied(req.phone),
        governorate: supplied(req.governorate)
            .map(|g| governorate(&g))
            .transpose()?,
        address: supplied(req.address),
    };

    if changes.is_empty() {
        return Err(AppError::invalid_argument("No fields to update"));
    }

    let order = orders
        .update(id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))?;
    info!(order_id = id, status = %order.status, "order updated");
    Ok(order)
}

/// Deleting an id that does not exist is not an error.
pub async fn delete_order(orders: &dyn OrderRepository, id: i64) -> Result<(), AppError> {
    let removed = orders.delete(id).await?;
    info!(order_id = id, removed, "order deleted");
    Ok(())
}

pub async fn order_stats(orders: &dyn OrderRepository) -> Result<OrderStats, AppError> {
    Ok(orders.stats().await?)
}
