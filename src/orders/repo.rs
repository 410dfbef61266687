use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{NewOrder, Order, OrderChanges, OrderRow, OrderStats, OrderStatus};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts the order with status `processing`.
    async fn insert(&self, order: &NewOrder) -> anyhow::Result<Order>;

    /// Newest first.
    async fn list(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Order>>;

    async fn count(&self, status: Option<OrderStatus>) -> anyhow::Result<i64>;

    /// `None` when no order has this id.
    async fn update(&self, id: i64, changes: &OrderChanges) -> anyhow::Result<Option<Order>>;

    /// Number of rows removed (0 or 1).
    async fn delete(&self, id: i64) -> anyhow::Result<u64>;

    async fn stats(&self) -> anyhow::Result<OrderStats>;
}

#[derive(Clone)]
pub struct PgOrderRepository {
    db: PgPool,
}

impl PgOrderRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn into_order(row: OrderRow) -> anyhow::Result<Order> {
    let id = row.id;
    Order::try_from(row).with_context(|| format!("order {id} has an invalid status"))
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert(&self, order: &NewOrder) -> anyhow::Result<Order> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (
                customer_name, phone, governorate, address,
                product_id, product_price, shipping_price, total_price,
                status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            RETURNING id, customer_name, phone, governorate, address,
                      product_id, product_price, shipping_price, total_price,
                      status, created_at
            "#,
        )
        .bind(&order.customer_name)
        .bind(&order.phone)
        .bind(&order.governorate)
        .bind(&order.address)
        .bind(order.product_id)
        .bind(order.product_price)
        .bind(order.shipping_price)
        .bind(order.total_price)
        .bind(OrderStatus::Processing.as_str())
        .fetch_one(&self.db)
        .await
        .context("insert order")?;
        into_order(row)
    }

    async fn list(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_name, phone, governorate, address,
                   product_id, product_price, shipping_price, total_price,
                   status, created_at
            FROM orders
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status.map(OrderStatus::as_str))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list orders")?;
        rows.into_iter().map(into_order).collect()
    }

    async fn count(&self, status: Option<OrderStatus>) -> anyhow::Result<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE ($1::text IS NULL OR status = $1)
            "#,
        )
        .bind(status.map(OrderStatus::as_str))
        .fetch_one(&self.db)
        .await
        .context("count orders")?;
        Ok(total)
    }

    async fn update(&self, id: i64, changes: &OrderChanges) -> anyhow::Result<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
            SET
                status = COALESCE($2, status),
                customer_name = COALESCE($3, customer_name),
                phone = COALESCE($4, phone),
                governorate = COALESCE($5, governorate),
                address = COALESCE($6, address)
            WHERE id = $1
            RETURNING id, customer_name, phone, governorate, address,
                      product_id, product_price, shipping_price, total_price,
                      status, created_at
            "#,
        )
        .bind(id)
        .bind(changes.status.map(OrderStatus::as_str))
        .bind(changes.customer_name.as_deref())
        .bind(changes.phone.as_deref())
        .bind(changes.governorate.as_deref())
        .bind(changes.address.as_deref())
        .fetch_optional(&self.db)
        .await
        .context("update order")?;
        row.map(into_order).transpose()
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete order")?;
        Ok(result.rows_affected())
    }

    async fn stats(&self) -> anyhow::Result<OrderStats> {
        let stats = sqlx::query_as::<_, OrderStats>(
            r#"
            SELECT COUNT(*) AS total_orders,
                   COUNT(*) FILTER (WHERE status = 'processing') AS processing_orders,
                   COUNT(*) FILTER (WHERE status = 'delivered') AS delivered_orders,
                   COALESCE(SUM(total_price), 0)::BIGINT AS revenue
            FROM orders
            "#,
        )
        .fetch_one(&self.db)
        .await
        .context("order stats")?;
        Ok(stats)
    }
}
