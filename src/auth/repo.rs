use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Admin, Customer};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Admin with this username, only if the account is active.
    async fn find_active_admin(&self, username: &str) -> anyhow::Result<Option<Admin>>;

    async fn find_customer_by_email(&self, email: &str) -> anyhow::Result<Option<Customer>>;

    async fn find_customer_by_id(&self, id: i64) -> anyhow::Result<Option<Customer>>;

    /// Inserts a customer. `None` means the email is already registered.
    async fn insert_customer(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<Customer>>;
}

#[derive(Clone)]
pub struct PgAccountRepository {
    db: PgPool,
}

impl PgAccountRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_active_admin(&self, username: &str) -> anyhow::Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, username, password_hash, role, active
            FROM admins
            WHERE username = $1 AND active = true
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .context("find active admin")?;
        Ok(admin)
    }

    async fn find_customer_by_email(&self, email: &str) -> anyhow::Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM customers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find customer by email")?;
        Ok(customer)
    }

    async fn find_customer_by_id(&self, id: i64) -> anyhow::Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find customer by id")?;
        Ok(customer)
    }

    async fn insert_customer(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<Customer>> {
        // The unique index on email arbitrates concurrent registrations.
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await
        .context("insert customer")?;
        Ok(customer)
    }
}
