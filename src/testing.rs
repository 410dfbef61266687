//! In-memory repositories and fixtures for unit and router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

use crate::auth::password::hash_password;
use crate::auth::repo_types::{Admin, Customer};
use crate::auth::{AccountRepository, JwtKeys};
use crate::config::JwtConfig;
use crate::orders::repo_types::{NewOrder, Order, OrderChanges, OrderStats, OrderStatus};
use crate::orders::OrderRepository;
use crate::products::repo::Product;
use crate::products::ProductRepository;
use crate::settings::repo_types::{
    Settings, SettingsPatch, SettingsRow, DEFAULT_PRODUCT_PRICE, DEFAULT_SHIPPING_PRICE,
};
use crate::settings::SettingsRepository;
use crate::state::AppState;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".into(),
        issuer: "test-issuer".into(),
        admin_audience: "test-admin".into(),
        customer_audience: "test-customers".into(),
        admin_ttl_minutes: 60 * 24,
        customer_ttl_minutes: 60 * 24 * 7,
    }
}

pub fn sample_admin(username: &str, role: &str) -> Admin {
    Admin {
        id: 1,
        username: username.into(),
        password_hash: String::new(),
        role: role.into(),
        active: true,
    }
}

pub fn sample_customer(email: &str) -> Customer {
    Customer {
        id: 1,
        name: "Sample".into(),
        email: email.into(),
        password_hash: String::new(),
        created_at: OffsetDateTime::now_utc(),
    }
}

/// `Authorization` header value carrying a fresh admin token.
pub fn admin_bearer(state: &AppState) -> String {
    let keys: &JwtKeys = &state.jwt;
    let token = keys
        .sign_admin(&sample_admin("root", "admin"))
        .expect("sign admin token");
    format!("Bearer {token}")
}

/// Runs one request through `app`; a non-JSON body reads as `Value::Null`.
pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.expect("router is infallible");
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub fn json_request(
    method: &str,
    uri: &str,
    body: &Value,
    bearer: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(bearer) = bearer {
        builder = builder.header(header::AUTHORIZATION, bearer);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn get_request(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header(header::AUTHORIZATION, bearer);
    }
    builder.body(Body::empty()).expect("valid request")
}

#[derive(Default)]
pub struct MemoryAccounts {
    admins: Mutex<Vec<Admin>>,
    customers: Mutex<Vec<Customer>>,
}

impl MemoryAccounts {
    pub fn add_admin(&self, username: &str, password: &str, role: &str, active: bool) {
        let mut admins = self.admins.lock().unwrap();
        let id = admins.len() as i64 + 1;
        admins.push(Admin {
            id,
            username: username.into(),
            password_hash: hash_password(password).expect("hash password"),
            role: role.into(),
            active,
        });
    }

    pub fn customer_count(&self) -> usize {
        self.customers.lock().unwrap().len()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccounts {
    async fn find_active_admin(&self, username: &str) -> anyhow::Result<Option<Admin>> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username && a.active)
            .cloned())
    }

    async fn find_customer_by_email(&self, email: &str) -> anyhow::Result<Option<Customer>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn find_customer_by_id(&self, id: i64) -> anyhow::Result<Option<Customer>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert_customer(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<Customer>> {
        let mut customers = self.customers.lock().unwrap();
        if customers.iter().any(|c| c.email == email) {
            return Ok(None);
        }
        let customer = Customer {
            id: customers.len() as i64 + 1,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: OffsetDateTime::now_utc(),
        };
        customers.push(customer.clone());
        Ok(Some(customer))
    }
}

#[derive(Default)]
struct OrderTable {
    next_id: i64,
    rows: Vec<Order>,
}

#[derive(Default)]
pub struct MemoryOrders {
    table: Mutex<OrderTable>,
}

impl MemoryOrders {
    pub fn len(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }

    fn matching(rows: &[Order], status: Option<OrderStatus>) -> Vec<Order> {
        rows.iter()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrders {
    async fn insert(&self, order: &NewOrder) -> anyhow::Result<Order> {
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let id = table.next_id;
        // Distinct, increasing timestamps keep "newest first" deterministic.
        let created_at = OffsetDateTime::UNIX_EPOCH + Duration::days(20_000) + Duration::seconds(id);
        let row = Order {
            id,
            customer_name: order.customer_name.clone(),
            phone: order.phone.clone(),
            governorate: order.governorate.clone(),
            address: order.address.clone(),
            product_id: order.product_id,
            product_price: order.product_price,
            shipping_price: order.shipping_price,
            total_price: order.total_price,
            status: OrderStatus::Processing,
            created_at,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn list(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Order>> {
        let table = self.table.lock().unwrap();
        let mut rows = Self::matching(&table.rows, status);
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, status: Option<OrderStatus>) -> anyhow::Result<i64> {
        let table = self.table.lock().unwrap();
        Ok(Self::matching(&table.rows, status).len() as i64)
    }

    async fn update(&self, id: i64, changes: &OrderChanges) -> anyhow::Result<Option<Order>> {
        let mut table = self.table.lock().unwrap();
        let Some(row) = table.rows.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        if let Some(status) = changes.status {
            row.status = status;
        }
        if let Some(v) = &changes.customer_name {
            row.customer_name = v.clone();
        }
        if let Some(v) = &changes.phone {
            row.phone = v.clone();
        }
        if let Some(v) = &changes.governorate {
            row.governorate = v.clone();
        }
        if let Some(v) = &changes.address {
            row.address = v.clone();
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<u64> {
        let mut table = self.table.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|o| o.id != id);
        Ok((before - table.rows.len()) as u64)
    }

    async fn stats(&self) -> anyhow::Result<OrderStats> {
        let table = self.table.lock().unwrap();
        let with = |s: OrderStatus| table.rows.iter().filter(|o| o.status == s).count() as i64;
        Ok(OrderStats {
            total_orders: table.rows.len() as i64,
            processing_orders: with(OrderStatus::Processing),
            delivered_orders: with(OrderStatus::Delivered),
            revenue: table.rows.iter().map(|o| o.total_price).sum(),
        })
    }
}

#[derive(Default)]
pub struct MemorySettings {
    row: Mutex<Option<SettingsRow>>,
}

impl MemorySettings {
    pub fn stored(&self) -> Option<Settings> {
        self.row.lock().unwrap().clone().map(Settings::from)
    }
}

#[async_trait]
impl SettingsRepository for MemorySettings {
    async fn get(&self) -> anyhow::Result<Option<Settings>> {
        Ok(self.stored())
    }

    async fn upsert(&self, patch: &SettingsPatch) -> anyhow::Result<Settings> {
        let mut slot = self.row.lock().unwrap();
        let row = match slot.take() {
            Some(existing) => SettingsRow {
                shipping_price: patch.shipping_price.unwrap_or(existing.shipping_price),
                product_price: patch.product_price.unwrap_or(existing.product_price),
                facebook_pixel_id: patch
                    .facebook_pixel_id
                    .clone()
                    .or(existing.facebook_pixel_id),
                google_analytics_id: patch
                    .google_analytics_id
                    .clone()
                    .or(existing.google_analytics_id),
                google_ads_id: patch.google_ads_id.clone().or(existing.google_ads_id),
            },
            None => SettingsRow {
                shipping_price: patch.shipping_price.unwrap_or(DEFAULT_SHIPPING_PRICE),
                product_price: patch.product_price.unwrap_or(DEFAULT_PRODUCT_PRICE),
                facebook_pixel_id: patch.facebook_pixel_id.clone(),
                google_analytics_id: patch.google_analytics_id.clone(),
                google_ads_id: patch.google_ads_id.clone(),
            },
        };
        *slot = Some(row.clone());
        Ok(Settings::from(row))
    }
}

#[derive(Default)]
pub struct MemoryProducts {
    by_slug: HashMap<String, Product>,
}

impl MemoryProducts {
    pub fn with(slug: &str, product: Product) -> Self {
        Self {
            by_slug: HashMap::from([(slug.to_string(), product)]),
        }
    }
}

#[async_trait]
impl ProductRepository for MemoryProducts {
    async fn find_active_by_slug(&self, slug: &str) -> anyhow::Result<Option<Product>> {
        Ok(self.by_slug.get(slug).filter(|p| p.active).cloned())
    }
}
