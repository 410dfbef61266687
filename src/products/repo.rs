use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

pub const MYSTERY_BOX_SLUG: &str = "mystery-box";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64, // millimes
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub active: bool,
}

impl Product {
    /// Served when the catalogue has no active mystery box row.
    pub fn fallback_mystery_box() -> Self {
        Self {
            id: 1,
            name: "Mystery Box - Découvrez la surprise !".into(),
            description:
                "Une boîte mystère pleine de surprises d'une valeur supérieure au prix d'achat"
                    .into(),
            price: 99_000,
            image_url: "/mystery-box.jpg".into(),
            video_url: Some("/mystery-box-video.mp4".into()),
            active: true,
        }
    }
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_active_by_slug(&self, slug: &str) -> anyhow::Result<Option<Product>>;
}

#[derive(Clone)]
pub struct PgProductRepository {
    db: PgPool,
}

impl PgProductRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_active_by_slug(&self, slug: &str) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, image_url, video_url, active
            FROM products
            WHERE slug = $1 AND active = true
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.db)
        .await
        .context("find product by slug")?;
        Ok(product)
    }
}
