use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{
    Settings, SettingsPatch, SettingsRow, DEFAULT_PRODUCT_PRICE, DEFAULT_SHIPPING_PRICE,
};

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// The stored settings, `None` before the first write.
    async fn get(&self) -> anyhow::Result<Option<Settings>>;

    /// Applies the patch to the stored row, creating it from the defaults
    /// when absent, in one atomic step.
    async fn upsert(&self, patch: &SettingsPatch) -> anyhow::Result<Settings>;
}

#[derive(Clone)]
pub struct PgSettingsRepository {
    db: PgPool,
}

impl PgSettingsRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn get(&self) -> anyhow::Result<Option<Settings>> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT shipping_price, product_price, facebook_pixel_id,
                   google_analytics_id, google_ads_id
            FROM settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.db)
        .await
        .context("get settings")?;
        Ok(row.map(Settings::from))
    }

    async fn upsert(&self, patch: &SettingsPatch) -> anyhow::Result<Settings> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            INSERT INTO settings (
                id, shipping_price, product_price, facebook_pixel_id,
                google_analytics_id, google_ads_id
            )
            VALUES (1, COALESCE($1, $6), COALESCE($2, $7), $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                shipping_price = COALESCE($1, settings.shipping_price),
                product_price = COALESCE($2, settings.product_price),
                facebook_pixel_id = COALESCE($3, settings.facebook_pixel_id),
                google_analytics_id = COALESCE($4, settings.google_analytics_id),
                google_ads_id = COALESCE($5, settings.google_ads_id)
            RETURNING shipping_price, product_price, facebook_pixel_id,
                      google_analytics_id, google_ads_id
            "#,
        )
        .bind(patch.shipping_price)
        .bind(patch.product_price)
        .bind(patch.facebook_pixel_id.as_deref())
        .bind(patch.google_analytics_id.as_deref())
        .bind(patch.google_ads_id.as_deref())
        .bind(DEFAULT_SHIPPING_PRICE)
        .bind(DEFAULT_PRODUCT_PRICE)
        .fetch_one(&self.db)
        .await
        .context("upsert settings")?;
        Ok(Settings::from(row))
    }
}
