use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_SHIPPING_PRICE: i64 = 8_000; // 8 TND
pub const DEFAULT_PRODUCT_PRICE: i64 = 99_000; // 99 TND

/// The singleton `settings` row (`id = 1`).
#[derive(Debug, Clone, FromRow)]
pub struct SettingsRow {
    pub shipping_price: i64,
    pub product_price: i64,
    pub facebook_pixel_id: Option<String>,
    pub google_analytics_id: Option<String>,
    pub google_ads_id: Option<String>,
}

/// Storefront pricing plus marketing integration identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub shipping_price: i64,
    pub product_price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_pixel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_ads_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shipping_price: DEFAULT_SHIPPING_PRICE,
            product_price: DEFAULT_PRODUCT_PRICE,
            facebook_pixel_id: None,
            google_analytics_id: None,
            google_ads_id: None,
        }
    }
}

fn present(id: Option<String>) -> Option<String> {
    id.filter(|v| !v.is_empty())
}

impl From<SettingsRow> for Settings {
    fn from(r: SettingsRow) -> Self {
        Self {
            shipping_price: r.shipping_price,
            product_price: r.product_price,
            facebook_pixel_id: present(r.facebook_pixel_id),
            google_analytics_id: present(r.google_analytics_id),
            google_ads_id: present(r.google_ads_id),
        }
    }
}

/// Partial update. `None` leaves a field untouched; `Some("")` clears an
/// identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub shipping_price: Option<i64>,
    pub product_price: Option<i64>,
    pub facebook_pixel_id: Option<String>,
    pub google_analytics_id: Option<String>,
    pub google_ads_id: Option<String>,
}
