use tracing::info;

use super::repo::SettingsRepository;
use super::repo_types::{Settings, SettingsPatch};
use crate::error::AppError;

/// Current settings, or the built-in defaults when nothing was saved yet.
/// The defaults are not persisted.
pub async fn get_settings(settings: &dyn SettingsRepository) -> Result<Settings, AppError> {
    Ok(settings.get().await?.unwrap_or_default())
}

pub async fn update_settings(
    settings: &dyn SettingsRepository,
    patch: SettingsPatch,
) -> Result<Settings, AppError> {
    if patch.shipping_price.is_some_and(|p| p < 0) || patch.product_price.is_some_and(|p| p < 0) {
        return Err(AppError::invalid_argument("prices must not be negative"));
    }

    let updated = settings.upsert(&patch).await?;
    info!(
        shipping_price = updated.shipping_price,
        product_price = updated.product_price,
        "settings updated"
    );
    Ok(updated)
}
