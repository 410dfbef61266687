use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{
    repo_types::{Settings, SettingsPatch},
    services,
};
use crate::{auth::AdminUser, error::AppError, extract::AppJson, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsEnvelope {
    pub settings: Settings,
}

pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}

#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsEnvelope>, AppError> {
    let settings = services::get_settings(state.settings.as_ref()).await?;
    Ok(Json(SettingsEnvelope { settings }))
}

#[instrument(skip(state, admin, patch), fields(admin_id = admin.0.admin_id))]
pub async fn update_settings(
    State(state): State<AppState>,
    admin: AdminUser,
    AppJson(patch): AppJson<SettingsPatch>,
) -> Result<Json<SettingsEnvelope>, AppError> {
    let settings = services::update_settings(state.settings.as_ref(), patch).await?;
    Ok(Json(SettingsEnvelope { settings }))
}
