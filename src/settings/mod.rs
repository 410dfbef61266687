pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{PgSettingsRepository, SettingsRepository};

pub fn router() -> Router<AppState> {
    handlers::settings_routes()
}
