use crate::state::AppState;
use axum::Router;

pub mod claims;
pub mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;
pub(crate) mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use extractors::AdminUser;
pub use jwt::JwtKeys;
pub use repo::{AccountRepository, PgAccountRepository};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::admin_routes())
        .merge(handlers::customer_routes())
}
