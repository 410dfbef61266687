pub mod dto;
pub mod governorate;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{OrderRepository, PgOrderRepository};

pub fn router() -> Router<AppState> {
    handlers::order_routes()
}
