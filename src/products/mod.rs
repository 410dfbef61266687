pub mod handlers;
pub mod repo;

use crate::state::AppState;
use axum::Router;

pub use repo::{PgProductRepository, ProductRepository};

pub fn router() -> Router<AppState> {
    handlers::product_routes()
}
