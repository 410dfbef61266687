use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::repo::{Product, ProductRepository, MYSTERY_BOX_SLUG};
use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductEnvelope {
    pub product: Product,
}

pub fn product_routes() -> Router<AppState> {
    Router::new().route("/products/mystery-box", get(get_mystery_box))
}

pub async fn mystery_box(products: &dyn ProductRepository) -> Result<Product, AppError> {
    match products.find_active_by_slug(MYSTERY_BOX_SLUG).await? {
        Some(product) => Ok(product),
        None => {
            debug!("no active mystery box in catalogue; serving fallback");
            Ok(Product::fallback_mystery_box())
        }
    }
}

#[instrument(skip(state))]
pub async fn get_mystery_box(
    State(state): State<AppState>,
) -> Result<Json<ProductEnvelope>, AppError> {
    let product = mystery_box(state.products.as_ref()).await?;
    Ok(Json(ProductEnvelope { product }))
}
