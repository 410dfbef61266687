use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{
        AdminLoginRequest, AdminLoginResponse, AdminTokenValidation, CustomerAuthResponse,
        CustomerLoginRequest, PublicCustomer, RegisterRequest, ValidateTokenRequest,
    },
    extractors::CustomerUser,
    services,
};
use crate::{error::AppError, extract::AppJson, state::AppState};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(admin_login))
        .route("/admin/validate", post(validate_admin_token))
}

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/customer/login", post(customer_login))
        .route("/customer/register", post(customer_register))
        .route("/customer/me", get(customer_me))
}

#[instrument(skip(state, payload))]
pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    let res = services::admin_login(state.accounts.as_ref(), &state.jwt, payload).await?;
    Ok(Json(res))
}

#[instrument(skip(state, payload))]
pub async fn validate_admin_token(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ValidateTokenRequest>,
) -> Json<AdminTokenValidation> {
    Json(services::validate_admin_token(&state.jwt, &payload.token))
}

#[instrument(skip(state, payload))]
pub async fn customer_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CustomerLoginRequest>,
) -> Result<Json<CustomerAuthResponse>, AppError> {
    let res = services::customer_login(state.accounts.as_ref(), &state.jwt, payload).await?;
    Ok(Json(res))
}

#[instrument(skip(state, payload))]
pub async fn customer_register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<Json<CustomerAuthResponse>, AppError> {
    let res = services::customer_register(state.accounts.as_ref(), &state.jwt, payload).await?;
    Ok(Json(res))
}

#[instrument(skip(state, claims), fields(customer_id = claims.customer_id))]
pub async fn customer_me(
    State(state): State<AppState>,
    CustomerUser(claims): CustomerUser,
) -> Result<Json<PublicCustomer>, AppError> {
    let customer = services::customer_profile(state.accounts.as_ref(), claims.customer_id).await?;
    Ok(Json(customer))
}
