use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::dto::{
    AdminLoginRequest, AdminLoginResponse, AdminTokenValidation, CustomerAuthResponse,
    CustomerLoginRequest, PublicAdmin, PublicCustomer, RegisterRequest,
};
use super::jwt::JwtKeys;
use super::password::{hash_password, verify_password};
use super::repo::AccountRepository;
use crate::error::AppError;

const MIN_PASSWORD_LEN: usize = 8;
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn admin_login(
    accounts: &dyn AccountRepository,
    keys: &JwtKeys,
    req: AdminLoginRequest,
) -> Result<AdminLoginResponse, AppError> {
    let Some(admin) = accounts.find_active_admin(&req.username).await? else {
        warn!(username = %req.username, "admin login unknown or inactive user");
        return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
    };

    if !verify_password(&req.password, &admin.password_hash)? {
        warn!(admin_id = admin.id, "admin login invalid password");
        return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
    }

    let token = keys.sign_admin(&admin)?;
    info!(admin_id = admin.id, username = %admin.username, "admin logged in");
    Ok(AdminLoginResponse {
        token,
        user: PublicAdmin::from(&admin),
    })
}

/// Never fails: a bad signature, an expired token and garbage input all
/// collapse into `valid: false`.
pub fn validate_admin_token(keys: &JwtKeys, token: &str) -> AdminTokenValidation {
    match keys.verify_admin(token) {
        Ok(claims) => AdminTokenValidation {
            valid: true,
            admin: Some(PublicAdmin {
                id: claims.admin_id,
                username: claims.username,
                role: claims.role,
            }),
        },
        Err(_) => AdminTokenValidation {
            valid: false,
            admin: None,
        },
    }
}

pub async fn customer_login(
    accounts: &dyn AccountRepository,
    keys: &JwtKeys,
    req: CustomerLoginRequest,
) -> Result<CustomerAuthResponse, AppError> {
    let email = normalize_email(&req.email);

    let Some(customer) = accounts.find_customer_by_email(&email).await? else {
        warn!(email = %email, "customer login unknown email");
        return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
    };

    if !verify_password(&req.password, &customer.password_hash)? {
        warn!(customer_id = customer.id, "customer login invalid password");
        return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
    }

    let token = keys.sign_customer(&customer)?;
    info!(customer_id = customer.id, "customer logged in");
    Ok(CustomerAuthResponse {
        token,
        user: PublicCustomer::from(&customer),
    })
}

pub async fn customer_register(
    accounts: &dyn AccountRepository,
    keys: &JwtKeys,
    req: RegisterRequest,
) -> Result<CustomerAuthResponse, AppError> {
    let name = req.name.trim();
    let email = normalize_email(&req.email);

    if name.is_empty() {
        return Err(AppError::invalid_argument("Name is required"));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::invalid_argument("Invalid email"));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::invalid_argument("Password too short"));
    }

    let hash = hash_password(&req.password)?;

    let Some(customer) = accounts.insert_customer(name, &email, &hash).await? else {
        warn!(email = %email, "email already registered");
        return Err(AppError::AlreadyExists("Email already registered".into()));
    };

    let token = keys.sign_customer(&customer)?;
    info!(customer_id = customer.id, "customer registered");
    Ok(CustomerAuthResponse {
        token,
        user: PublicCustomer::from(&customer),
    })
}

pub async fn customer_profile(
    accounts: &dyn AccountRepository,
    customer_id: i64,
) -> Result<PublicCustomer, AppError> {
    let customer = accounts
        .find_customer_by_id(customer_id)
        .await?
        .ok_or_else(|| AppError::unauthenticated("Customer not found"))?;
    Ok(PublicCustomer::from(&customer))
}
