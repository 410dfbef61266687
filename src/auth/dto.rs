use serde::{Deserialize, Serialize};

use super::repo_types::{Admin, Customer};

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomerLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Public part of an admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAdmin {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl From<&Admin> for PublicAdmin {
    fn from(a: &Admin) -> Self {
        Self {
            id: a.id,
            username: a.username.clone(),
            role: a.role.clone(),
        }
    }
}

/// Public part of a customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicCustomer {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<&Customer> for PublicCustomer {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            email: c.email.clone(),
            name: c.name.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub user: PublicAdmin,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerAuthResponse {
    pub token: String,
    pub user: PublicCustomer,
}

/// Result of token introspection. Failures carry no reason.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminTokenValidation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<PublicAdmin>,
}
