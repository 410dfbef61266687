use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::claims::{AdminClaims, CustomerClaims};
use super::repo_types::{Admin, Customer};
use crate::{config::JwtConfig, state::AppState};

/// Signing and verification keys for both principal kinds. Admin and
/// customer tokens share the secret but not the audience.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    admin_audience: String,
    customer_audience: String,
    admin_ttl: Duration,
    customer_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        let minutes = |m: i64| Duration::from_secs((m.max(0) as u64) * 60);
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            admin_audience: cfg.admin_audience.clone(),
            customer_audience: cfg.customer_audience.clone(),
            admin_ttl: minutes(cfg.admin_ttl_minutes),
            customer_ttl: minutes(cfg.customer_ttl_minutes),
        }
    }

    fn window(issued_at: OffsetDateTime, ttl: Duration) -> (usize, usize) {
        let exp = issued_at + TimeDuration::seconds(ttl.as_secs() as i64);
        (
            issued_at.unix_timestamp() as usize,
            exp.unix_timestamp() as usize,
        )
    }

    fn sign<C: Serialize>(&self, claims: &C) -> anyhow::Result<String> {
        Ok(encode(&Header::default(), claims, &self.encoding)?)
    }

    fn verify<C: DeserializeOwned>(&self, token: &str, audience: &str) -> anyhow::Result<C> {
        let mut validation = Validation::default();
        // Expiry is exact: no grace period past `exp`.
        validation.leeway = 0;
        validation.set_audience(&[audience]);
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<C>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    pub fn sign_admin(&self, admin: &Admin) -> anyhow::Result<String> {
        self.sign_admin_at(admin, OffsetDateTime::now_utc())
    }

    pub(crate) fn sign_admin_at(
        &self,
        admin: &Admin,
        issued_at: OffsetDateTime,
    ) -> anyhow::Result<String> {
        let (iat, exp) = Self::window(issued_at, self.admin_ttl);
        let claims = AdminClaims {
            admin_id: admin.id,
            username: admin.username.clone(),
            role: admin.role.clone(),
            iat,
            exp,
            iss: self.issuer.clone(),
            aud: self.admin_audience.clone(),
        };
        let token = self.sign(&claims)?;
        debug!(admin_id = admin.id, "admin jwt signed");
        Ok(token)
    }

    pub fn sign_customer(&self, customer: &Customer) -> anyhow::Result<String> {
        self.sign_customer_at(customer, OffsetDateTime::now_utc())
    }

    pub(crate) fn sign_customer_at(
        &self,
        customer: &Customer,
        issued_at: OffsetDateTime,
    ) -> anyhow::Result<String> {
        let (iat, exp) = Self::window(issued_at, self.customer_ttl);
        let claims = CustomerClaims {
            customer_id: customer.id,
            email: customer.email.clone(),
            iat,
            exp,
            iss: self.issuer.clone(),
            aud: self.customer_audience.clone(),
        };
        let token = self.sign(&claims)?;
        debug!(customer_id = customer.id, "customer jwt signed");
        Ok(token)
    }

    pub fn verify_admin(&self, token: &str) -> anyhow::Result<AdminClaims> {
        self.verify(token, &self.admin_audience)
    }

    pub fn verify_customer(&self, token: &str) -> anyhow::Result<CustomerClaims> {
        self.verify(token, &self.customer_audience)
    }
}
