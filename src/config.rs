use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub admin_audience: String,
    pub customer_audience: String,
    pub admin_ttl_minutes: i64,
    pub customer_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "boxu".into()),
            admin_audience: std::env::var("JWT_ADMIN_AUDIENCE")
                .unwrap_or_else(|_| "boxu-admin".into()),
            customer_audience: std::env::var("JWT_CUSTOMER_AUDIENCE")
                .unwrap_or_else(|_| "boxu-customers".into()),
            admin_ttl_minutes: minutes_from_env("JWT_ADMIN_TTL_MINUTES", 60 * 24),
            customer_ttl_minutes: minutes_from_env("JWT_CUSTOMER_TTL_MINUTES", 60 * 24 * 7),
        };
        Ok(Self { database_url, jwt })
    }
}

fn minutes_from_env(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
