use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{AccountRepository, JwtKeys, PgAccountRepository};
use crate::config::AppConfig;
use crate::orders::{OrderRepository, PgOrderRepository};
use crate::products::{PgProductRepository, ProductRepository};
use crate::settings::{PgSettingsRepository, SettingsRepository};

#[derive(Clone)]
pub struct AppState {
    pub jwt: JwtKeys,
    pub accounts: Arc<dyn AccountRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn from_pool(db: PgPool, config: &AppConfig) -> Self {
        Self {
            jwt: JwtKeys::from_config(&config.jwt),
            accounts: Arc::new(PgAccountRepository::new(db.clone())),
            orders: Arc::new(PgOrderRepository::new(db.clone())),
            settings: Arc::new(PgSettingsRepository::new(db.clone())),
            products: Arc::new(PgProductRepository::new(db)),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with_accounts().0
    }

    /// In-memory state for tests; the returned handle seeds accounts.
    #[cfg(test)]
    pub fn fake_with_accounts() -> (Self, Arc<crate::testing::MemoryAccounts>) {
        use crate::testing::{
            test_jwt_config, MemoryAccounts, MemoryOrders, MemoryProducts, MemorySettings,
        };

        let accounts = Arc::new(MemoryAccounts::default());
        let state = Self {
            jwt: JwtKeys::from_config(&test_jwt_config()),
            accounts: accounts.clone(),
            orders: Arc::new(MemoryOrders::default()),
            settings: Arc::new(MemorySettings::default()),
            products: Arc::new(MemoryProducts::default()),
        };
        (state, accounts)
    }
}
