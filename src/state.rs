use std::sync::Arc;

use crate::{
    catalog::Catalog,
    checkout::OrderSubmission,
    config::AppConfig,
    db::DbPool,
    repository::StoreRepository,
    session::SessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<AppConfig>,
    pub catalog: Arc<Catalog>,
    pub sessions: SessionStore,
    pub repo: Arc<dyn StoreRepository>,
    pub checkout: OrderSubmission,
}

impl AppState {
    pub fn new(pool: DbPool, repo: Arc<dyn StoreRepository>, config: AppConfig) -> Self {
        let checkout = OrderSubmission::new(repo.clone(), config.delivery_fee);
        Self {
            pool,
            config: Arc::new(config),
            catalog: Arc::new(Catalog::dairy()),
            sessions: SessionStore::new(),
            repo,
            checkout,
        }
    }
}
