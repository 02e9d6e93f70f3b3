#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use dairy_storefront_api::{
    config::AppConfig,
    dto::checkout::CheckoutRequest,
    middleware::auth::AuthUser,
    repository::InMemoryRepository,
    services::auth_service::issue_token,
    state::AppState,
};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://storefront@127.0.0.1:1/storefront".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        jwt_ttl_hours: 1,
        delivery_fee: 20.0,
        session_idle_minutes: 120,
    }
}

/// State backed by the in-memory repository. The sqlx pool never
/// connects, so audit writes fail fast and are only logged.
pub fn test_state(repo: Arc<InMemoryRepository>) -> AppState {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    AppState::new(pool, repo, config)
}

pub fn shopper() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        email: "asha@example.in".into(),
        full_name: Some("Asha Verma".into()),
    }
}

pub fn bearer(user: &AuthUser) -> String {
    let token = issue_token(user, JWT_SECRET, 1).expect("token");
    format!("Bearer {token}")
}

pub fn valid_form() -> CheckoutRequest {
    CheckoutRequest {
        name: Some("Asha Verma".into()),
        email: Some("asha@example.in".into()),
        phone: Some("9876543210".into()),
        address: Some("12 Lake View Road".into()),
        city: Some("Pune".into()),
        zip_code: Some("411001".into()),
        notes: Some("Ring the bell twice".into()),
    }
}
