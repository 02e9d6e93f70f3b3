use dairy_storefront_api::{
    config::AppConfig,
    db::{DbPool, create_pool, orm_from_pool, run_migrations},
    repository::{ProfileUpsert, SeaOrmRepository, StoreRepository},
    services::auth_service::hash_password,
};
use uuid::Uuid;

const DEMO_EMAIL: &str = "asha@example.in";
const DEMO_PASSWORD: &str = "dairy123";
const DEMO_NAME: &str = "Asha Verma";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let user_id = ensure_shopper(&pool, DEMO_EMAIL, DEMO_PASSWORD, DEMO_NAME).await?;

    let repo = SeaOrmRepository::new(orm_from_pool(pool.clone()));
    repo.upsert_profile(ProfileUpsert {
        user_id,
        email: DEMO_EMAIL.to_string(),
        full_name: DEMO_NAME.to_string(),
        phone: Some("9876543210".to_string()),
        delivery_address: Some("12 Lake View Road, Pune - 411001".to_string()),
    })
    .await?;

    println!("Seed completed. Shopper {DEMO_EMAIL} / {DEMO_PASSWORD}, id {user_id}");
    Ok(())
}

async fn ensure_shopper(
    pool: &DbPool,
    email: &str,
    password: &str,
    full_name: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, full_name)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE
            SET password_hash = EXCLUDED.password_hash,
                full_name = EXCLUDED.full_name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .fetch_one(pool)
    .await?;

    println!("Ensured shopper {email}");
    Ok(user_id)
}
