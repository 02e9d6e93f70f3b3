use std::sync::Arc;

use dairy_storefront_api::{
    cart::CartStore,
    catalog::Catalog,
    checkout::OrderSubmission,
    db::{DbPool, create_pool, orm_from_pool, run_migrations},
    dto::checkout::CheckoutRequest,
    middleware::auth::AuthUser,
    models::{NewCartItem, OrderStatus},
    repository::{OrderFilter, SeaOrmRepository, StoreRepository},
    services::auth_service::hash_password,
    session::SessionHandle,
};
use uuid::Uuid;

// Integration flow against Postgres: cart -> checkout -> order history -> profile.
#[tokio::test]
async fn checkout_persists_order_items_and_profile() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;
    let repo = Arc::new(SeaOrmRepository::new(orm_from_pool(pool.clone())));

    let email = format!("shopper-{}@example.in", Uuid::new_v4().simple());
    let user = AuthUser {
        user_id: create_user(&pool, &email).await?,
        email: email.clone(),
        full_name: Some("Asha Verma".into()),
    };

    let catalog = Catalog::dairy();
    let session = SessionHandle::default();
    {
        let mut shopper = session.lock().await;
        for id in [1, 7] {
            let product = catalog.find(id).expect("catalog product");
            shopper.cart.add_to_cart(NewCartItem::from(product));
        }
        shopper.cart.update_quantity(1, 3);
    }

    let form = CheckoutRequest {
        name: Some("Asha Verma".into()),
        email: Some(email.clone()),
        phone: Some("98765 43210".into()),
        address: Some("12 Lake View Road".into()),
        city: Some("Pune".into()),
        zip_code: Some("411001".into()),
        notes: None,
    };

    let placed = OrderSubmission::new(repo.clone(), 20.0)
        .submit(&session, Some(&user), &form)
        .await?;
    assert_eq!(placed.order.subtotal, 260.0);
    assert_eq!(placed.order.total_amount, 280.0);
    assert!(session.lock().await.cart.is_empty());

    let (orders, total) = repo
        .list_orders(
            user.user_id,
            OrderFilter {
                status: Some(OrderStatus::Pending),
                newest_first: true,
                limit: 20,
                offset: 0,
            },
        )
        .await?;
    assert_eq!(total, 1);
    assert_eq!(orders[0].id, placed.order.id);

    let (order, items) = repo
        .get_order(user.user_id, placed.order.id)
        .await?
        .expect("order stored");
    assert_eq!(order.delivery_notes, None);
    assert_eq!(items.len(), 2);
    assert_eq!(items.iter().map(|i| i.quantity).sum::<i32>(), 4);

    let other_user = Uuid::new_v4();
    assert!(repo.get_order(other_user, placed.order.id).await?.is_none());

    let profile = repo.fetch_profile(user.user_id).await?.expect("profile");
    assert_eq!(
        profile.delivery_address.as_deref(),
        Some("12 Lake View Road, Pune - 411001")
    );

    Ok(())
}

async fn create_user(pool: &DbPool, email: &str) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (id, email, password_hash, full_name) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(hash_password("dairy123")?)
    .bind("Asha Verma")
    .fetch_one(pool)
    .await?;
    Ok(id)
}
