mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use dairy_storefront_api::{
    middleware::{auth::AuthUser, cart_session::CART_SESSION_HEADER},
    repository::InMemoryRepository,
    routes::create_api_router,
    state::AppState,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

struct Client {
    app: Router,
    state: AppState,
    session: Uuid,
    auth: Option<String>,
}

impl Client {
    fn new(repo: Arc<InMemoryRepository>) -> Self {
        let state = common::test_state(repo);
        let app = Router::new()
            .nest("/api", create_api_router())
            .with_state(state.clone());
        Self {
            app,
            state,
            session: Uuid::new_v4(),
            auth: None,
        }
    }

    fn sign_in(&mut self, user: &AuthUser) {
        self.auth = Some(common::bearer(user));
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(CART_SESSION_HEADER, self.session.to_string());
        if let Some(auth) = &self.auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn add(&self, product_id: i32) -> (StatusCode, Value) {
        self.send(Method::POST, "/api/cart", Some(json!({ "product_id": product_id })))
            .await
    }
}

fn checkout_body() -> Value {
    json!({
        "name": "Asha Verma",
        "email": "asha@example.in",
        "phone": "9876543210",
        "address": "12 Lake View Road",
        "city": "Pune",
        "zipCode": "411001",
        "notes": ""
    })
}

#[tokio::test]
async fn milk_filter_lists_three_products() {
    let client = Client::new(Arc::new(InMemoryRepository::new()));

    let (status, body) = client.get("/api/products?category=milk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["meta"]["total"], 3);

    let (_, body) = client.get("/api/products?category=all").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let client = Client::new(Arc::new(InMemoryRepository::new()));
    let (status, _) = client.get("/api/products/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn adding_twice_bumps_quantity() {
    let client = Client::new(Arc::new(InMemoryRepository::new()));

    client.add(1).await;
    let (status, body) = client.add(1).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["items"][0]["quantity"], 2);
    assert_eq!(body["data"]["total"], 120.0);

    let (_, body) = client.get("/api/cart/count").await;
    assert_eq!(body["data"]["count"], 2);
}

#[tokio::test]
async fn cart_requires_session_header() {
    let client = Client::new(Arc::new(InMemoryRepository::new()));
    let request = Request::builder()
        .uri("/api/cart")
        .body(Body::empty())
        .unwrap();
    let response = client.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quantity_below_one_is_rejected() {
    let client = Client::new(Arc::new(InMemoryRepository::new()));
    client.add(4).await;

    let (status, _) = client
        .send(Method::PATCH, "/api/cart/4", Some(json!({ "quantity": 0 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = client
        .send(Method::PATCH, "/api/cart/4", Some(json!({ "quantity": 3 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["item_count"], 3);
}

#[tokio::test]
async fn quantity_beyond_order_column_is_rejected() {
    let client = Client::new(Arc::new(InMemoryRepository::new()));
    client.add(4).await;

    for quantity in [5_000_000_000_i64, 2_147_483_648] {
        let (status, _) = client
            .send(Method::PATCH, "/api/cart/4", Some(json!({ "quantity": quantity })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, body) = client.get("/api/cart").await;
    assert_eq!(body["data"]["items"][0]["quantity"], 1);
}

#[tokio::test]
async fn reads_with_unknown_session_store_nothing() {
    let client = Client::new(Arc::new(InMemoryRepository::new()));

    let (status, body) = client.get("/api/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["item_count"], 0);
    let (_, body) = client.get("/api/cart/count").await;
    assert_eq!(body["data"]["count"], 0);
    let (status, _) = client.get("/api/checkout").await;
    assert_eq!(status, StatusCode::CONFLICT);
    client.get("/api/navigation?path=/checkout").await;
    client.send(Method::DELETE, "/api/cart/4", None).await;
    client.send(Method::DELETE, "/api/cart", None).await;
    assert_eq!(client.state.sessions.len().await, 0);

    client.add(4).await;
    assert_eq!(client.state.sessions.len().await, 1);
}

#[tokio::test]
async fn checkout_with_empty_cart_redirects_to_cart() {
    let client = Client::new(Arc::new(InMemoryRepository::new()));

    let (status, body) = client.get("/api/checkout").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["data"]["redirect"], "/cart");

    let (_, body) = client.get("/api/navigation?path=/checkout").await;
    assert_eq!(body["data"]["decision"]["action"], "redirect");
    assert_eq!(body["data"]["decision"]["to"], "/cart");
}

#[tokio::test]
async fn anonymous_checkout_redirects_to_login() {
    let repo = Arc::new(InMemoryRepository::new());
    let client = Client::new(repo.clone());
    client.add(1).await;

    let (status, body) = client
        .send(Method::POST, "/api/checkout", Some(checkout_body()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["data"]["redirect"], "/auth");
    assert!(repo.orders().await.is_empty());
}

#[tokio::test]
async fn validation_errors_are_reported_per_field() {
    let repo = Arc::new(InMemoryRepository::new());
    let mut client = Client::new(repo.clone());
    client.sign_in(&common::shopper());
    client.add(1).await;

    let mut body = checkout_body();
    body["phone"] = json!("abc");
    body["city"] = json!("");
    let (status, body) = client.send(Method::POST, "/api/checkout", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["data"]["fields"]["phone"],
        "Phone number must be at least 10 digits"
    );
    assert_eq!(body["data"]["fields"]["city"], "City must be at least 2 characters");
    assert!(repo.orders().await.is_empty());
}

#[tokio::test]
async fn signed_in_shopper_places_order_and_sees_it() {
    let repo = Arc::new(InMemoryRepository::new());
    let mut client = Client::new(repo.clone());
    let user = common::shopper();
    client.sign_in(&user);

    client.add(10).await;
    client
        .send(Method::PATCH, "/api/cart/10", Some(json!({ "quantity": 2 })))
        .await;
    client.add(9).await;
    client.add(6).await;

    let (status, body) = client.get("/api/checkout").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 500.0);
    assert_eq!(body["data"]["pay_label"], "Pay Now - ₹500");

    let (status, body) = client
        .send(Method::POST, "/api/checkout", Some(checkout_body()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["order"]["total_amount"], 500.0);
    assert_eq!(body["data"]["order"]["status"], "pending");
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);

    let (_, body) = client.get("/api/cart/count").await;
    assert_eq!(body["data"]["count"], 0);

    let (status, body) = client.get("/api/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total"], 1);

    let (_, body) = client.get("/api/checkout/prefill").await;
    assert_eq!(body["data"]["phone"], "9876543210");
    assert_eq!(body["data"]["address"], "12 Lake View Road, Pune - 411001");
}

#[tokio::test]
async fn profile_route_is_guarded() {
    let mut client = Client::new(Arc::new(InMemoryRepository::new()));

    let (_, body) = client.get("/api/navigation?path=/profile").await;
    assert_eq!(body["data"]["decision"]["to"], "/auth");
    assert_eq!(body["data"]["decision"]["replace"], true);

    let (status, _) = client.get("/api/profile").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    client.sign_in(&common::shopper());
    let (status, _) = client.get("/api/profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = client
        .send(
            Method::PUT,
            "/api/profile",
            Some(json!({ "full_name": "Asha Verma", "phone": "", "delivery_address": "Pune" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "asha@example.in");
    assert_eq!(body["data"]["phone"], Value::Null);

    let (_, body) = client.get("/api/navigation?path=/profile").await;
    assert_eq!(body["data"]["decision"]["action"], "render");
}
