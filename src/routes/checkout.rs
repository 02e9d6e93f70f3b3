use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        checkout::{CheckoutPrefill, CheckoutRequest, CheckoutSummary},
        orders::OrderWithItems,
    },
    error::AppResult,
    middleware::{auth::AuthUser, cart_session::CartSessionId},
    response::ApiResponse,
    services::{order_service, profile_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout_summary).post(place_order))
        .route("/prefill", get(checkout_prefill))
}

#[utoipa::path(
    get,
    path = "/api/checkout",
    params(("x-cart-session" = String, Header, description = "Browsing session UUID")),
    responses(
        (status = 200, description = "Subtotal, delivery fee and total", body = ApiResponse<CheckoutSummary>),
        (status = 409, description = "Cart is empty; redirect to /cart")
    ),
    tag = "Checkout"
)]
pub async fn checkout_summary(
    State(state): State<AppState>,
    session: CartSessionId,
) -> AppResult<Json<ApiResponse<CheckoutSummary>>> {
    let resp = order_service::checkout_summary(&state, session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CheckoutRequest,
    params(("x-cart-session" = String, Header, description = "Browsing session UUID")),
    responses(
        (status = 201, description = "Order placed and cart cleared", body = ApiResponse<OrderWithItems>),
        (status = 401, description = "Sign in required; redirect to /auth"),
        (status = 409, description = "Cart is empty or a submission is already running"),
        (status = 422, description = "Per-field validation messages"),
        (status = 502, description = "Order could not be stored; cart kept")
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn place_order(
    State(state): State<AppState>,
    session: CartSessionId,
    user: Option<AuthUser>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderWithItems>>)> {
    let resp = order_service::place_order(&state, session, user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/checkout/prefill",
    responses(
        (status = 200, description = "Saved profile values for the checkout form", body = ApiResponse<CheckoutPrefill>),
        (status = 401, description = "Not signed in")
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn checkout_prefill(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CheckoutPrefill>>> {
    let resp = profile_service::checkout_prefill(&state, &user).await?;
    Ok(Json(resp))
}
