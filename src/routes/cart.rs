use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};

use crate::{
    dto::cart::{AddToCartRequest, CartCount, CartView, UpdateQuantityRequest},
    error::AppResult,
    middleware::cart_session::CartSessionId,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(view_cart).post(add_to_cart).delete(clear_cart),
        )
        .route("/count", get(item_count))
        .route(
            "/{product_id}",
            patch(update_quantity).delete(remove_from_cart),
        )
}

#[utoipa::path(
    get,
    path = "/api/cart",
    params(("x-cart-session" = String, Header, description = "Browsing session UUID")),
    responses(
        (status = 200, description = "Cart contents and total", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    session: CartSessionId,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::view_cart(&state, session).await)
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    params(("x-cart-session" = String, Header, description = "Browsing session UUID")),
    responses(
        (status = 200, description = "Product added, or its quantity bumped", body = ApiResponse<CartView>),
        (status = 400, description = "Unknown product")
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: CartSessionId,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::add_to_cart(&state, session, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/cart/{product_id}",
    request_body = UpdateQuantityRequest,
    params(
        ("product_id" = i32, Path, description = "Product id"),
        ("x-cart-session" = String, Header, description = "Browsing session UUID")
    ),
    responses(
        (status = 200, description = "Quantity set", body = ApiResponse<CartView>),
        (status = 400, description = "Quantity below 1"),
        (status = 404, description = "Product not in cart")
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    session: CartSessionId,
    Path(product_id): Path<i32>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::update_quantity(&state, session, product_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{product_id}",
    params(
        ("product_id" = i32, Path, description = "Product id"),
        ("x-cart-session" = String, Header, description = "Browsing session UUID")
    ),
    responses(
        (status = 200, description = "Entry removed", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    session: CartSessionId,
    Path(product_id): Path<i32>,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::remove_from_cart(&state, session, product_id).await)
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    params(("x-cart-session" = String, Header, description = "Browsing session UUID")),
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartView>)
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    session: CartSessionId,
) -> Json<ApiResponse<CartView>> {
    Json(cart_service::clear_cart(&state, session).await)
}

#[utoipa::path(
    get,
    path = "/api/cart/count",
    params(("x-cart-session" = String, Header, description = "Browsing session UUID")),
    responses(
        (status = 200, description = "Badge count: sum of quantities", body = ApiResponse<CartCount>)
    ),
    tag = "Cart"
)]
pub async fn item_count(
    State(state): State<AppState>,
    session: CartSessionId,
) -> Json<ApiResponse<CartCount>> {
    Json(cart_service::item_count(&state, session).await)
}
