use crate::{
    cart::{Cart, CartStore},
    dto::cart::{AddToCartRequest, CartCount, CartView, UpdateQuantityRequest},
    error::{AppError, AppResult},
    middleware::cart_session::CartSessionId,
    models::NewCartItem,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Upper bound matching the `order_items.quantity` column.
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

/// Cart view of a session; an unknown session reads as an empty cart.
async fn current_view(state: &AppState, session: CartSessionId) -> CartView {
    match state.sessions.get(session).await {
        Some(handle) => CartView::from_store(&handle.lock().await.cart),
        None => CartView::from_store(&Cart::new()),
    }
}

pub async fn view_cart(state: &AppState, session: CartSessionId) -> ApiResponse<CartView> {
    let view = current_view(state, session).await;
    let message = if view.items.is_empty() {
        "Your cart is empty"
    } else {
        "OK"
    };
    ApiResponse::success(message, view, Some(Meta::empty()))
}

pub async fn add_to_cart(
    state: &AppState,
    session: CartSessionId,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let product = state
        .catalog
        .find(payload.product_id)
        .ok_or_else(|| AppError::BadRequest("product not found".to_string()))?;

    let handle = state.sessions.get_or_create(session).await;
    let mut shopper = handle.lock().await;
    shopper.cart.add_to_cart(NewCartItem::from(product));
    tracing::debug!(session = %session.0, product_id = product.id, "added to cart");

    Ok(ApiResponse::success(
        format!("{} added to cart", product.name),
        CartView::from_store(&shopper.cart),
        Some(Meta::empty()),
    ))
}

pub async fn update_quantity(
    state: &AppState,
    session: CartSessionId,
    product_id: i32,
    payload: UpdateQuantityRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }
    if payload.quantity > MAX_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must be at most {MAX_QUANTITY}"
        )));
    }

    let handle = state.sessions.get(session).await.ok_or(AppError::NotFound)?;
    let mut shopper = handle.lock().await;
    if !shopper.cart.items().iter().any(|item| item.id == product_id) {
        return Err(AppError::NotFound);
    }
    shopper.cart.update_quantity(product_id, payload.quantity);

    Ok(ApiResponse::success(
        "Quantity updated",
        CartView::from_store(&shopper.cart),
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_cart(
    state: &AppState,
    session: CartSessionId,
    product_id: i32,
) -> ApiResponse<CartView> {
    let Some(handle) = state.sessions.get(session).await else {
        return ApiResponse::success(
            "Item was not in your cart",
            CartView::from_store(&Cart::new()),
            Some(Meta::empty()),
        );
    };
    let mut shopper = handle.lock().await;
    let removed = shopper
        .cart
        .items()
        .iter()
        .find(|item| item.id == product_id)
        .map(|item| item.name.clone());
    shopper.cart.remove_from_cart(product_id);

    let message = match removed {
        Some(name) => format!("{name} has been removed from your cart"),
        None => "Item was not in your cart".to_string(),
    };
    ApiResponse::success(message, CartView::from_store(&shopper.cart), Some(Meta::empty()))
}

pub async fn clear_cart(state: &AppState, session: CartSessionId) -> ApiResponse<CartView> {
    if let Some(handle) = state.sessions.get(session).await {
        handle.lock().await.cart.clear();
    }
    ApiResponse::success("Cart cleared", CartView::from_store(&Cart::new()), Some(Meta::empty()))
}

pub async fn item_count(state: &AppState, session: CartSessionId) -> ApiResponse<CartCount> {
    let count = current_view(state, session).await.item_count;
    ApiResponse::success("OK", CartCount { count }, None)
}
