use uuid::Uuid;

use crate::{
    audit,
    cart::CartStore,
    checkout::summarize,
    dto::{
        checkout::{CheckoutRequest, CheckoutSummary},
        orders::{OrderList, OrderWithItems},
    },
    error::{AppError, AppResult},
    middleware::{auth::AuthUser, cart_session::CartSessionId},
    repository::OrderFilter,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

/// Checkout page data. An empty cart sends the shopper back to the cart.
pub async fn checkout_summary(
    state: &AppState,
    session: CartSessionId,
) -> AppResult<ApiResponse<CheckoutSummary>> {
    let handle = state.sessions.get(session).await.ok_or(AppError::EmptyCart)?;
    let shopper = handle.lock().await;
    if shopper.cart.is_empty() {
        return Err(AppError::EmptyCart);
    }
    let summary = summarize(&shopper.cart, state.checkout.delivery_fee());
    Ok(ApiResponse::success("Checkout", summary, Some(Meta::empty())))
}

pub async fn place_order(
    state: &AppState,
    session: CartSessionId,
    user: Option<AuthUser>,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let handle = state.sessions.get(session).await.ok_or(AppError::EmptyCart)?;
    let placed = state
        .checkout
        .submit(&handle, user.as_ref(), &payload)
        .await?;

    audit::record(
        &state.pool,
        Some(placed.order.user_id),
        "checkout",
        "orders",
        serde_json::json!({
            "order_id": placed.order.id,
            "total_amount": placed.order.total_amount,
            "items": placed.items.len(),
        }),
    )
    .await;

    Ok(ApiResponse::success(
        format!(
            "Order #{} has been received. We'll deliver your fresh dairy products soon!",
            placed.order.id
        ),
        OrderWithItems {
            order: placed.order,
            items: placed.items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            raw.parse()
                .map_err(|_| AppError::BadRequest("Invalid order status".into()))?,
        ),
        None => None,
    };
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let (items, total) = state
        .repo
        .list_orders(
            user.user_id,
            OrderFilter {
                status,
                newest_first: matches!(sort_order, SortOrder::Desc),
                limit: limit as u64,
                offset: offset as u64,
            },
        )
        .await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let (order, items) = state
        .repo
        .get_order(user.user_id, id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems { order, items },
        Some(Meta::empty()),
    ))
}
