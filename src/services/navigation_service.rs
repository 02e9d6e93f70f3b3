use crate::{
    auth_gate::{self, AuthStatus, SiteRoute},
    cart::CartStore,
    dto::navigation::NavigationView,
    error::{AppError, AppResult},
    middleware::{auth::AuthUser, cart_session::CartSessionId},
    response::ApiResponse,
    state::AppState,
};

/// What a client should do when the shopper opens `path`.
///
/// Without a session header the cart counts as empty.
pub async fn resolve_path(
    state: &AppState,
    path: &str,
    user: Option<AuthUser>,
    session: Option<CartSessionId>,
) -> AppResult<ApiResponse<NavigationView>> {
    let route = SiteRoute::from_path(path).ok_or(AppError::NotFound)?;

    let cart_is_empty = match session {
        Some(id) => match state.sessions.get(id).await {
            Some(handle) => handle.lock().await.cart.is_empty(),
            None => true,
        },
        None => true,
    };

    let decision = auth_gate::resolve(route, &AuthStatus::from(user), cart_is_empty);
    tracing::debug!(path, ?decision, "navigation resolved");

    Ok(ApiResponse::success(
        "OK",
        NavigationView { route, decision },
        None,
    ))
}
