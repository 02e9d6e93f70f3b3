use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::navigation::NavigationView,
    error::AppResult,
    middleware::{auth::AuthUser, cart_session::CartSessionId},
    response::ApiResponse,
    routes::params::NavigationQuery,
    services::navigation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(resolve))
}

#[utoipa::path(
    get,
    path = "/api/navigation",
    params(
        ("path" = String, Query, description = "Storefront path, e.g. /checkout"),
        ("x-cart-session" = Option<String>, Header, description = "Browsing session UUID")
    ),
    responses(
        (status = 200, description = "Render, redirect or keep loading", body = ApiResponse<NavigationView>),
        (status = 404, description = "Unknown storefront path")
    ),
    tag = "Navigation"
)]
pub async fn resolve(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    session: Option<CartSessionId>,
    Query(query): Query<NavigationQuery>,
) -> AppResult<Json<ApiResponse<NavigationView>>> {
    let resp = navigation_service::resolve_path(&state, &query.path, user, session).await?;
    Ok(Json(resp))
}
