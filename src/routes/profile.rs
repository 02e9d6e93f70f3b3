use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::profile::SaveProfileRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Profile,
    response::ApiResponse,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(save_profile))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Saved profile", body = ApiResponse<Profile>),
        (status = 401, description = "Not signed in; redirect to /auth"),
        (status = 404, description = "No profile saved yet")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Profile>>> {
    let resp = profile_service::get_profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = SaveProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = ApiResponse<Profile>),
        (status = 401, description = "Not signed in; redirect to /auth"),
        (status = 422, description = "Per-field validation messages")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn save_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SaveProfileRequest>,
) -> AppResult<Json<ApiResponse<Profile>>> {
    let resp = profile_service::save_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}
