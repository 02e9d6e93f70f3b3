use crate::{
    audit,
    dto::{
        checkout::CheckoutPrefill,
        profile::{SaveProfileRequest, non_blank},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Profile,
    repository::ProfileUpsert,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::PROFILE_SCHEMA,
};

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Profile>> {
    let profile = state
        .repo
        .fetch_profile(user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Profile", profile, Some(Meta::empty())))
}

pub async fn save_profile(
    state: &AppState,
    user: &AuthUser,
    payload: SaveProfileRequest,
) -> AppResult<ApiResponse<Profile>> {
    PROFILE_SCHEMA
        .validate(&payload)
        .map_err(AppError::Validation)?;

    let profile = state
        .repo
        .upsert_profile(ProfileUpsert {
            user_id: user.user_id,
            email: user.email.clone(),
            full_name: non_blank(payload.full_name.as_deref()).unwrap_or_default(),
            phone: non_blank(payload.phone.as_deref()),
            delivery_address: non_blank(payload.delivery_address.as_deref()),
        })
        .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "profile_save",
        "profiles",
        serde_json::json!({ "profile_id": profile.id }),
    )
    .await;

    Ok(ApiResponse::success("Profile saved", profile, Some(Meta::empty())))
}

/// Saved profile values, else what the identity knows about the shopper.
pub async fn checkout_prefill(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<CheckoutPrefill>> {
    let prefill = match state.repo.fetch_profile(user.user_id).await? {
        Some(profile) => CheckoutPrefill {
            name: profile.full_name,
            email: profile.email,
            phone: profile.phone.unwrap_or_default(),
            address: profile.delivery_address.unwrap_or_default(),
        },
        None => CheckoutPrefill {
            name: user.full_name.clone().unwrap_or_default(),
            email: user.email.clone(),
            ..CheckoutPrefill::default()
        },
    };
    Ok(ApiResponse::success("Prefill", prefill, None))
}
