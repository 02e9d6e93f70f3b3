use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

pub const CART_SESSION_HEADER: &str = "x-cart-session";

/// Browsing-session id the client sends with every cart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartSessionId(pub Uuid);

fn parse_header(parts: &Parts) -> Result<Option<CartSessionId>, AppError> {
    let Some(raw) = parts.headers.get(CART_SESSION_HEADER) else {
        return Ok(None);
    };
    let raw = raw
        .to_str()
        .map_err(|_| AppError::BadRequest(format!("Invalid {CART_SESSION_HEADER} header")))?;

    Uuid::parse_str(raw.trim())
        .map(|id| Some(CartSessionId(id)))
        .map_err(|_| AppError::BadRequest(format!("{CART_SESSION_HEADER} must be a UUID")))
}

impl<S> FromRequestParts<S> for CartSessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_header(parts)?
            .ok_or_else(|| AppError::BadRequest(format!("Missing {CART_SESSION_HEADER} header")))
    }
}

impl<S> OptionalFromRequestParts<S> for CartSessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        parse_header(parts)
    }
}
