use axum::extract::FromRequestParts;
use uuid::Uuid;

use crate::error::AppError;

pub const SESSION_HEADER: &str = "x-session-id";

/// Session id taken from the `x-session-id` header.
#[derive(Debug, Clone, Copy)]
pub struct CartSession(pub Uuid);

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or_else(|| AppError::BadRequest("Missing x-session-id header".into()))?;

        let id = value
            .to_str()
            .ok()
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .ok_or_else(|| AppError::BadRequest("Invalid x-session-id header".into()))?;

        Ok(CartSession(id))
    }
}
