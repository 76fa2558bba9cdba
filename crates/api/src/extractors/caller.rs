//! Identifies the acting user.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! user id in `X-User-Id`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

pub const CALLER_HEADER: &str = "X-User-Id";

/// The user on whose behalf the request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::Unauthorized(format!("Missing {CALLER_HEADER} header")))?;

        let user_id = Uuid::parse_str(raw)
            .map_err(|_| ApiError::validation(format!("{CALLER_HEADER} must be a UUID")))?;

        Ok(Caller { user_id })
    }
}
