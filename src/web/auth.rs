//! Identity resolution for authenticated routes.
//!
//! Handlers that take an [`AuthUser`] only run for requests carrying a valid
//! `Authorization: Bearer <token>` header; everything else gets a 401.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::Response;

use crate::error::CoreError;
use crate::users;
use crate::web::state::SharedState;
use crate::web::utils::error_response;

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| error_response(CoreError::Unauthenticated))?;

        let st = state.lock().await;
        match users::resolve_token(&st.storage, token) {
            Ok(Some(user_id)) => Ok(AuthUser { user_id }),
            Ok(None) => Err(error_response(CoreError::Unauthenticated)),
            Err(e) => Err(error_response(e)),
        }
    }
}
