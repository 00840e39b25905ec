//! Opaque-principal extractor for Axum handlers.
//!
//! Authentication and session management are external collaborators; by
//! the time a request reaches this service, the fronting auth layer has
//! already verified the user and forwards the opaque principal id as a
//! bearer token. This extractor only reads that id; it performs no
//! credential checks of its own.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use annotator_core::error::CoreError;
use annotator_core::types::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// The acting principal, extracted from the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that works with
/// owner-scoped data:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The principal's opaque id; stamped as `owner` on every write.
    pub id: UserId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <principal>".into(),
            ))
        })?;

        if token.is_empty() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Empty principal".into(),
            )));
        }

        Ok(AuthUser {
            id: token.to_string(),
        })
    }
}
