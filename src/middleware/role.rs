//! Role-based access control extractors.
//!
//! Catalog mutations are teacher-only and declare [`RequireTeacher`] in the
//! handler signature. Enrollment-facing routes only take [`AuthUser`]: the
//! ledger checks eligibility itself at write time, so the route layer does
//! not pre-filter by role there.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor that rejects the request unless the authenticated user is a
/// teacher. Wraps the underlying [`AuthUser`] for handlers that need the
/// caller's identity (e.g. course ownership).
#[derive(Debug, Clone)]
pub struct RequireTeacher(pub AuthUser);

impl FromRequestParts<AppState> for RequireTeacher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_teacher() {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Access denied. Requires the teacher role"
            )));
        }

        Ok(RequireTeacher(auth_user))
    }
}
