use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Machine-readable failure classification returned alongside the message.
///
/// Write-path constraint violations (`Duplicate*`, `AlreadyEnrolled`) are
/// detected before anything is persisted; the store is unchanged when one of
/// these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DuplicateName,
    DuplicateTitle,
    DuplicateOrder,
    DuplicateSlug,
    NotFound,
    Unpublished,
    RoleViolation,
    AlreadyEnrolled,
    UnsupportedFormat,
    Validation,
    Unauthorized,
    Forbidden,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateName => "duplicate_name",
            Self::DuplicateTitle => "duplicate_title",
            Self::DuplicateOrder => "duplicate_order",
            Self::DuplicateSlug => "duplicate_slug",
            Self::NotFound => "not_found",
            Self::Unpublished => "unpublished",
            Self::RoleViolation => "role_violation",
            Self::AlreadyEnrolled => "already_enrolled",
            Self::UnsupportedFormat => "unsupported_format",
            Self::Validation => "validation",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            kind,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Internal, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, ErrorKind::NotFound, err)
    }

    /// The course exists but is gated from public resolution. Reported with
    /// the same status as a missing entity so unpublished content is not
    /// discoverable, with a distinct code for the caller.
    pub fn unpublished<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, ErrorKind::Unpublished, err)
    }

    pub fn duplicate_name<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, ErrorKind::DuplicateName, err)
    }

    pub fn duplicate_title<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, ErrorKind::DuplicateTitle, err)
    }

    pub fn duplicate_order<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, ErrorKind::DuplicateOrder, err)
    }

    pub fn duplicate_slug<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, ErrorKind::DuplicateSlug, err)
    }

    pub fn already_enrolled<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, ErrorKind::AlreadyEnrolled, err)
    }

    pub fn role_violation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, ErrorKind::RoleViolation, err)
    }

    pub fn unsupported_format<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::UnsupportedFormat,
            err,
        )
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, ErrorKind::Validation, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, ErrorKind::Validation, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, ErrorKind::Unauthorized, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, ErrorKind::Forbidden, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string(),
            "code": self.kind.as_str(),
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
