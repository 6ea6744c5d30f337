//! Middleware and extractors for cross-cutting request concerns.
//!
//! - [`auth`]: bearer-token authentication extractor
//! - [`role`]: role checking extractors (teacher-gated catalog writes)
//!
//! # Authentication flow
//!
//! 1. Client sends a request with an `Authorization: Bearer <token>` header
//! 2. [`auth::AuthUser`] validates the JWT and extracts claims
//! 3. [`role::RequireTeacher`] rejects callers without the teacher role
//! 4. The handler executes if all checks pass

pub mod auth;
pub mod role;
