//! Administrative CLI commands.
//!
//! Role assignment is administrative: teacher accounts are created (or
//! promoted) here, never through the public API.

pub mod seeder;

use sqlx::PgPool;

use crate::modules::auth::model::RegisterRequest;
use crate::modules::auth::service::AuthService;
use crate::modules::users::model::{Role, User};
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

/// Creates a teacher account.
pub async fn create_teacher(
    db: &PgPool,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    AuthService::register_user(
        db,
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: Role::Teacher,
        },
    )
    .await
}

/// Changes an existing user's role.
pub async fn promote(db: &PgPool, username: &str, role: Role) -> Result<User, AppError> {
    UserService::change_role(db, username, role).await
}
