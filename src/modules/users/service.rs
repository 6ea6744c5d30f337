use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{Role, User};
use crate::utils::errors::AppError;

pub struct UserService;

impl UserService {
    #[instrument]
    pub async fn get_by_id(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, role, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    #[instrument]
    pub async fn get_by_username(db: &PgPool, username: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, role, created_at, updated_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    /// Administrative role change. Not exposed over HTTP; the CLI `promote`
    /// command is the only caller.
    #[instrument]
    pub async fn change_role(db: &PgPool, username: &str, role: Role) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"UPDATE users
               SET role = $1, updated_at = NOW()
               WHERE username = $2
               RETURNING id, username, role, created_at, updated_at"#,
        )
        .bind(role)
        .bind(username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }
}
