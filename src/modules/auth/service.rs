use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{Role, User};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequest};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(dto), fields(username = %dto.username))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (username, password, role)
               VALUES ($1, $2, $3)
               RETURNING id, username, role, created_at, updated_at"#,
        )
        .bind(&dto.username)
        .bind(&hashed_password)
        .bind(dto.role)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::duplicate_name(anyhow::anyhow!("Username is already taken"));
            }
            AppError::from(e)
        })?;

        Ok(user)
    }

    #[instrument(skip(dto, jwt_config), fields(username = %dto.username))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            username: String,
            password: String,
            role: Role,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        let row = sqlx::query_as::<_, UserWithPassword>(
            r#"SELECT id, username, password, role, created_at, updated_at
               FROM users WHERE username = $1"#,
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid username or password")))?;

        let is_valid = verify_password(&dto.password, &row.password)?;

        if !is_valid {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid username or password"
            )));
        }

        let access_token = create_access_token(row.id, &row.username, row.role, jwt_config)?;

        Ok(LoginResponse {
            access_token,
            user: User {
                id: row.id,
                username: row.username,
                role: row.role,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        })
    }
}
