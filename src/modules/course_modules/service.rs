use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::course_modules::model::{CreateModuleDto, Module};
use crate::utils::errors::AppError;
use crate::utils::slug::assign_slug;

pub struct ModuleService;

impl ModuleService {
    #[instrument]
    pub async fn create(db: &PgPool, dto: CreateModuleDto) -> Result<Module, AppError> {
        let category_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
        )
        .bind(dto.category_id)
        .fetch_one(db)
        .await?;

        if !category_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Category not found")));
        }

        let slug = assign_slug(None, &dto)
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Name produces an empty slug")))?;

        let module = sqlx::query_as::<_, Module>(
            r#"INSERT INTO modules (category_id, name, slug)
               VALUES ($1, $2, $3)
               RETURNING id, category_id, name, slug, created_at, updated_at"#,
        )
        .bind(dto.category_id)
        .bind(&dto.name)
        .bind(&slug)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return match db_err.constraint() {
                    Some("modules_slug_key") => AppError::duplicate_slug(anyhow::anyhow!(
                        "A module with this slug already exists"
                    )),
                    _ => AppError::duplicate_name(anyhow::anyhow!(
                        "A module with this name already exists in this category"
                    )),
                };
            }
            AppError::from(e)
        })?;

        Ok(module)
    }

    #[instrument]
    pub async fn list_by_category(db: &PgPool, category_id: Uuid) -> Result<Vec<Module>, AppError> {
        let category_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
        )
        .bind(category_id)
        .fetch_one(db)
        .await?;

        if !category_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Category not found")));
        }

        let modules = sqlx::query_as::<_, Module>(
            r#"SELECT id, category_id, name, slug, created_at, updated_at
               FROM modules
               WHERE category_id = $1
               ORDER BY name ASC"#,
        )
        .bind(category_id)
        .fetch_all(db)
        .await?;

        Ok(modules)
    }

    #[instrument]
    pub async fn get_by_id(db: &PgPool, module_id: Uuid) -> Result<Module, AppError> {
        let module = sqlx::query_as::<_, Module>(
            r#"SELECT id, category_id, name, slug, created_at, updated_at
               FROM modules WHERE id = $1"#,
        )
        .bind(module_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Module not found")))?;

        Ok(module)
    }

    /// Removes the module and every descendant in one transaction.
    #[instrument]
    pub async fn delete_cascade(db: &PgPool, module_id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query(
            r#"DELETE FROM lesson_videos WHERE lesson_id IN (
                   SELECT l.id FROM lessons l
                   JOIN chapters ch ON ch.id = l.chapter_id
                   JOIN courses c ON c.id = ch.course_id
                   WHERE c.module_id = $1)"#,
        )
        .bind(module_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"DELETE FROM lessons WHERE chapter_id IN (
                   SELECT ch.id FROM chapters ch
                   JOIN courses c ON c.id = ch.course_id
                   WHERE c.module_id = $1)"#,
        )
        .bind(module_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"DELETE FROM chapters WHERE course_id IN (
                   SELECT id FROM courses WHERE module_id = $1)"#,
        )
        .bind(module_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"DELETE FROM enrollments WHERE course_id IN (
                   SELECT id FROM courses WHERE module_id = $1)"#,
        )
        .bind(module_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM courses WHERE module_id = $1")
            .bind(module_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(module_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(anyhow::anyhow!("Module not found")));
        }

        tx.commit().await?;

        Ok(())
    }
}
