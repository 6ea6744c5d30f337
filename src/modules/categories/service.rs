use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::categories::model::{
    Category, CategoryFilterParams, CreateCategoryDto, PaginatedCategoriesResponse,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;
use crate::utils::slug::assign_slug;

pub struct CategoryService;

impl CategoryService {
    #[instrument]
    pub async fn create(db: &PgPool, dto: CreateCategoryDto) -> Result<Category, AppError> {
        let slug = assign_slug(None, &dto)
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Name produces an empty slug")))?;

        let category = sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories (name, slug)
               VALUES ($1, $2)
               RETURNING id, name, slug, created_at, updated_at"#,
        )
        .bind(&dto.name)
        .bind(&slug)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return match db_err.constraint() {
                    Some("categories_slug_key") => AppError::duplicate_slug(anyhow::anyhow!(
                        "A category with this slug already exists"
                    )),
                    _ => AppError::duplicate_name(anyhow::anyhow!(
                        "A category with this name already exists"
                    )),
                };
            }
            AppError::from(e)
        })?;

        Ok(category)
    }

    #[instrument]
    pub async fn list(
        db: &PgPool,
        filters: CategoryFilterParams,
    ) -> Result<PaginatedCategoriesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let pattern = filters.name.as_ref().map(|name| format!("%{}%", name));

        let total = match &pattern {
            Some(pattern) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE name ILIKE $1")
                    .bind(pattern)
                    .fetch_one(db)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
                    .fetch_one(db)
                    .await?
            }
        };

        let categories = match &pattern {
            Some(pattern) => {
                sqlx::query_as::<_, Category>(
                    r#"SELECT id, name, slug, created_at, updated_at
                       FROM categories
                       WHERE name ILIKE $1
                       ORDER BY name ASC
                       LIMIT $2 OFFSET $3"#,
                )
                .bind(pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Category>(
                    r#"SELECT id, name, slug, created_at, updated_at
                       FROM categories
                       ORDER BY name ASC
                       LIMIT $1 OFFSET $2"#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?
            }
        };

        let has_more = offset + limit < total;

        Ok(PaginatedCategoriesResponse {
            data: categories,
            meta: PaginationMeta {
                total,
                limit,
                offset: Some(offset),
                has_more,
            },
        })
    }

    #[instrument]
    pub async fn get_by_id(db: &PgPool, category_id: Uuid) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(category_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Category not found")))?;

        Ok(category)
    }

    #[instrument]
    pub async fn get_by_slug(db: &PgPool, slug: &str) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug, created_at, updated_at FROM categories WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Category not found")))?;

        Ok(category)
    }

    /// Removes the category and every descendant (modules, courses, chapters,
    /// lessons, videos, enrollments) in one transaction, child-first.
    #[instrument]
    pub async fn delete_cascade(db: &PgPool, category_id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query(
            r#"DELETE FROM lesson_videos WHERE lesson_id IN (
                   SELECT l.id FROM lessons l
                   JOIN chapters ch ON ch.id = l.chapter_id
                   JOIN courses c ON c.id = ch.course_id
                   JOIN modules m ON m.id = c.module_id
                   WHERE m.category_id = $1)"#,
        )
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"DELETE FROM lessons WHERE chapter_id IN (
                   SELECT ch.id FROM chapters ch
                   JOIN courses c ON c.id = ch.course_id
                   JOIN modules m ON m.id = c.module_id
                   WHERE m.category_id = $1)"#,
        )
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"DELETE FROM chapters WHERE course_id IN (
                   SELECT c.id FROM courses c
                   JOIN modules m ON m.id = c.module_id
                   WHERE m.category_id = $1)"#,
        )
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"DELETE FROM enrollments WHERE course_id IN (
                   SELECT c.id FROM courses c
                   JOIN modules m ON m.id = c.module_id
                   WHERE m.category_id = $1)"#,
        )
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"DELETE FROM courses WHERE module_id IN (
                   SELECT id FROM modules WHERE category_id = $1)"#,
        )
        .bind(category_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM modules WHERE category_id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(anyhow::anyhow!("Category not found")));
        }

        tx.commit().await?;

        Ok(())
    }
}
