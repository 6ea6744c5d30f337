use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::model::{Course, CreateCourseDto};
use crate::utils::errors::AppError;
use crate::utils::slug::assign_slug;

const COURSE_COLUMNS: &str =
    "id, module_id, teacher_id, title, description, is_published, slug, created_at, updated_at";

pub struct CourseService;

impl CourseService {
    /// Creates an unpublished course owned by `teacher_id`.
    #[instrument]
    pub async fn create(
        db: &PgPool,
        teacher_id: Uuid,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let module_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM modules WHERE id = $1)")
                .bind(dto.module_id)
                .fetch_one(db)
                .await?;

        if !module_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Module not found")));
        }

        let slug = assign_slug(None, &dto).ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("Title produces an empty slug"))
        })?;

        let course = sqlx::query_as::<_, Course>(&format!(
            r#"INSERT INTO courses (module_id, teacher_id, title, description, slug)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(dto.module_id)
        .bind(teacher_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&slug)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return match db_err.constraint() {
                    Some("courses_slug_key") => AppError::duplicate_slug(anyhow::anyhow!(
                        "A course with this slug already exists"
                    )),
                    _ => AppError::duplicate_title(anyhow::anyhow!(
                        "You already teach a course with this title"
                    )),
                };
            }
            AppError::from(e)
        })?;

        Ok(course)
    }

    /// Idempotent publish flip; no side effect on children.
    #[instrument]
    pub async fn publish(db: &PgPool, course_id: Uuid, teacher_id: Uuid) -> Result<Course, AppError> {
        Self::set_published(db, course_id, teacher_id, true).await
    }

    /// Idempotent unpublish flip; no side effect on children.
    #[instrument]
    pub async fn unpublish(
        db: &PgPool,
        course_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<Course, AppError> {
        Self::set_published(db, course_id, teacher_id, false).await
    }

    async fn set_published(
        db: &PgPool,
        course_id: Uuid,
        teacher_id: Uuid,
        published: bool,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            r#"UPDATE courses
               SET is_published = $1, updated_at = NOW()
               WHERE id = $2 AND teacher_id = $3
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(published)
        .bind(course_id)
        .bind(teacher_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        Ok(course)
    }

    #[instrument]
    pub async fn list_by_module(db: &PgPool, module_id: Uuid) -> Result<Vec<Course>, AppError> {
        let module_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM modules WHERE id = $1)")
                .bind(module_id)
                .fetch_one(db)
                .await?;

        if !module_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Module not found")));
        }

        let courses = sqlx::query_as::<_, Course>(&format!(
            r#"SELECT {COURSE_COLUMNS}
               FROM courses
               WHERE module_id = $1
               ORDER BY created_at DESC"#
        ))
        .bind(module_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    /// Courses taught by the calling teacher, newest first.
    #[instrument]
    pub async fn list_by_teacher(db: &PgPool, teacher_id: Uuid) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            r#"SELECT {COURSE_COLUMNS}
               FROM courses
               WHERE teacher_id = $1
               ORDER BY created_at DESC"#
        ))
        .bind(teacher_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument]
    pub async fn get_by_id(db: &PgPool, course_id: Uuid) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        Ok(course)
    }

    /// Removes the course with its chapters, lessons, videos and enrollments
    /// in one transaction. Scoped to the owning teacher.
    #[instrument]
    pub async fn delete_cascade(
        db: &PgPool,
        course_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query(
            r#"DELETE FROM lesson_videos WHERE lesson_id IN (
                   SELECT l.id FROM lessons l
                   JOIN chapters ch ON ch.id = l.chapter_id
                   WHERE ch.course_id = $1)"#,
        )
        .bind(course_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"DELETE FROM lessons WHERE chapter_id IN (
                   SELECT id FROM chapters WHERE course_id = $1)"#,
        )
        .bind(course_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM chapters WHERE course_id = $1")
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM enrollments WHERE course_id = $1")
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM courses WHERE id = $1 AND teacher_id = $2")
            .bind(course_id)
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        tx.commit().await?;

        Ok(())
    }
}
