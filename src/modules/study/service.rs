//! Navigation resolver: maps a full slug path onto the lesson it addresses
//! and computes the surrounding navigation context.
//!
//! The resolver is strictly read-only. Enrollment side effects of a page
//! visit belong to the visit-chapter operation in the chapters module.

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::chapters::model::Chapter;
use crate::modules::courses::model::Course;
use crate::modules::lessons::model::Lesson;
use crate::modules::study::model::{CourseChapters, LessonNavigation};
use crate::utils::errors::AppError;

pub struct StudyService;

impl StudyService {
    /// Walks category -> module -> course by slug, requiring every link in
    /// the chain to match. Unpublished courses are invisible here no matter
    /// how correct the slugs are.
    async fn resolve_published_course(
        db: &PgPool,
        category_slug: &str,
        module_slug: &str,
        course_slug: &str,
    ) -> Result<Course, AppError> {
        let category_id =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM categories WHERE slug = $1")
                .bind(category_slug)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Category not found")))?;

        let module_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM modules WHERE slug = $1 AND category_id = $2",
        )
        .bind(module_slug)
        .bind(category_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Module not found")))?;

        let course = sqlx::query_as::<_, Course>(
            r#"SELECT id, module_id, teacher_id, title, description, is_published, slug,
                      created_at, updated_at
               FROM courses
               WHERE slug = $1 AND module_id = $2"#,
        )
        .bind(course_slug)
        .bind(module_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        if !course.is_published {
            return Err(AppError::unpublished(anyhow::anyhow!(
                "Course is not published"
            )));
        }

        Ok(course)
    }

    /// Chapters of a published course, ascending by order.
    #[instrument]
    pub async fn list_chapters(
        db: &PgPool,
        category_slug: &str,
        module_slug: &str,
        course_slug: &str,
    ) -> Result<CourseChapters, AppError> {
        let course =
            Self::resolve_published_course(db, category_slug, module_slug, course_slug).await?;

        let chapters = sqlx::query_as::<_, Chapter>(
            r#"SELECT id, course_id, name, description, slug, "order", created_at, updated_at
               FROM chapters
               WHERE course_id = $1
               ORDER BY "order" ASC"#,
        )
        .bind(course.id)
        .fetch_all(db)
        .await?;

        Ok(CourseChapters { course, chapters })
    }

    /// Resolves the addressed lesson and computes previous/next navigation,
    /// including the cross-chapter rollover to the next chapter's first
    /// lesson. All comparisons use the `order` field; ties cannot occur
    /// because order is unique within a parent.
    #[instrument]
    pub async fn resolve_lesson(
        db: &PgPool,
        category_slug: &str,
        module_slug: &str,
        course_slug: &str,
        chapter_slug: &str,
        lesson_slug: &str,
    ) -> Result<LessonNavigation, AppError> {
        let course =
            Self::resolve_published_course(db, category_slug, module_slug, course_slug).await?;

        let chapter = sqlx::query_as::<_, Chapter>(
            r#"SELECT id, course_id, name, description, slug, "order", created_at, updated_at
               FROM chapters
               WHERE slug = $1 AND course_id = $2"#,
        )
        .bind(chapter_slug)
        .bind(course.id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Chapter not found")))?;

        let lesson = sqlx::query_as::<_, Lesson>(
            r#"SELECT id, chapter_id, title, content, slug, "order", created_at, updated_at
               FROM lessons
               WHERE slug = $1 AND chapter_id = $2"#,
        )
        .bind(lesson_slug)
        .bind(chapter.id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))?;

        let previous_lesson = sqlx::query_as::<_, Lesson>(
            r#"SELECT id, chapter_id, title, content, slug, "order", created_at, updated_at
               FROM lessons
               WHERE chapter_id = $1 AND "order" < $2
               ORDER BY "order" DESC
               LIMIT 1"#,
        )
        .bind(chapter.id)
        .bind(lesson.order)
        .fetch_optional(db)
        .await?;

        let next_lesson = sqlx::query_as::<_, Lesson>(
            r#"SELECT id, chapter_id, title, content, slug, "order", created_at, updated_at
               FROM lessons
               WHERE chapter_id = $1 AND "order" > $2
               ORDER BY "order" ASC
               LIMIT 1"#,
        )
        .bind(chapter.id)
        .bind(lesson.order)
        .fetch_optional(db)
        .await?;

        // Rollover: only when the chapter is exhausted.
        let next_chapter_first_lesson = if next_lesson.is_none() {
            let next_chapter_id = sqlx::query_scalar::<_, Uuid>(
                r#"SELECT id FROM chapters
                   WHERE course_id = $1 AND "order" > $2
                   ORDER BY "order" ASC
                   LIMIT 1"#,
            )
            .bind(course.id)
            .bind(chapter.order)
            .fetch_optional(db)
            .await?;

            match next_chapter_id {
                Some(next_chapter_id) => {
                    sqlx::query_as::<_, Lesson>(
                        r#"SELECT id, chapter_id, title, content, slug, "order",
                                  created_at, updated_at
                           FROM lessons
                           WHERE chapter_id = $1
                           ORDER BY "order" ASC
                           LIMIT 1"#,
                    )
                    .bind(next_chapter_id)
                    .fetch_optional(db)
                    .await?
                }
                None => None,
            }
        } else {
            None
        };

        let all_lessons = sqlx::query_as::<_, Lesson>(
            r#"SELECT id, chapter_id, title, content, slug, "order", created_at, updated_at
               FROM lessons
               WHERE chapter_id = $1
               ORDER BY "order" ASC"#,
        )
        .bind(chapter.id)
        .fetch_all(db)
        .await?;

        Ok(LessonNavigation {
            lesson,
            chapter,
            course,
            all_lessons,
            previous_lesson,
            next_lesson,
            next_chapter_first_lesson,
        })
    }
}
