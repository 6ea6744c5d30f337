use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::lessons::model::{
    ALLOWED_VIDEO_EXTENSIONS, AttachVideoDto, CreateLessonDto, Lesson, LessonVideo,
};
use crate::utils::errors::AppError;
use crate::utils::slug::assign_slug;

const LESSON_COLUMNS: &str =
    r#"id, chapter_id, title, content, slug, "order", created_at, updated_at"#;

/// Extension of the referenced file, lowercased. `None` when there is no
/// extension at all.
fn file_extension(path: &str) -> Option<String> {
    let file_name = path.rsplit(['/', '\\']).next()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub struct LessonService;

impl LessonService {
    #[instrument]
    pub async fn create(
        db: &PgPool,
        teacher_id: Uuid,
        dto: CreateLessonDto,
    ) -> Result<Lesson, AppError> {
        let chapter_owned = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM chapters ch
                   JOIN courses c ON c.id = ch.course_id
                   WHERE ch.id = $1 AND c.teacher_id = $2)"#,
        )
        .bind(dto.chapter_id)
        .bind(teacher_id)
        .fetch_one(db)
        .await?;

        if !chapter_owned {
            return Err(AppError::not_found(anyhow::anyhow!("Chapter not found")));
        }

        let slug = assign_slug(None, &dto).ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("Title produces an empty slug"))
        })?;

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            r#"INSERT INTO lessons (chapter_id, title, content, slug, "order")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {LESSON_COLUMNS}"#
        ))
        .bind(dto.chapter_id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&slug)
        .bind(dto.order)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return match db_err.constraint() {
                    Some("lessons_chapter_id_order_key") => AppError::duplicate_order(
                        anyhow::anyhow!("A lesson with this order already exists in this chapter"),
                    ),
                    Some("lessons_chapter_id_slug_key") => AppError::duplicate_slug(
                        anyhow::anyhow!("A lesson with this slug already exists in this chapter"),
                    ),
                    _ => AppError::duplicate_name(anyhow::anyhow!(
                        "A lesson with this title already exists in this chapter"
                    )),
                };
            }
            AppError::from(e)
        })?;

        Ok(lesson)
    }

    /// Records a video reference for the lesson. The catalog validates the
    /// container format and stores the reference; upload and streaming
    /// belong to the blob-store collaborator.
    #[instrument]
    pub async fn attach_video(
        db: &PgPool,
        teacher_id: Uuid,
        lesson_id: Uuid,
        dto: AttachVideoDto,
    ) -> Result<LessonVideo, AppError> {
        let lesson_owned = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM lessons l
                   JOIN chapters ch ON ch.id = l.chapter_id
                   JOIN courses c ON c.id = ch.course_id
                   WHERE l.id = $1 AND c.teacher_id = $2)"#,
        )
        .bind(lesson_id)
        .bind(teacher_id)
        .fetch_one(db)
        .await?;

        if !lesson_owned {
            return Err(AppError::not_found(anyhow::anyhow!("Lesson not found")));
        }

        match file_extension(&dto.video_file) {
            Some(ext) if ALLOWED_VIDEO_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => {
                return Err(AppError::unsupported_format(anyhow::anyhow!(
                    "Unsupported video format. Allowed formats: .{}",
                    ALLOWED_VIDEO_EXTENSIONS.join(", .")
                )));
            }
        }

        let video = sqlx::query_as::<_, LessonVideo>(
            r#"INSERT INTO lesson_videos (lesson_id, video_file, "order")
               VALUES ($1, $2, $3)
               RETURNING id, lesson_id, video_file, "order", created_at, updated_at"#,
        )
        .bind(lesson_id)
        .bind(&dto.video_file)
        .bind(dto.order)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::duplicate_order(anyhow::anyhow!(
                    "A video with this order already exists for this lesson"
                ));
            }
            AppError::from(e)
        })?;

        Ok(video)
    }

    #[instrument]
    pub async fn list_by_chapter(db: &PgPool, chapter_id: Uuid) -> Result<Vec<Lesson>, AppError> {
        let chapter_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM chapters WHERE id = $1)")
                .bind(chapter_id)
                .fetch_one(db)
                .await?;

        if !chapter_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Chapter not found")));
        }

        let lessons = sqlx::query_as::<_, Lesson>(&format!(
            r#"SELECT {LESSON_COLUMNS}
               FROM lessons
               WHERE chapter_id = $1
               ORDER BY "order" ASC"#
        ))
        .bind(chapter_id)
        .fetch_all(db)
        .await?;

        Ok(lessons)
    }

    #[instrument]
    pub async fn list_videos(db: &PgPool, lesson_id: Uuid) -> Result<Vec<LessonVideo>, AppError> {
        let lesson_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM lessons WHERE id = $1)")
                .bind(lesson_id)
                .fetch_one(db)
                .await?;

        if !lesson_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Lesson not found")));
        }

        let videos = sqlx::query_as::<_, LessonVideo>(
            r#"SELECT id, lesson_id, video_file, "order", created_at, updated_at
               FROM lesson_videos
               WHERE lesson_id = $1
               ORDER BY "order" ASC"#,
        )
        .bind(lesson_id)
        .fetch_all(db)
        .await?;

        Ok(videos)
    }

    /// Removes the lesson with its videos in one transaction. Scoped to the
    /// owning teacher.
    #[instrument]
    pub async fn delete_cascade(
        db: &PgPool,
        lesson_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM lesson_videos WHERE lesson_id = $1")
            .bind(lesson_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            r#"DELETE FROM lessons
               WHERE id = $1
                 AND chapter_id IN (
                     SELECT ch.id FROM chapters ch
                     JOIN courses c ON c.id = ch.course_id
                     WHERE c.teacher_id = $2)"#,
        )
        .bind(lesson_id)
        .bind(teacher_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(anyhow::anyhow!("Lesson not found")));
        }

        tx.commit().await?;

        Ok(())
    }
}
