use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::chapters::model::{Chapter, ChapterVisit, CreateChapterDto};
use crate::modules::enrollments::service::EnrollmentService;
use crate::modules::lessons::model::Lesson;
use crate::utils::errors::AppError;
use crate::utils::slug::assign_slug;

const CHAPTER_COLUMNS: &str =
    r#"id, course_id, name, description, slug, "order", created_at, updated_at"#;

pub struct ChapterService;

impl ChapterService {
    #[instrument]
    pub async fn create(
        db: &PgPool,
        teacher_id: Uuid,
        dto: CreateChapterDto,
    ) -> Result<Chapter, AppError> {
        let course_owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1 AND teacher_id = $2)",
        )
        .bind(dto.course_id)
        .bind(teacher_id)
        .fetch_one(db)
        .await?;

        if !course_owned {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        let slug = assign_slug(None, &dto)
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Name produces an empty slug")))?;

        let chapter = sqlx::query_as::<_, Chapter>(&format!(
            r#"INSERT INTO chapters (course_id, name, description, slug, "order")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {CHAPTER_COLUMNS}"#
        ))
        .bind(dto.course_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&slug)
        .bind(dto.order)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return match db_err.constraint() {
                    Some("chapters_course_id_order_key") => AppError::duplicate_order(
                        anyhow::anyhow!("A chapter with this order already exists in this course"),
                    ),
                    Some("chapters_course_id_slug_key") => AppError::duplicate_slug(
                        anyhow::anyhow!("A chapter with this slug already exists in this course"),
                    ),
                    _ => AppError::duplicate_name(anyhow::anyhow!(
                        "A chapter with this name already exists in this course"
                    )),
                };
            }
            AppError::from(e)
        })?;

        Ok(chapter)
    }

    /// Authoring view of a course's chapters, ascending by order. Scoped to
    /// the owning teacher; the public listing goes through the study module.
    #[instrument]
    pub async fn list_by_course(
        db: &PgPool,
        course_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<Vec<Chapter>, AppError> {
        let course_owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1 AND teacher_id = $2)",
        )
        .bind(course_id)
        .bind(teacher_id)
        .fetch_one(db)
        .await?;

        if !course_owned {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        let chapters = sqlx::query_as::<_, Chapter>(&format!(
            r#"SELECT {CHAPTER_COLUMNS}
               FROM chapters
               WHERE course_id = $1
               ORDER BY "order" ASC"#
        ))
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(chapters)
    }

    #[instrument]
    pub async fn get_by_id(db: &PgPool, chapter_id: Uuid) -> Result<Chapter, AppError> {
        let chapter = sqlx::query_as::<_, Chapter>(&format!(
            "SELECT {CHAPTER_COLUMNS} FROM chapters WHERE id = $1"
        ))
        .bind(chapter_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Chapter not found")))?;

        Ok(chapter)
    }

    /// Explicit "visit chapter" collaborator: records the visitor's intent by
    /// enrolling them in the chapter's course on first visit, then returns
    /// the chapter with its ordered lessons. The navigation resolver never
    /// does this; it stays read-only.
    #[instrument]
    pub async fn visit(
        db: &PgPool,
        user_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<ChapterVisit, AppError> {
        let chapter = Self::get_by_id(db, chapter_id).await?;

        let is_published = sqlx::query_scalar::<_, bool>(
            "SELECT is_published FROM courses WHERE id = $1",
        )
        .bind(chapter.course_id)
        .fetch_one(db)
        .await?;

        if !is_published {
            return Err(AppError::unpublished(anyhow::anyhow!(
                "Course is not published"
            )));
        }

        let (_, newly_enrolled) =
            EnrollmentService::get_or_create(db, user_id, chapter.course_id).await?;

        let lessons = sqlx::query_as::<_, Lesson>(
            r#"SELECT id, chapter_id, title, content, slug, "order", created_at, updated_at
               FROM lessons
               WHERE chapter_id = $1
               ORDER BY "order" ASC"#,
        )
        .bind(chapter_id)
        .fetch_all(db)
        .await?;

        Ok(ChapterVisit {
            chapter,
            lessons,
            newly_enrolled,
        })
    }

    /// Removes the chapter with its lessons and videos in one transaction.
    /// Scoped to the owning teacher.
    #[instrument]
    pub async fn delete_cascade(
        db: &PgPool,
        chapter_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query(
            r#"DELETE FROM lesson_videos WHERE lesson_id IN (
                   SELECT id FROM lessons WHERE chapter_id = $1)"#,
        )
        .bind(chapter_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM lessons WHERE chapter_id = $1")
            .bind(chapter_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            r#"DELETE FROM chapters
               WHERE id = $1
                 AND course_id IN (SELECT id FROM courses WHERE teacher_id = $2)"#,
        )
        .bind(chapter_id)
        .bind(teacher_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(anyhow::anyhow!("Chapter not found")));
        }

        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::model::RegisterRequest;
    use crate::modules::auth::service::AuthService;
    use crate::modules::categories::model::CreateCategoryDto;
    use crate::modules::categories::service::CategoryService;
    use crate::modules::course_modules::model::CreateModuleDto;
    use crate::modules::course_modules::service::ModuleService;
    use crate::modules::courses::model::CreateCourseDto;
    use crate::modules::courses::service::CourseService;
    use crate::modules::users::model::Role;
    use crate::utils::errors::ErrorKind;
    use axum::http::StatusCode;

    async fn register(pool: &PgPool, role: Role) -> Uuid {
        AuthService::register_user(
            pool,
            RegisterRequest {
                username: format!("user-{}", Uuid::new_v4()),
                password: "testpass123".to_string(),
                role,
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn create_course(pool: &PgPool, teacher_id: Uuid) -> Uuid {
        let category = CategoryService::create(
            pool,
            CreateCategoryDto {
                name: format!("Category {}", Uuid::new_v4()),
            },
        )
        .await
        .unwrap();

        let module = ModuleService::create(
            pool,
            CreateModuleDto {
                category_id: category.id,
                name: format!("Module {}", Uuid::new_v4()),
            },
        )
        .await
        .unwrap();

        CourseService::create(
            pool,
            teacher_id,
            CreateCourseDto {
                module_id: module.id,
                title: format!("Course {}", Uuid::new_v4()),
                description: "desc".to_string(),
            },
        )
        .await
        .unwrap()
        .id
    }

    fn chapter_dto(course_id: Uuid, name: &str, order: i32) -> CreateChapterDto {
        CreateChapterDto {
            course_id,
            name: name.to_string(),
            description: "Introduction aux bases".to_string(),
            order,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_chapter(pool: PgPool) {
        let teacher_id = register(&pool, Role::Teacher).await;
        let course_id = create_course(&pool, teacher_id).await;

        let chapter = ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Bases", 1))
            .await
            .unwrap();

        assert_eq!(chapter.course_id, course_id);
        assert_eq!(chapter.order, 1);
        assert_eq!(chapter.slug, "bases");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_chapter_duplicate_order(pool: PgPool) {
        let teacher_id = register(&pool, Role::Teacher).await;
        let course_id = create_course(&pool, teacher_id).await;

        ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Bases", 1))
            .await
            .unwrap();

        let result =
            ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Avancé", 1)).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.kind, ErrorKind::DuplicateOrder);

        // The failed insert left the chapter count unchanged.
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM chapters WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_chapter_duplicate_name(pool: PgPool) {
        let teacher_id = register(&pool, Role::Teacher).await;
        let course_id = create_course(&pool, teacher_id).await;

        ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Bases", 1))
            .await
            .unwrap();

        let result =
            ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Bases", 2)).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status, StatusCode::CONFLICT);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_orders_need_not_be_contiguous(pool: PgPool) {
        let teacher_id = register(&pool, Role::Teacher).await;
        let course_id = create_course(&pool, teacher_id).await;

        ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Premier", 1))
            .await
            .unwrap();
        ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Dixième", 10))
            .await
            .unwrap();

        let chapters = ChapterService::list_by_course(&pool, course_id, teacher_id)
            .await
            .unwrap();

        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].order, 1);
        assert_eq!(chapters[1].order, 10);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_chapter_not_owner(pool: PgPool) {
        let owner = register(&pool, Role::Teacher).await;
        let other = register(&pool, Role::Teacher).await;
        let course_id = create_course(&pool, owner).await;

        let result =
            ChapterService::create(&pool, other, chapter_dto(course_id, "Bases", 1)).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_visit_enrolls_student_once(pool: PgPool) {
        let teacher_id = register(&pool, Role::Teacher).await;
        let student_id = register(&pool, Role::Student).await;
        let course_id = create_course(&pool, teacher_id).await;
        CourseService::publish(&pool, course_id, teacher_id)
            .await
            .unwrap();

        let chapter = ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Bases", 1))
            .await
            .unwrap();

        let first = ChapterService::visit(&pool, student_id, chapter.id)
            .await
            .unwrap();
        assert!(first.newly_enrolled);

        let second = ChapterService::visit(&pool, student_id, chapter.id)
            .await
            .unwrap();
        assert!(!second.newly_enrolled);

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments WHERE student_id = $1 AND course_id = $2",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_visit_unpublished_course(pool: PgPool) {
        let teacher_id = register(&pool, Role::Teacher).await;
        let student_id = register(&pool, Role::Student).await;
        let course_id = create_course(&pool, teacher_id).await;

        let chapter = ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Bases", 1))
            .await
            .unwrap();

        let result = ChapterService::visit(&pool, student_id, chapter.id).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind, ErrorKind::Unpublished);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_visit_by_teacher_is_role_violation(pool: PgPool) {
        let teacher_id = register(&pool, Role::Teacher).await;
        let visitor_id = register(&pool, Role::Teacher).await;
        let course_id = create_course(&pool, teacher_id).await;
        CourseService::publish(&pool, course_id, teacher_id)
            .await
            .unwrap();

        let chapter = ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Bases", 1))
            .await
            .unwrap();

        let result = ChapterService::visit(&pool, visitor_id, chapter.id).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind, ErrorKind::RoleViolation);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_cascade_removes_lessons(pool: PgPool) {
        let teacher_id = register(&pool, Role::Teacher).await;
        let course_id = create_course(&pool, teacher_id).await;

        let chapter = ChapterService::create(&pool, teacher_id, chapter_dto(course_id, "Bases", 1))
            .await
            .unwrap();

        sqlx::query(
            r#"INSERT INTO lessons (chapter_id, title, content, slug, "order")
               VALUES ($1, 'Variables', 'stocker des données', 'variables', 1)"#,
        )
        .bind(chapter.id)
        .execute(&pool)
        .await
        .unwrap();

        ChapterService::delete_cascade(&pool, chapter.id, teacher_id)
            .await
            .unwrap();

        let lesson_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lessons WHERE chapter_id = $1")
                .bind(chapter.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(lesson_count, 0);

        let result = ChapterService::get_by_id(&pool, chapter.id).await;
        assert!(result.is_err());
    }
}
