use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::enrollments::model::Enrollment;
use crate::modules::users::model::Role;
use crate::utils::errors::AppError;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Checks that the enrolling user exists, is a student and the course
    /// exists. Shared by the strict and idempotent variants.
    async fn check_eligibility(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        let role = sqlx::query_scalar::<_, Role>("SELECT role FROM users WHERE id = $1")
            .bind(student_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if !role.is_student() {
            return Err(AppError::role_violation(anyhow::anyhow!(
                "Only students can enroll in courses"
            )));
        }

        let course_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(course_id)
                .fetch_one(db)
                .await?;

        if !course_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        Ok(())
    }

    /// Strict enrollment: fails with `AlreadyEnrolled` when the pair exists.
    #[instrument]
    pub async fn enroll(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Enrollment, AppError> {
        Self::check_eligibility(db, student_id, course_id).await?;

        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"INSERT INTO enrollments (student_id, course_id)
               VALUES ($1, $2)
               RETURNING id, student_id, course_id, created_at"#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::already_enrolled(anyhow::anyhow!(
                    "Student is already enrolled in this course"
                ));
            }
            AppError::from(e)
        })?;

        Ok(enrollment)
    }

    /// Idempotent variant used by viewing flows that auto-enroll on first
    /// chapter visit. Returns the record and whether it was created now.
    #[instrument]
    pub async fn get_or_create(
        db: &PgPool,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<(Enrollment, bool), AppError> {
        Self::check_eligibility(db, student_id, course_id).await?;

        // ON CONFLICT DO NOTHING returns no row when the pair already
        // exists; a concurrent writer wins the race and we read its row.
        let inserted = sqlx::query_as::<_, Enrollment>(
            r#"INSERT INTO enrollments (student_id, course_id)
               VALUES ($1, $2)
               ON CONFLICT (student_id, course_id) DO NOTHING
               RETURNING id, student_id, course_id, created_at"#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(db)
        .await?;

        if let Some(enrollment) = inserted {
            return Ok((enrollment, true));
        }

        let existing = sqlx::query_as::<_, Enrollment>(
            r#"SELECT id, student_id, course_id, created_at
               FROM enrollments
               WHERE student_id = $1 AND course_id = $2"#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(db)
        .await?;

        Ok((existing, false))
    }

    #[instrument]
    pub async fn list_for_student(
        db: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<Enrollment>, AppError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"SELECT id, student_id, course_id, created_at
               FROM enrollments
               WHERE student_id = $1
               ORDER BY created_at DESC"#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(enrollments)
    }

    /// Enrollments of a course, newest first. Scoped to the owning teacher.
    #[instrument]
    pub async fn list_for_course(
        db: &PgPool,
        course_id: Uuid,
        teacher_id: Uuid,
    ) -> Result<Vec<Enrollment>, AppError> {
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

        let enrollments = sqlx::query_as::<_, Enrollment>(
            r#"SELECT id, student_id, course_id, created_at
               FROM enrollments
               WHERE course_id = $1
               ORDER BY created_at DESC"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(enrollments)
    }
}
