//! Database seeder for demo and development environments.
//!
//! Builds a small but complete catalog tree (categories > modules > courses >
//! chapters > lessons), a teaching staff, a student body and a first wave of
//! enrollments. Content names come from `fake`; every run carries a random
//! tag in its names so repeated seeding never trips the global slug
//! constraints.

use bcrypt::hash;
use fake::Fake;
use fake::faker::company::en::{Buzzword, CatchPhrase};
use fake::faker::lorem::en::{Paragraph, Sentence};
use rand::Rng;
use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

use crate::modules::categories::model::CreateCategoryDto;
use crate::modules::categories::service::CategoryService;
use crate::modules::chapters::model::CreateChapterDto;
use crate::modules::chapters::service::ChapterService;
use crate::modules::course_modules::model::CreateModuleDto;
use crate::modules::course_modules::service::ModuleService;
use crate::modules::courses::model::CreateCourseDto;
use crate::modules::courses::service::CourseService;
use crate::modules::enrollments::service::EnrollmentService;
use crate::modules::lessons::model::CreateLessonDto;
use crate::modules::lessons::service::LessonService;
use crate::modules::users::model::Role;
use crate::utils::errors::AppError;

/// Prefix shared by every seeded account so `clear_seed` can find them.
const SEED_USERNAME_PREFIX: &str = "seed-";

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub categories: usize,
    pub modules_per_category: usize,
    pub courses_per_module: usize,
    pub chapters_per_course: usize,
    pub lessons_per_chapter: usize,
    pub students: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            categories: 3,
            modules_per_category: 2,
            courses_per_module: 2,
            chapters_per_course: 3,
            lessons_per_chapter: 4,
            students: 10,
        }
    }
}

async fn seed_user(
    db: &PgPool,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<Uuid, AppError> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO users (username, password, role)
           VALUES ($1, $2, $3)
           RETURNING id"#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .fetch_one(db)
    .await?;

    Ok(id)
}

pub async fn seed_database(db: &PgPool, config: SeedConfig) -> Result<(), AppError> {
    let start_time = Instant::now();
    let mut rng = rand::thread_rng();
    let run_tag: u32 = rng.gen_range(1000..10000);

    println!("🌱 Starting database seeding (run tag {run_tag})...");
    println!(
        "   - {} categories, {} modules each, {} courses each",
        config.categories, config.modules_per_category, config.courses_per_module
    );
    println!(
        "   - {} chapters per course, {} lessons per chapter, {} students",
        config.chapters_per_course, config.lessons_per_chapter, config.students
    );

    // Low-cost hash reused for all seeded accounts; these are demo logins.
    let password_hash = hash("password123", 4)?;

    let teacher_id = seed_user(
        db,
        &format!("{SEED_USERNAME_PREFIX}teacher-{run_tag}"),
        &password_hash,
        Role::Teacher,
    )
    .await?;

    let mut student_ids = Vec::with_capacity(config.students);
    for i in 0..config.students {
        let id = seed_user(
            db,
            &format!("{SEED_USERNAME_PREFIX}student-{run_tag}-{i}"),
            &password_hash,
            Role::Student,
        )
        .await?;
        student_ids.push(id);
    }

    let mut course_ids = Vec::new();

    for c in 0..config.categories {
        let category = CategoryService::create(
            db,
            CreateCategoryDto {
                name: format!("{} {} {}", Buzzword().fake::<String>(), run_tag, c),
            },
        )
        .await?;

        for m in 0..config.modules_per_category {
            let module = ModuleService::create(
                db,
                CreateModuleDto {
                    category_id: category.id,
                    name: format!("{} {} {}", Buzzword().fake::<String>(), run_tag, m),
                },
            )
            .await?;

            for k in 0..config.courses_per_module {
                let course = CourseService::create(
                    db,
                    teacher_id,
                    CreateCourseDto {
                        module_id: module.id,
                        title: format!("{} {} {}", CatchPhrase().fake::<String>(), run_tag, k),
                        description: Paragraph(1..3).fake::<String>(),
                    },
                )
                .await?;

                for ch in 0..config.chapters_per_course {
                    let chapter = ChapterService::create(
                        db,
                        teacher_id,
                        CreateChapterDto {
                            course_id: course.id,
                            name: format!("Chapter {}: {}", ch + 1, Buzzword().fake::<String>()),
                            description: Sentence(4..10).fake::<String>(),
                            order: (ch + 1) as i32,
                        },
                    )
                    .await?;

                    for l in 0..config.lessons_per_chapter {
                        LessonService::create(
                            db,
                            teacher_id,
                            CreateLessonDto {
                                chapter_id: chapter.id,
                                title: format!(
                                    "Lesson {}: {}",
                                    l + 1,
                                    Buzzword().fake::<String>()
                                ),
                                content: Paragraph(2..5).fake::<String>(),
                                order: (l + 1) as i32,
                            },
                        )
                        .await?;
                    }
                }

                // Publish most courses so the study routes have content.
                if rng.gen_range(0..10) < 8 {
                    CourseService::publish(db, course.id, teacher_id).await?;
                    course_ids.push(course.id);
                }
            }
        }
    }

    let mut enrollments = 0;
    for student_id in &student_ids {
        for course_id in &course_ids {
            if rng.gen_range(0..10) < 3 {
                EnrollmentService::enroll(db, *student_id, *course_id).await?;
                enrollments += 1;
            }
        }
    }

    println!(
        "✅ Seeding complete in {:.2}s ({} published courses, {} enrollments)",
        start_time.elapsed().as_secs_f64(),
        course_ids.len(),
        enrollments
    );

    Ok(())
}

/// Removes every seeded account and all catalog content. Non-seeded user
/// accounts are kept.
pub async fn clear_seeded_data(db: &PgPool) -> Result<(), AppError> {
    println!("🧹 Clearing seeded data...");

    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM lesson_videos").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM lessons").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM chapters").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM enrollments").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM courses").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM modules").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM categories").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM users WHERE username LIKE $1")
        .bind(format!("{SEED_USERNAME_PREFIX}%"))
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    println!("✅ Seeded data cleared");

    Ok(())
}
