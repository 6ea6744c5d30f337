use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest};
use crate::modules::categories::model::{
    Category, CreateCategoryDto, PaginatedCategoriesResponse,
};
use crate::modules::chapters::model::{Chapter, ChapterVisit, CreateChapterDto};
use crate::modules::course_modules::model::{CreateModuleDto, Module};
use crate::modules::courses::model::{Course, CreateCourseDto};
use crate::modules::enrollments::model::{EnrollDto, Enrollment};
use crate::modules::lessons::model::{AttachVideoDto, CreateLessonDto, Lesson, LessonVideo};
use crate::modules::study::model::{CourseChapters, LessonNavigation};
use crate::modules::users::model::{Role, User};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_profile,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::get_category_by_id,
        crate::modules::categories::controller::delete_category,
        crate::modules::course_modules::controller::create_module,
        crate::modules::course_modules::controller::get_modules,
        crate::modules::course_modules::controller::get_module_by_id,
        crate::modules::course_modules::controller::delete_module,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_my_courses,
        crate::modules::courses::controller::get_course_by_id,
        crate::modules::courses::controller::publish_course,
        crate::modules::courses::controller::unpublish_course,
        crate::modules::courses::controller::get_course_enrollments,
        crate::modules::courses::controller::delete_course,
        crate::modules::chapters::controller::create_chapter,
        crate::modules::chapters::controller::get_chapters,
        crate::modules::chapters::controller::visit_chapter,
        crate::modules::chapters::controller::delete_chapter,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::get_lessons,
        crate::modules::lessons::controller::attach_video,
        crate::modules::lessons::controller::get_lesson_videos,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::enrollments::controller::enroll,
        crate::modules::enrollments::controller::get_my_enrollments,
        crate::modules::study::controller::get_course_chapters,
        crate::modules::study::controller::get_lesson,
    ),
    components(
        schemas(
            User,
            Role,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            Category,
            CreateCategoryDto,
            PaginatedCategoriesResponse,
            Module,
            CreateModuleDto,
            Course,
            CreateCourseDto,
            Chapter,
            CreateChapterDto,
            ChapterVisit,
            Lesson,
            CreateLessonDto,
            LessonVideo,
            AttachVideoDto,
            Enrollment,
            EnrollDto,
            CourseChapters,
            LessonNavigation,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account registration and login"),
        (name = "Users", description = "User profile"),
        (name = "Categories", description = "Catalog categories"),
        (name = "Modules", description = "Catalog modules within categories"),
        (name = "Courses", description = "Courses, publication and ownership"),
        (name = "Chapters", description = "Course chapters and chapter visits"),
        (name = "Lessons", description = "Lessons and video attachments"),
        (name = "Enrollments", description = "Student enrollment ledger"),
        (name = "Study", description = "Slug-path resolution and lesson navigation"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
