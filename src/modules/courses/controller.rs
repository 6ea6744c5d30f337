use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::role::RequireTeacher;
use crate::modules::courses::model::{Course, CourseFilterParams, CreateCourseDto};
use crate::modules::courses::service::CourseService;
use crate::modules::enrollments::model::Enrollment;
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created (unpublished)", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Module not found"),
        (status = 409, description = "Duplicate title or slug")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let teacher_id = auth_user.user_id()?;
    let course = CourseService::create(&state.db, teacher_id, dto).await?;

    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseFilterParams),
    responses(
        (status = 200, description = "Courses in the module, newest first", body = Vec<Course>),
        (status = 404, description = "Module not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(filters): Query<CourseFilterParams>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_by_module(&state.db, filters.module_id).await?;

    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/mine",
    responses(
        (status = 200, description = "Courses taught by the caller", body = Vec<Course>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_courses(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
) -> Result<Json<Vec<Course>>, AppError> {
    let teacher_id = auth_user.user_id()?;
    let courses = CourseService::list_by_teacher(&state.db, teacher_id).await?;

    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_by_id(&state.db, id).await?;

    Ok(Json(course))
}

#[utoipa::path(
    patch,
    path = "/api/courses/{id}/publish",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course published", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn publish_course(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let teacher_id = auth_user.user_id()?;
    let course = CourseService::publish(&state.db, id, teacher_id).await?;

    Ok(Json(course))
}

#[utoipa::path(
    patch,
    path = "/api/courses/{id}/unpublish",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course unpublished", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn unpublish_course(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let teacher_id = auth_user.user_id()?;
    let course = CourseService::unpublish(&state.db, id, teacher_id).await?;

    Ok(Json(course))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/enrollments",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Enrollments for the course, newest first", body = Vec<Enrollment>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course_enrollments(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    let teacher_id = auth_user.user_id()?;
    let enrollments = EnrollmentService::list_for_course(&state.db, id, teacher_id).await?;

    Ok(Json(enrollments))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course, chapters, lessons, videos and enrollments deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let teacher_id = auth_user.user_id()?;
    CourseService::delete_cascade(&state.db, id, teacher_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
