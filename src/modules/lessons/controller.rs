use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::role::RequireTeacher;
use crate::modules::lessons::model::{
    AttachVideoDto, CreateLessonDto, Lesson, LessonFilterParams, LessonVideo,
};
use crate::modules::lessons::service::LessonService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = Lesson),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Chapter not found"),
        (status = 409, description = "Duplicate title, order or slug")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_lesson(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let teacher_id = auth_user.user_id()?;
    let lesson = LessonService::create(&state.db, teacher_id, dto).await?;

    Ok((StatusCode::CREATED, Json(lesson)))
}

#[utoipa::path(
    get,
    path = "/api/lessons",
    params(LessonFilterParams),
    responses(
        (status = 200, description = "Lessons of the chapter, ascending by order", body = Vec<Lesson>),
        (status = 404, description = "Chapter not found")
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn get_lessons(
    State(state): State<AppState>,
    Query(filters): Query<LessonFilterParams>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = LessonService::list_by_chapter(&state.db, filters.chapter_id).await?;

    Ok(Json(lessons))
}

#[utoipa::path(
    post,
    path = "/api/lessons/{id}/videos",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    request_body = AttachVideoDto,
    responses(
        (status = 201, description = "Video reference attached", body = LessonVideo),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Lesson not found"),
        (status = 409, description = "Duplicate order"),
        (status = 422, description = "Unsupported video format")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn attach_video(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AttachVideoDto>,
) -> Result<(StatusCode, Json<LessonVideo>), AppError> {
    let teacher_id = auth_user.user_id()?;
    let video = LessonService::attach_video(&state.db, teacher_id, id, dto).await?;

    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    get,
    path = "/api/lessons/{id}/videos",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Videos of the lesson, ascending by order", body = Vec<LessonVideo>),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn get_lesson_videos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LessonVideo>>, AppError> {
    let videos = LessonService::list_videos(&state.db, id).await?;

    Ok(Json(videos))
}

#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 204, description = "Lesson and its videos deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let teacher_id = auth_user.user_id()?;
    LessonService::delete_cascade(&state.db, id, teacher_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
