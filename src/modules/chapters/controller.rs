use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireTeacher;
use crate::modules::chapters::model::{
    Chapter, ChapterFilterParams, ChapterVisit, CreateChapterDto,
};
use crate::modules::chapters::service::ChapterService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/chapters",
    request_body = CreateChapterDto,
    responses(
        (status = 201, description = "Chapter created", body = Chapter),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Duplicate name, order or slug")
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_chapter(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateChapterDto>,
) -> Result<(StatusCode, Json<Chapter>), AppError> {
    let teacher_id = auth_user.user_id()?;
    let chapter = ChapterService::create(&state.db, teacher_id, dto).await?;

    Ok((StatusCode::CREATED, Json(chapter)))
}

#[utoipa::path(
    get,
    path = "/api/chapters",
    params(ChapterFilterParams),
    responses(
        (status = 200, description = "Chapters of the course, ascending by order", body = Vec<Chapter>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Course not found")
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_chapters(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Query(filters): Query<ChapterFilterParams>,
) -> Result<Json<Vec<Chapter>>, AppError> {
    let teacher_id = auth_user.user_id()?;
    let chapters = ChapterService::list_by_course(&state.db, filters.course_id, teacher_id).await?;

    Ok(Json(chapters))
}

#[utoipa::path(
    post,
    path = "/api/chapters/{id}/visit",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    responses(
        (status = 200, description = "Chapter with lessons; enrolls the visitor on first visit", body = ChapterVisit),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role violation - visitor is not a student"),
        (status = 404, description = "Chapter not found or course unpublished")
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn visit_chapter(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ChapterVisit>, AppError> {
    let user_id = auth_user.user_id()?;
    let visit = ChapterService::visit(&state.db, user_id, id).await?;

    Ok(Json(visit))
}

#[utoipa::path(
    delete,
    path = "/api/chapters/{id}",
    params(("id" = Uuid, Path, description = "Chapter ID")),
    responses(
        (status = 204, description = "Chapter, lessons and videos deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Chapter not found")
    ),
    tag = "Chapters",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_chapter(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let teacher_id = auth_user.user_id()?;
    ChapterService::delete_cascade(&state.db, id, teacher_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
