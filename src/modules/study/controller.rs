use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::modules::study::model::{CourseChapters, LessonNavigation};
use crate::modules::study::service::StudyService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    get,
    path = "/api/study/{category_slug}/{module_slug}/{course_slug}/chapters",
    params(
        ("category_slug" = String, Path, description = "Category slug"),
        ("module_slug" = String, Path, description = "Module slug"),
        ("course_slug" = String, Path, description = "Course slug")
    ),
    responses(
        (status = 200, description = "Published course with ordered chapters", body = CourseChapters),
        (status = 404, description = "Broken slug chain or unpublished course")
    ),
    tag = "Study"
)]
#[instrument(skip(state))]
pub async fn get_course_chapters(
    State(state): State<AppState>,
    Path((category_slug, module_slug, course_slug)): Path<(String, String, String)>,
) -> Result<Json<CourseChapters>, AppError> {
    let listing =
        StudyService::list_chapters(&state.db, &category_slug, &module_slug, &course_slug).await?;

    Ok(Json(listing))
}

#[utoipa::path(
    get,
    path = "/api/study/{category_slug}/{module_slug}/{course_slug}/{chapter_slug}/{lesson_slug}",
    params(
        ("category_slug" = String, Path, description = "Category slug"),
        ("module_slug" = String, Path, description = "Module slug"),
        ("course_slug" = String, Path, description = "Course slug"),
        ("chapter_slug" = String, Path, description = "Chapter slug"),
        ("lesson_slug" = String, Path, description = "Lesson slug")
    ),
    responses(
        (status = 200, description = "Resolved lesson with navigation context", body = LessonNavigation),
        (status = 404, description = "Broken slug chain or unpublished course")
    ),
    tag = "Study"
)]
#[instrument(skip(state))]
pub async fn get_lesson(
    State(state): State<AppState>,
    Path((category_slug, module_slug, course_slug, chapter_slug, lesson_slug)): Path<(
        String,
        String,
        String,
        String,
        String,
    )>,
) -> Result<Json<LessonNavigation>, AppError> {
    let navigation = StudyService::resolve_lesson(
        &state.db,
        &category_slug,
        &module_slug,
        &course_slug,
        &chapter_slug,
        &lesson_slug,
    )
    .await?;

    Ok(Json(navigation))
}
