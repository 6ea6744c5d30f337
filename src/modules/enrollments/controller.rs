use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::enrollments::model::{EnrollDto, Enrollment};
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = EnrollDto,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role violation - caller is not a student"),
        (status = 404, description = "Course not found"),
        (status = 409, description = "Already enrolled")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn enroll(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(dto): Json<EnrollDto>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let student_id = auth_user.user_id()?;
    let enrollment = EnrollmentService::enroll(&state.db, student_id, dto.course_id).await?;

    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    get,
    path = "/api/enrollments",
    responses(
        (status = 200, description = "The caller's enrollments, newest first", body = Vec<Enrollment>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Enrollments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_my_enrollments(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Enrollment>>, AppError> {
    let student_id = auth_user.user_id()?;
    let enrollments = EnrollmentService::list_for_student(&state.db, student_id).await?;

    Ok(Json(enrollments))
}
