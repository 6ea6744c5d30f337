use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::role::RequireTeacher;
use crate::modules::course_modules::model::{CreateModuleDto, Module, ModuleFilterParams};
use crate::modules::course_modules::service::ModuleService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/modules",
    request_body = CreateModuleDto,
    responses(
        (status = 201, description = "Module created", body = Module),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Duplicate name or slug")
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_module(
    State(state): State<AppState>,
    RequireTeacher(_auth_user): RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateModuleDto>,
) -> Result<(StatusCode, Json<Module>), AppError> {
    let module = ModuleService::create(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(module)))
}

#[utoipa::path(
    get,
    path = "/api/modules",
    params(ModuleFilterParams),
    responses(
        (status = 200, description = "Modules in the category, by name", body = Vec<Module>),
        (status = 404, description = "Category not found")
    ),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn get_modules(
    State(state): State<AppState>,
    Query(filters): Query<ModuleFilterParams>,
) -> Result<Json<Vec<Module>>, AppError> {
    let modules = ModuleService::list_by_category(&state.db, filters.category_id).await?;

    Ok(Json(modules))
}

#[utoipa::path(
    get,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module details", body = Module),
        (status = 404, description = "Module not found")
    ),
    tag = "Modules"
)]
#[instrument(skip(state))]
pub async fn get_module_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Module>, AppError> {
    let module = ModuleService::get_by_id(&state.db, id).await?;

    Ok(Json(module))
}

#[utoipa::path(
    delete,
    path = "/api/modules/{id}",
    params(("id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 204, description = "Module and all descendants deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Module not found")
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_module(
    State(state): State<AppState>,
    RequireTeacher(_auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ModuleService::delete_cascade(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
