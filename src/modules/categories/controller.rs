use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::categories::model::{
    Category, CategoryFilterParams, CreateCategoryDto, PaginatedCategoriesResponse,
};
use crate::middleware::role::RequireTeacher;
use crate::modules::categories::service::CategoryService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 409, description = "Duplicate name or slug")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    RequireTeacher(_auth_user): RequireTeacher,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = CategoryService::create(&state.db, dto).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    params(CategoryFilterParams),
    responses(
        (status = 200, description = "List of categories", body = PaginatedCategoriesResponse)
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
    Query(filters): Query<CategoryFilterParams>,
) -> Result<Json<PaginatedCategoriesResponse>, AppError> {
    let categories = CategoryService::list(&state.db, filters).await?;

    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = Category),
        (status = 404, description = "Category not found")
    ),
    tag = "Categories"
)]
#[instrument(skip(state))]
pub async fn get_category_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>, AppError> {
    let category = CategoryService::get_by_id(&state.db, id).await?;

    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category and all descendants deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires teacher role"),
        (status = 404, description = "Category not found")
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    RequireTeacher(_auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CategoryService::delete_cascade(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
