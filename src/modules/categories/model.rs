use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::slug::NameSource;

/// Top level of the catalog tree.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl NameSource for CreateCategoryDto {
    fn name_source(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct CategoryFilterParams {
    pub name: Option<String>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCategoriesResponse {
    pub data: Vec<Category>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
