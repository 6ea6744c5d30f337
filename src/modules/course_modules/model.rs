use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::slug::NameSource;

/// Second level of the catalog tree: a thematic grouping inside a category
/// (e.g. "Python" under "Programmation").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Module {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateModuleDto {
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl NameSource for CreateModuleDto {
    fn name_source(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ModuleFilterParams {
    pub category_id: Uuid,
}
