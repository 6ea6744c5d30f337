use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::slug::NameSource;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub module_id: Uuid,
    pub teacher_id: Uuid,
    pub title: String,
    pub description: String,
    pub is_published: bool,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    pub module_id: Uuid,
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
}

impl NameSource for CreateCourseDto {
    fn name_source(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct CourseFilterParams {
    pub module_id: Uuid,
}
