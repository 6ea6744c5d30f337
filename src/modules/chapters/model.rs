use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::lessons::model::Lesson;
use crate::utils::slug::NameSource;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Chapter {
    pub id: Uuid,
    pub course_id: Uuid,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateChapterDto {
    pub course_id: Uuid,
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    /// Broad presentation of the chapter (objectives, context).
    pub description: String,
    #[validate(range(min = 1))]
    pub order: i32,
}

impl NameSource for CreateChapterDto {
    fn name_source(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ChapterFilterParams {
    pub course_id: Uuid,
}

/// Returned by the visit-chapter operation: the chapter, its ordered lessons
/// and whether this visit created the enrollment or found an existing one.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChapterVisit {
    pub chapter: Chapter,
    pub lessons: Vec<Lesson>,
    pub newly_enrolled: bool,
}
