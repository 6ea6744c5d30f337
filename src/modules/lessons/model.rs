use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::slug::NameSource;

/// Video container formats accepted for lesson attachments.
pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lesson {
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LessonVideo {
    pub id: Uuid,
    pub lesson_id: Uuid,
    /// Reference into the external blob store; the catalog only records it.
    pub video_file: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLessonDto {
    pub chapter_id: Uuid,
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    /// Focused content: one precise concept per lesson.
    pub content: String,
    #[validate(range(min = 1))]
    pub order: i32,
}

impl NameSource for CreateLessonDto {
    fn name_source(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AttachVideoDto {
    #[validate(length(min = 1, max = 1000))]
    pub video_file: String,
    #[validate(range(min = 1))]
    pub order: i32,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct LessonFilterParams {
    pub chapter_id: Uuid,
}
