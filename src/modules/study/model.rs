use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::chapters::model::Chapter;
use crate::modules::courses::model::Course;
use crate::modules::lessons::model::Lesson;

/// Resolved lesson bundle with ordering-aware navigation context.
///
/// `previous_lesson` / `next_lesson` are siblings within the chapter;
/// `next_chapter_first_lesson` is only set when the current lesson is the
/// last of its chapter and a later chapter with lessons exists.
#[derive(Debug, Serialize, ToSchema)]
pub struct LessonNavigation {
    pub lesson: Lesson,
    pub chapter: Chapter,
    pub course: Course,
    pub all_lessons: Vec<Lesson>,
    pub previous_lesson: Option<Lesson>,
    pub next_lesson: Option<Lesson>,
    pub next_chapter_first_lesson: Option<Lesson>,
}

/// A published course with its ordered chapters.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseChapters {
    pub course: Course,
    pub chapters: Vec<Chapter>,
}
