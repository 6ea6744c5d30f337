use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_course_chapters, get_lesson};

pub fn init_study_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{category_slug}/{module_slug}/{course_slug}/chapters",
            get(get_course_chapters),
        )
        .route(
            "/{category_slug}/{module_slug}/{course_slug}/{chapter_slug}/{lesson_slug}",
            get(get_lesson),
        )
}
