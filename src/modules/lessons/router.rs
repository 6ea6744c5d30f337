use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{
    attach_video, create_lesson, delete_lesson, get_lesson_videos, get_lessons,
};

pub fn init_lessons_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_lesson).get(get_lessons))
        .route("/{id}", delete(delete_lesson))
        .route("/{id}/videos", post(attach_video).get(get_lesson_videos))
}
