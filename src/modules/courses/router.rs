use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    create_course, delete_course, get_course_by_id, get_course_enrollments, get_courses,
    get_my_courses, publish_course, unpublish_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(get_courses))
        .route("/mine", get(get_my_courses))
        .route("/{id}", get(get_course_by_id).delete(delete_course))
        .route("/{id}/publish", patch(publish_course))
        .route("/{id}/unpublish", patch(unpublish_course))
        .route("/{id}/enrollments", get(get_course_enrollments))
}
