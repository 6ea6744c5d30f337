use axum::{
    Router,
    routing::{delete, post},
};

use crate::state::AppState;

use super::controller::{create_chapter, delete_chapter, get_chapters, visit_chapter};

pub fn init_chapters_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_chapter).get(get_chapters))
        .route("/{id}", delete(delete_chapter))
        .route("/{id}/visit", post(visit_chapter))
}
