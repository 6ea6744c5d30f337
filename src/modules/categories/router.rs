use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_category, delete_category, get_categories, get_category_by_id};

pub fn init_categories_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_category).get(get_categories))
        .route("/{id}", get(get_category_by_id).delete(delete_category))
}
