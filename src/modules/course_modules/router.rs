use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_module, delete_module, get_module_by_id, get_modules};

pub fn init_modules_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_module).get(get_modules))
        .route("/{id}", get(get_module_by_id).delete(delete_module))
}
