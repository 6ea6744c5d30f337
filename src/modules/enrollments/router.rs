use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{enroll, get_my_enrollments};

pub fn init_enrollments_router() -> Router<AppState> {
    Router::new().route("/", post(enroll).get(get_my_enrollments))
}
