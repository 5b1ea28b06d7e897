use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{cases::submit_case, fields::get_field, health_check};
use crate::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/fields/:id", get(get_field))
        .route("/cases", post(submit_case))
        .with_state(state)
}
