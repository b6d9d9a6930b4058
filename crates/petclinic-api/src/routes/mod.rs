use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, owners, welcome};
use crate::state::AppState;


pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome::welcome))
        .route("/health", get(health::health_check))
        .route(
            "/owners/new",
            get(owners::init_creation_form).post(owners::process_creation_form),
        )
        .route("/owners/find", get(owners::init_find_form))
        .route("/owners", get(owners::process_find_form))
        .route("/owners/{owner_id}", get(owners::show_owner))
        .route(
            "/owners/{owner_id}/edit",
            get(owners::init_update_owner_form).post(owners::process_update_owner_form),
        )
        .route("/owners/{owner_id}/summary", get(owners::show_owner_summary))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
