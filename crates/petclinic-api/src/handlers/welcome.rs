use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::flash::IncomingFlash;
use crate::state::AppState;
use crate::views::View;

#[derive(Debug, Default, Deserialize)]
pub struct WelcomeQuery {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
}

/// GET /
pub async fn welcome(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Query(query): Query<WelcomeQuery>,
) -> Result<Response, ApiError> {
    let welcome_name = query
        .first_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    let model = json!({ "active_menu": "home", "welcome_name": welcome_name });
    state.views.page(View::Welcome, model, flash)
}
