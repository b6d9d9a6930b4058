// ============================================================================
// Pet Clinic API - Owner Handlers
// File: crates/petclinic-api/src/handlers/owners.rs
// ============================================================================
//! Owner create, find, update, details and summary pages

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use petclinic_core::domain::{Owner, OwnerChanges};
use petclinic_core::services::{SaveOutcome, SearchOutcome};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::flash::{Flash, IncomingFlash};
use crate::state::AppState;
use crate::views::{field_errors, View};

/// Query string of `GET /owners`. `page` is kept raw so malformed input can fall back to 1.
#[derive(Debug, Default, Deserialize)]
pub struct FindOwnersQuery {
    pub page: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok()).unwrap_or(1)
}

fn form_model(owner: &Owner, errors: Value) -> Value {
    json!({
        "active_menu": "owners",
        "owner": owner,
        "errors": errors,
    })
}

fn list_model(owners: Vec<Owner>, current_page: u32, total_pages: u32, total_items: u64, last_name: &str) -> Value {
    let pages: Vec<Value> = (1..=total_pages)
        .map(|number| json!({ "number": number, "current": number == current_page }))
        .collect();
    json!({
        "active_menu": "owners",
        "list_owners": owners,
        "current_page": current_page,
        "total_pages": total_pages,
        "total_items": total_items,
        "last_name": last_name,
        "pages": pages,
    })
}

/// GET /owners/new
pub async fn init_creation_form(
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<Response, ApiError> {
    state.views.page(View::OwnerForm, form_model(&Owner::default(), json!({})), flash)
}

/// POST /owners/new
pub async fn process_creation_form(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Form(changes): Form<OwnerChanges>,
) -> Result<Response, ApiError> {
    match state.owners.create(changes).await? {
        SaveOutcome::Saved(owner) => match owner.id {
            Some(id) => Ok(Flash::OwnerCreated.redirect(&format!("/owners/{}", id))),
            None => Err(ApiError::InternalError("saved owner has no id".into())),
        },
        SaveOutcome::Invalid { owner, errors } => {
            state.views.page(View::OwnerForm, form_model(&owner, field_errors(&errors)), flash)
        }
        SaveOutcome::IdMismatch { owner_id } => {
            Ok(Flash::OwnerIdMismatch.redirect(&format!("/owners/{}/edit", owner_id)))
        }
    }
}

/// GET /owners/find
pub async fn init_find_form(
    State(state): State<AppState>,
    flash: IncomingFlash,
) -> Result<Response, ApiError> {
    let model = json!({ "active_menu": "owners", "last_name": Value::Null, "errors": {} });
    state.views.page(View::FindOwners, model, flash)
}

/// GET /owners
pub async fn process_find_form(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Query(query): Query<FindOwnersQuery>,
) -> Result<Response, ApiError> {
    let page = parse_page(query.page.as_deref());
    let criterion = query.last_name.clone().unwrap_or_default();

    match state.owners.search(page, query.last_name).await? {
        SearchOutcome::RedisplayForm { last_name, errors } => {
            let model = json!({
                "active_menu": "owners",
                "last_name": last_name,
                "errors": field_errors(&errors),
            });
            state.views.page(View::FindOwners, model, flash)
        }
        SearchOutcome::Redirect(owner_id) => Ok(Redirect::to(&format!("/owners/{}", owner_id)).into_response()),
        SearchOutcome::ListPage { owners, current_page, total_pages, total_items } => {
            let model = list_model(owners, current_page, total_pages, total_items, &criterion);
            state.views.page(View::OwnersList, model, flash)
        }
    }
}

/// GET /owners/{owner_id}/edit
pub async fn init_update_owner_form(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Path(owner_id): Path<i32>,
) -> Result<Response, ApiError> {
    let owner = state.owners.find(owner_id).await?;
    state.views.page(View::OwnerForm, form_model(&owner, json!({})), flash)
}

/// POST /owners/{owner_id}/edit
pub async fn process_update_owner_form(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Path(owner_id): Path<i32>,
    Form(changes): Form<OwnerChanges>,
) -> Result<Response, ApiError> {
    match state.owners.update(owner_id, changes).await? {
        SaveOutcome::Saved(_) => Ok(Flash::OwnerUpdated.redirect(&format!("/owners/{}", owner_id))),
        SaveOutcome::Invalid { owner, errors } => {
            state.views.page(View::OwnerForm, form_model(&owner, field_errors(&errors)), flash)
        }
        SaveOutcome::IdMismatch { owner_id } => {
            Ok(Flash::OwnerIdMismatch.redirect(&format!("/owners/{}/edit", owner_id)))
        }
    }
}

/// GET /owners/{owner_id}
pub async fn show_owner(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Path(owner_id): Path<i32>,
) -> Result<Response, ApiError> {
    let owner = state.owners.find(owner_id).await?;
    let model = json!({ "active_menu": "owners", "owner": owner });
    state.views.page(View::OwnerDetails, model, flash)
}

/// GET /owners/{owner_id}/summary
pub async fn show_owner_summary(
    State(state): State<AppState>,
    flash: IncomingFlash,
    Path(owner_id): Path<i32>,
) -> Result<Response, ApiError> {
    let summary = state.owners.summarize(owner_id).await?;
    let mut model = serde_json::to_value(&summary).map_err(|e| ApiError::InternalError(e.to_string()))?;
    if let Value::Object(map) = &mut model {
        map.insert("active_menu".into(), Value::String("owners".into()));
    }
    state.views.page(View::OwnerSummary, model, flash)
}
