//! Server-rendered views backed by Handlebars templates

use axum::{
    http::header,
    response::{Html, IntoResponse, Response},
};
use handlebars::{Handlebars, TemplateError};
use serde_json::{Map, Value};
use validator::ValidationErrors;

use crate::error::ApiError;
use crate::flash::{Flash, IncomingFlash};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Welcome,
    OwnerForm,
    FindOwners,
    OwnersList,
    OwnerDetails,
    OwnerSummary,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Welcome,
        View::OwnerForm,
        View::FindOwners,
        View::OwnersList,
        View::OwnerDetails,
        View::OwnerSummary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            View::Welcome => "welcome",
            View::OwnerForm => "owners/createOrUpdateOwnerForm",
            View::FindOwners => "owners/findOwners",
            View::OwnersList => "owners/ownersList",
            View::OwnerDetails => "owners/ownerDetails",
            View::OwnerSummary => "owners/ownerSummary",
        }
    }

    fn source(self) -> &'static str {
        match self {
            View::Welcome => include_str!("../templates/welcome.hbs"),
            View::OwnerForm => include_str!("../templates/owners/createOrUpdateOwnerForm.hbs"),
            View::FindOwners => include_str!("../templates/owners/findOwners.hbs"),
            View::OwnersList => include_str!("../templates/owners/ownersList.hbs"),
            View::OwnerDetails => include_str!("../templates/owners/ownerDetails.hbs"),
            View::OwnerSummary => include_str!("../templates/owners/ownerSummary.hbs"),
        }
    }
}

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("layout", include_str!("../templates/layout.hbs"))?;
        for view in View::ALL {
            registry.register_template_string(view.name(), view.source())?;
        }
        Ok(Self { registry })
    }

    pub fn render(&self, view: View, model: &Value) -> Result<String, ApiError> {
        Ok(self.registry.render(view.name(), model)?)
    }

    /// Render `view` as a 200 page, consuming any pending flash message.
    pub fn page(&self, view: View, mut model: Value, flash: IncomingFlash) -> Result<Response, ApiError> {
        let IncomingFlash(flash) = flash;
        if let (Some(flash), Value::Object(map)) = (flash, &mut model) {
            map.insert(flash.key().to_string(), Value::String(flash.text().to_string()));
        }

        let html = Html(self.render(view, &model)?);
        Ok(match flash {
            Some(_) => ([(header::SET_COOKIE, Flash::clear_cookie().to_string())], html).into_response(),
            None => html.into_response(),
        })
    }
}

/// Field name -> first error message, for inline display next to form inputs.
pub fn field_errors(errors: &ValidationErrors) -> Value {
    let mut fields = Map::new();
    for (field, errs) in errors.field_errors() {
        if let Some(first) = errs.first() {
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            fields.insert(field.to_string(), Value::String(message));
        }
    }
    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::ValidationError;

    #[test]
    fn test_all_templates_register() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_layout_has_navigation() {
        let views = Views::new().unwrap();
        let html = views.render(View::Welcome, &json!({ "active_menu": "home" })).unwrap();
        assert!(html.contains("<meta charset=\"utf-8\""));
        assert!(html.contains("id=\"main-navbar\""));
        assert!(html.contains("href=\"/owners/find\""));
        assert!(html.contains("resources/css/petclinic.css"));
        assert!(html.contains("nav-link active"));
    }

    #[test]
    fn test_welcome_alert_only_with_name() {
        let views = Views::new().unwrap();
        let html = views.render(View::Welcome, &json!({})).unwrap();
        assert!(!html.contains("alert alert-primary"));

        let html = views.render(View::Welcome, &json!({ "welcome_name": "Alice" })).unwrap();
        assert!(html.contains("alert alert-primary"));
        assert!(html.contains("Welcome back, Alice!"));
    }

    #[test]
    fn test_output_is_escaped() {
        let views = Views::new().unwrap();
        let html = views
            .render(View::Welcome, &json!({ "welcome_name": "<script>" }))
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_field_errors_prefers_message() {
        let mut errors = ValidationErrors::new();
        errors.add("city", ValidationError::new("blank").with_message("must not be blank".into()));
        errors.add("telephone", ValidationError::new("telephone"));
        let fields = field_errors(&errors);
        assert_eq!(fields["city"], "must not be blank");
        assert_eq!(fields["telephone"], "telephone");
    }
}
