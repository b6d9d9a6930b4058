use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use petclinic_core::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::OwnerNotFound(id) => ApiError::NotFound(format!("owner {}", id)),
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            DomainError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

// Error pages are static so nothing from the failed request leaks into them.
fn error_page(status: StatusCode, heading: &str, detail: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>PetClinic :: {heading}</title>\
         <link rel=\"stylesheet\" href=\"/resources/css/petclinic.css\"></head>\n<body>\n\
         <div class=\"container\"><h2>{heading}</h2><p>{detail}</p><p class=\"status\">{code}</p>\
         <a href=\"/owners/find\">Find owners</a></div>\n</body>\n</html>\n",
        heading = heading,
        detail = detail,
        code = status.as_u16(),
    ))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, heading, detail) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "Not Found", "The requested record does not exist.")
            },
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something happened...", "The clinic records are unavailable right now.")
            },
            ApiError::TemplateError(err) => {
                tracing::error!("Template error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something happened...", "The page could not be rendered.")
            },
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something happened...", "An unexpected error occurred.")
            },
        };

        (status, error_page(status, heading, detail)).into_response()
    }
}
