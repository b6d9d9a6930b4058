//! # Pet Clinic API
//! 
//! HTTP handlers, server-rendered views, and flash messages.

pub mod error;
pub mod flash;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod views;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
