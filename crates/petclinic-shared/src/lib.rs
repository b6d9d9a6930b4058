//! # Pet Clinic Shared
//! 
//! Shared configuration, paging types, and telemetry for the Pet Clinic application.

pub mod constants;
pub mod types;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
