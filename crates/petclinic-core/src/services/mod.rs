//! Domain services

pub mod owner_service;
pub mod summary;

pub use owner_service::{OwnerService, SaveOutcome, SearchOutcome};
pub use summary::OwnerSummary;
