// ============================================================================
// Pet Clinic Core - Owner Service
// File: crates/petclinic-core/src/services/owner_service.rs
// ============================================================================
//! Owner search, pagination, form handling and summary flows

use std::borrow::Cow;
use std::sync::Arc;

use petclinic_shared::{Page, PageRequest, VisitTally};
use tracing::{info, warn};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{Owner, OwnerChanges};
use crate::error::DomainError;
use crate::repositories::OwnerRepository;

use super::summary::OwnerSummary;

/// Result of a find-owners request
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Nothing matched. `errors` carries a `notFound` error on `last_name`.
    RedisplayForm {
        last_name: String,
        errors: ValidationErrors,
    },
    /// Exactly one owner matched.
    Redirect(i32),
    ListPage {
        owners: Vec<Owner>,
        current_page: u32,
        total_pages: u32,
        total_items: u64,
    },
}

/// Result of a create or update submission
#[derive(Debug, Clone)]
pub enum SaveOutcome {
    Saved(Owner),
    Invalid {
        owner: Owner,
        errors: ValidationErrors,
    },
    /// The submitted id differs from the id being edited.
    IdMismatch { owner_id: i32 },
}

pub struct OwnerService {
    owners: Arc<dyn OwnerRepository>,
    page_size: u32,
    visit_tally: VisitTally,
}

impl OwnerService {
    pub fn new(owners: Arc<dyn OwnerRepository>, page_size: u32, visit_tally: VisitTally) -> Self {
        Self {
            owners,
            page_size: page_size.max(1),
            visit_tally,
        }
    }

    /// Load an owner or fail with `OwnerNotFound`
    pub async fn find(&self, owner_id: i32) -> Result<Owner, DomainError> {
        self.owners.find_by_id(owner_id).await?.ok_or_else(|| {
            warn!("Owner not found: {}", owner_id);
            DomainError::OwnerNotFound(owner_id)
        })
    }

    /// Fetch one page of owners by last-name prefix. `page` is 1-based.
    pub async fn find_paginated(&self, page: i64, last_name: &str) -> Result<Page<Owner>, DomainError> {
        let request = PageRequest::from_one_based(page, self.page_size);
        self.owners.find_by_last_name_starting_with(last_name, request).await
    }

    /// Find owners by last name and decide how the result should be shown
    pub async fn search(&self, page: i64, last_name: Option<String>) -> Result<SearchOutcome, DomainError> {
        // No last name means the broadest possible search.
        let last_name = last_name.unwrap_or_default();
        let current_page = PageRequest::from_one_based(page, self.page_size).page_number();

        let results = self.find_paginated(page, &last_name).await?;
        if results.is_empty() {
            info!("No owners found for last name '{}' on page {}", last_name, current_page);
            let mut errors = ValidationErrors::new();
            errors.add(
                "last_name",
                ValidationError::new("notFound").with_message(Cow::Borrowed("not found")),
            );
            return Ok(SearchOutcome::RedisplayForm { last_name, errors });
        }

        if results.total_elements == 1 {
            if let Some(owner_id) = results.content.first().and_then(|o| o.id) {
                return Ok(SearchOutcome::Redirect(owner_id));
            }
        }

        Ok(SearchOutcome::ListPage {
            current_page,
            total_pages: results.total_pages(),
            total_items: results.total_elements,
            owners: results.content,
        })
    }

    pub async fn create(&self, changes: OwnerChanges) -> Result<SaveOutcome, DomainError> {
        let mut owner = Owner::default();
        changes.apply_to(&mut owner);

        if let Err(errors) = owner.validate() {
            return Ok(SaveOutcome::Invalid { owner, errors });
        }

        let saved = self.owners.create(&owner).await?;
        info!("Owner created: {:?}", saved.id);
        Ok(SaveOutcome::Saved(saved))
    }

    /// Bind submitted fields onto the stored owner and save it
    pub async fn update(&self, owner_id: i32, changes: OwnerChanges) -> Result<SaveOutcome, DomainError> {
        let mut owner = self.find(owner_id).await?;
        let submitted_id = changes.id.clone();
        let targets_owner = changes.targets(owner_id);
        changes.apply_to(&mut owner);

        if let Err(errors) = owner.validate() {
            return Ok(SaveOutcome::Invalid { owner, errors });
        }

        if !targets_owner {
            warn!("Owner id mismatch: path {} vs submitted {:?}", owner_id, submitted_id);
            return Ok(SaveOutcome::IdMismatch { owner_id });
        }

        owner.id = Some(owner_id);
        let saved = self.owners.update(&owner).await?;
        info!("Owner updated: {}", owner_id);
        Ok(SaveOutcome::Saved(saved))
    }

    pub async fn summarize(&self, owner_id: i32) -> Result<OwnerSummary, DomainError> {
        let owner = self.find(owner_id).await?;
        Ok(OwnerSummary::new(owner, self.visit_tally))
    }
}
