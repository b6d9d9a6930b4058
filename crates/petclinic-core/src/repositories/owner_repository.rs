//! Owner repository trait (port)

use async_trait::async_trait;
use petclinic_shared::{Page, PageRequest};

use crate::domain::Owner;
use crate::error::DomainError;

/// Persistence port for owners. Loaded owners carry their pets, pet types and visits.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Owner>, DomainError>;

    /// Owners whose last name starts with `last_name`. An empty prefix matches everyone.
    async fn find_by_last_name_starting_with(
        &self,
        last_name: &str,
        page: PageRequest,
    ) -> Result<Page<Owner>, DomainError>;

    async fn create(&self, owner: &Owner) -> Result<Owner, DomainError>;
    async fn update(&self, owner: &Owner) -> Result<Owner, DomainError>;
}
