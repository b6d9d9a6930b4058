//! Repository traits (ports)

pub mod owner_repository;

pub use owner_repository::OwnerRepository;
#[cfg(any(test, feature = "mocks"))]
pub use owner_repository::MockOwnerRepository;
