//! PostgreSQL repository implementations

pub mod owner_repo_impl;

pub use owner_repo_impl::PgOwnerRepository;
