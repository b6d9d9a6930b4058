//! # Pet Clinic Core - Domain Module
//! 
//! Domain entities for the Pet Clinic application.

pub mod owner;
pub mod pet;
pub mod pet_type;
pub mod visit;

// Re-export all entities
pub use owner::{Owner, OwnerChanges};
pub use pet::Pet;
pub use pet_type::PetType;
pub use visit::Visit;
