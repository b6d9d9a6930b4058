// ============================================================================
// Pet Clinic Core - Pet Entity
// File: crates/petclinic-core/src/domain/pet.rs
// ============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{PetType, Visit};

/// Pet entity, owned by exactly one owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Option<i32>,
    pub name: String,
    pub birth_date: NaiveDate,
    pub pet_type: PetType,
    pub visits: Vec<Visit>,
}

impl Pet {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate, pet_type: PetType) -> Self {
        Self {
            id: None,
            name: name.into(),
            birth_date,
            pet_type,
            visits: Vec::new(),
        }
    }

    pub fn add_visit(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }
}
