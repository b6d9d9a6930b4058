//! Owner summary aggregation

use petclinic_shared::constants::{SUMMARY_TITLE, VIP_VISIT_THRESHOLD};
use petclinic_shared::VisitTally;
use serde::Serialize;

use crate::domain::{Owner, Pet};

/// Display values for the owner status summary page
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub title: &'static str,
    pub owner: Owner,
    pub pet_count: usize,
    pub total_visits: usize,
    pub is_vip: bool,
}

impl OwnerSummary {
    pub fn new(owner: Owner, tally: VisitTally) -> Self {
        let total_visits = tally_visits(&owner.pets, tally);
        Self {
            title: SUMMARY_TITLE,
            pet_count: owner.pet_count(),
            total_visits,
            is_vip: is_vip(total_visits),
            owner,
        }
    }
}

pub fn tally_visits(pets: &[Pet], tally: VisitTally) -> usize {
    match tally {
        VisitTally::LastPet => {
            let mut total_visits = 0;
            for pet in pets {
                // Restarted per pet: only the last pet's visits survive the loop.
                total_visits = 0;
                total_visits += pet.visit_count();
            }
            total_visits
        }
        VisitTally::AllPets => pets.iter().map(Pet::visit_count).sum(),
    }
}

pub fn is_vip(total_visits: usize) -> bool {
    total_visits > VIP_VISIT_THRESHOLD
}
