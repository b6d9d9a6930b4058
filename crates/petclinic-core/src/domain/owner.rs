// ============================================================================
// Pet Clinic Core - Owner Entity
// File: crates/petclinic-core/src/domain/owner.rs
// Description: Pet owner with contact details and owned pets
// ============================================================================

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use super::Pet;

static TELEPHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("telephone pattern is valid"));

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

fn ten_digit_telephone(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if !TELEPHONE_PATTERN.is_match(value) {
        return Err(ValidationError::new("telephone")
            .with_message(Cow::Borrowed("Telephone must be a 10-digit number")));
    }
    Ok(())
}

/// Owner entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Owner {
    pub id: Option<i32>,

    #[validate(custom(function = "not_blank"))]
    pub first_name: String,

    #[validate(custom(function = "not_blank"))]
    pub last_name: String,

    #[validate(custom(function = "not_blank"))]
    pub address: String,

    #[validate(custom(function = "not_blank"))]
    pub city: String,

    #[validate(custom(function = "ten_digit_telephone"))]
    pub telephone: String,

    pub pets: Vec<Pet>,
}

impl Owner {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        telephone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
            telephone: telephone.into(),
            pets: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn add_pet(&mut self, pet: Pet) {
        self.pets.push(pet);
    }

    /// Look up a pet by name, ignoring case.
    pub fn pet(&self, name: &str) -> Option<&Pet> {
        self.pets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn pet_count(&self) -> usize {
        self.pets.len()
    }
}

/// Submitted owner form fields. Only fields present in the submission are bound.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerChanges {
    /// Raw submitted id, kept as text so a malformed value reads as a mismatch.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub telephone: Option<String>,
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.map(|id| id.trim().to_string()).filter(|id| !id.is_empty()))
}

impl OwnerChanges {
    /// Whether the submission is for `owner_id`. An absent id counts as a match.
    pub fn targets(&self, owner_id: i32) -> bool {
        match &self.id {
            None => true,
            Some(id) => id.parse::<i32>() == Ok(owner_id),
        }
    }

    /// Copy submitted fields onto `owner`. The owner's own id is never touched.
    pub fn apply_to(self, owner: &mut Owner) {
        if let Some(first_name) = self.first_name {
            owner.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            owner.last_name = last_name;
        }
        if let Some(address) = self.address {
            owner.address = address;
        }
        if let Some(city) = self.city {
            owner.city = city;
        }
        if let Some(telephone) = self.telephone {
            owner.telephone = telephone;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PetType;
    use chrono::NaiveDate;

    fn george() -> Owner {
        Owner::new("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023")
    }

    #[test]
    fn test_valid_owner() {
        assert!(george().validate().is_ok());
    }

    #[test]
    fn test_non_ascii_names_are_valid() {
        let owner = Owner::new("José", "García-López", "123 Main St. Apt #4B", "São Paulo", "1316761638");
        assert!(owner.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let owner = Owner::new("  ", "", "", "\t", "");
        let errors = owner.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["first_name", "last_name", "address", "city", "telephone"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_telephone_must_be_ten_digits() {
        for telephone in ["12345", "12345678901", "invalid-phone", "608-555-102"] {
            let mut owner = george();
            owner.telephone = telephone.to_string();
            let errors = owner.validate().unwrap_err();
            let fields = errors.field_errors();
            assert_eq!(fields["telephone"][0].code, "telephone", "telephone {telephone}");
            assert_eq!(fields.len(), 1);
        }
    }

    #[test]
    fn test_apply_changes_keeps_unsubmitted_fields_and_id() {
        let mut owner = george();
        owner.id = Some(1);
        OwnerChanges {
            id: Some("2".into()),
            city: Some("London".into()),
            ..Default::default()
        }
        .apply_to(&mut owner);
        assert_eq!(owner.id, Some(1));
        assert_eq!(owner.city, "London");
        assert_eq!(owner.first_name, "George");
    }

    #[test]
    fn test_targets_compares_submitted_id() {
        let with_id = |id: Option<&str>| OwnerChanges {
            id: id.map(String::from),
            ..Default::default()
        };
        assert!(with_id(None).targets(1));
        assert!(with_id(Some("1")).targets(1));
        assert!(!with_id(Some("2")).targets(1));
        assert!(!with_id(Some("abc")).targets(1));
    }

    #[test]
    fn test_pet_lookup_ignores_case() {
        let mut owner = george();
        let born = NaiveDate::from_ymd_opt(2020, 9, 7).unwrap();
        owner.add_pet(Pet::new("Max", born, PetType::new("dog")));
        assert!(owner.pet("max").is_some());
        assert!(owner.pet("Leo").is_none());
        assert_eq!(owner.pet_count(), 1);
    }
}
