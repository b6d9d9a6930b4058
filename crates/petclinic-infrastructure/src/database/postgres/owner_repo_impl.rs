// ============================================================================
// Pet Clinic Infrastructure - PostgreSQL Owner Repository
// File: crates/petclinic-infrastructure/src/database/postgres/owner_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use petclinic_core::domain::{Owner, Pet, PetType, Visit};
use petclinic_core::error::DomainError;
use petclinic_core::repositories::OwnerRepository;
use petclinic_shared::{Page, PageRequest};

pub struct PgOwnerRepository {
    pool: PgPool,
}

impl PgOwnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load pets (with type and visits) for the given owners and attach them.
    async fn attach_pets(&self, owners: &mut [Owner]) -> Result<(), DomainError> {
        let owner_ids: Vec<i32> = owners.iter().filter_map(|o| o.id).collect();
        if owner_ids.is_empty() {
            return Ok(());
        }

        let pets: Vec<PetRow> = sqlx::query_as(
            r#"
            SELECT
                p.id, p.name, p.birth_date, p.owner_id,
                t.id AS type_id, t.name AS type_name
            FROM pets p
            JOIN types t ON t.id = p.type_id
            WHERE p.owner_id = ANY($1)
            ORDER BY p.id
            "#
        )
        .bind(&owner_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error loading pets: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let pet_ids: Vec<i32> = pets.iter().map(|p| p.id).collect();
        let visits: Vec<VisitRow> = if pet_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as(
                r#"
                SELECT id, pet_id, visit_date, description
                FROM visits
                WHERE pet_id = ANY($1)
                ORDER BY visit_date, id
                "#
            )
            .bind(&pet_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error loading visits: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?
        };

        assemble(owners, pets, visits);
        Ok(())
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct OwnerRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl From<OwnerRow> for Owner {
    fn from(row: OwnerRow) -> Self {
        Owner {
            id: Some(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            address: row.address,
            city: row.city,
            telephone: row.telephone,
            pets: Vec::new(),
        }
    }
}

#[derive(Debug, FromRow)]
struct PetRow {
    pub id: i32,
    pub name: String,
    pub birth_date: NaiveDate,
    pub owner_id: i32,
    pub type_id: i32,
    pub type_name: String,
}

#[derive(Debug, FromRow)]
struct VisitRow {
    pub id: i32,
    pub pet_id: i32,
    pub visit_date: NaiveDate,
    pub description: String,
}

/// Distribute pet and visit rows onto their owners, keeping row order.
fn assemble(owners: &mut [Owner], pets: Vec<PetRow>, visits: Vec<VisitRow>) {
    let mut visits_by_pet: HashMap<i32, Vec<Visit>> = HashMap::new();
    for row in visits {
        visits_by_pet.entry(row.pet_id).or_default().push(Visit {
            id: Some(row.id),
            date: row.visit_date,
            description: row.description,
        });
    }

    let mut pets_by_owner: HashMap<i32, Vec<Pet>> = HashMap::new();
    for row in pets {
        let pet = Pet {
            id: Some(row.id),
            name: row.name,
            birth_date: row.birth_date,
            pet_type: PetType { id: Some(row.type_id), name: row.type_name },
            visits: visits_by_pet.remove(&row.id).unwrap_or_default(),
        };
        pets_by_owner.entry(row.owner_id).or_default().push(pet);
    }

    for owner in owners.iter_mut() {
        if let Some(pets) = owner.id.and_then(|id| pets_by_owner.remove(&id)) {
            owner.pets = pets;
        }
    }
}

/// Turn a last-name prefix into a LIKE pattern, escaping wildcard characters.
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl OwnerRepository for PgOwnerRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Owner>, DomainError> {
        let row: Option<OwnerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding owner by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut owners = [Owner::from(row)];
        self.attach_pets(&mut owners).await?;
        let [owner] = owners;
        Ok(Some(owner))
    }

    async fn find_by_last_name_starting_with(
        &self,
        last_name: &str,
        page: PageRequest,
    ) -> Result<Page<Owner>, DomainError> {
        let pattern = prefix_pattern(last_name);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM owners
            WHERE last_name LIKE $1 ESCAPE '\'
            "#
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error counting owners: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let rows: Vec<OwnerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            WHERE last_name LIKE $1 ESCAPE '\'
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#
        )
        .bind(&pattern)
        .bind(page.page_size as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error searching owners: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut owners: Vec<Owner> = rows.into_iter().map(Owner::from).collect();
        self.attach_pets(&mut owners).await?;

        Ok(Page::new(owners, page, total.max(0) as u64))
    }

    async fn create(&self, owner: &Owner) -> Result<Owner, DomainError> {
        info!("Creating owner: {}", owner.full_name());

        let row: OwnerRow = sqlx::query_as(
            r#"
            INSERT INTO owners (first_name, last_name, address, city, telephone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, address, city, telephone
            "#
        )
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(&owner.address)
        .bind(&owner.city)
        .bind(&owner.telephone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating owner: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Owner created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, owner: &Owner) -> Result<Owner, DomainError> {
        let id = owner
            .id
            .ok_or_else(|| DomainError::InternalError("cannot update an owner without id".into()))?;

        let row: Option<OwnerRow> = sqlx::query_as(
            r#"
            UPDATE owners
            SET
                first_name = $2,
                last_name = $3,
                address = $4,
                city = $5,
                telephone = $6
            WHERE id = $1
            RETURNING id, first_name, last_name, address, city, telephone
            "#
        )
        .bind(id)
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(&owner.address)
        .bind(&owner.city)
        .bind(&owner.telephone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating owner: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut updated: Owner = row.ok_or(DomainError::OwnerNotFound(id))?.into();
        updated.pets = owner.pets.clone();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn owner(id: i32, last_name: &str) -> Owner {
        OwnerRow {
            id,
            first_name: "First".into(),
            last_name: last_name.into(),
            address: "1 Street".into(),
            city: "Madison".into(),
            telephone: "6085550000".into(),
        }
        .into()
    }

    fn pet(id: i32, owner_id: i32, name: &str) -> PetRow {
        PetRow {
            id,
            name: name.into(),
            birth_date: date(2012, 9, 4),
            owner_id,
            type_id: 1,
            type_name: "cat".into(),
        }
    }

    fn visit(id: i32, pet_id: i32, day: u32) -> VisitRow {
        VisitRow {
            id,
            pet_id,
            visit_date: date(2013, 1, day),
            description: "rabies shot".into(),
        }
    }

    #[test]
    fn test_prefix_pattern_escapes_wildcards() {
        assert_eq!(prefix_pattern(""), "%");
        assert_eq!(prefix_pattern("Dav"), "Dav%");
        assert_eq!(prefix_pattern("50%_off\\"), "50\\%\\_off\\\\%");
    }

    #[test]
    fn test_assemble_groups_pets_and_visits() {
        let mut owners = vec![owner(6, "Coleman"), owner(1, "Franklin"), owner(2, "Davis")];
        let pets = vec![pet(1, 1, "Leo"), pet(7, 6, "Samantha"), pet(8, 6, "Max")];
        let visits = vec![visit(1, 7, 1), visit(2, 8, 2), visit(3, 8, 3), visit(4, 7, 4)];

        assemble(&mut owners, pets, visits);

        let coleman = &owners[0];
        let names: Vec<&str> = coleman.pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Samantha", "Max"]);
        assert_eq!(coleman.pets[0].visits.len(), 2);
        assert_eq!(coleman.pets[1].visits[0].date, date(2013, 1, 2));
        assert_eq!(owners[1].pets[0].pet_type.name, "cat");
        assert!(owners[1].pets[0].visits.is_empty());
        assert!(owners[2].pets.is_empty());
    }
}
