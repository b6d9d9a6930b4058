//! Database connection pool

use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub async fn create_pool(url: &str, max_connections: u32, min_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(url)
        .await
}

/// Apply the embedded schema and sample-data migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_owner_columns_are_not_length_capped() {
        let migrator = sqlx::migrate!("./migrations");
        let schema = migrator
            .iter()
            .find(|m| m.description == "schema")
            .expect("schema migration is embedded");

        let owners = schema.sql.split("CREATE TABLE IF NOT EXISTS owners").nth(1).unwrap();
        let owners = owners.split(");").next().unwrap();
        for column in ["first_name", "last_name", "address", "city"] {
            let line = owners.lines().find(|l| l.trim_start().starts_with(column)).unwrap();
            assert!(line.contains("TEXT"), "{column} should be unbounded: {line}");
        }
    }
}
