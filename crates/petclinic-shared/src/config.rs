//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::error::AppError;
use crate::types::VisitTally;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub clinic: ClinicSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClinicSettings {
    pub page_size: u32,
    pub visit_tally: VisitTally,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder(&env)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        Self::from_config(config)
    }

    /// Defaults shared by every environment. Sources added on top override them.
    pub fn builder(env: &str) -> Result<ConfigBuilder<DefaultState>, AppError> {
        Ok(Config::builder()
            .set_default("app.env", env)?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "petclinic-server")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("clinic.page_size", DEFAULT_PAGE_SIZE as i64)?
            .set_default("clinic.visit_tally", "last_pet")?
            .set_default("log.level", "info")?)
    }

    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let settings: AppConfig = config.try_deserialize()?;
        if settings.clinic.page_size == 0 {
            return Err(AppError::InvalidConfig("clinic.page_size must be at least 1".into()));
        }
        if settings.database.min_connections > settings.database.max_connections {
            return Err(AppError::InvalidConfig(
                "database.min_connections exceeds database.max_connections".into(),
            ));
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(overrides: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let mut builder = AppConfig::builder("test")?
            .set_override("database.url", "postgres://petclinic@localhost/petclinic")?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        AppConfig::from_config(builder.build()?)
    }

    #[test]
    fn test_defaults() {
        let config = build(&[]).unwrap();
        assert_eq!(config.app.env, "test");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.clinic.page_size, 5);
        assert_eq!(config.clinic.visit_tally, VisitTally::LastPet);
        assert!(config.log.directory.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = build(&[("clinic.page_size", "10"), ("clinic.visit_tally", "all_pets")]).unwrap();
        assert_eq!(config.clinic.page_size, 10);
        assert_eq!(config.clinic.visit_tally, VisitTally::AllPets);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = build(&[("clinic.page_size", "0")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_database_url_rejected() {
        let config = AppConfig::builder("test").unwrap().build().unwrap();
        assert!(matches!(AppConfig::from_config(config), Err(AppError::ConfigError(_))));
    }
}
