// Service configuration
// Defaults, then an optional config.toml, then APP_* environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_address: String,
    // JSON inventory to serve; an empty catalog is served when unset
    pub inventory_path: Option<String>,
    pub dealership_name: String,
    pub default_interest_rate: f64,
    pub cache_capacity: usize,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("config").required(false))
                .add_source(Environment::with_prefix("APP").try_parsing(true)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let settings = builder
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("dealership_name", "Autotalo")?
            .set_default("default_interest_rate", 4.9)?
            .set_default("cache_capacity", 256)?
            .build()
            .context("Failed to assemble configuration sources")?
            .try_deserialize()
            .context("Failed to deserialize settings")?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn defaults_apply_without_sources() {
        let settings = Settings::from_builder(Config::builder()).unwrap();
        assert_eq!(settings.server_address, "127.0.0.1:3000");
        assert_eq!(settings.dealership_name, "Autotalo");
        assert_eq!(settings.default_interest_rate, 4.9);
        assert_eq!(settings.cache_capacity, 256);
        assert!(settings.inventory_path.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let toml = r#"
            server_address = "0.0.0.0:8080"
            inventory_path = "data/inventory.json"
            dealership_name = "Kaupunkiauto"
            default_interest_rate = 3.9
        "#;
        let settings = Settings::from_builder(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
        .unwrap();
        assert_eq!(settings.server_address, "0.0.0.0:8080");
        assert_eq!(settings.inventory_path.as_deref(), Some("data/inventory.json"));
        assert_eq!(settings.dealership_name, "Kaupunkiauto");
        assert_eq!(settings.default_interest_rate, 3.9);
        assert_eq!(settings.cache_capacity, 256);
    }
}
