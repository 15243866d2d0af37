use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use glucoplan_shared::user::Profile;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub planner: PlannerConfig,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// IANA name used to decide what "today" is
    pub timezone: String,
    /// User the CLI acts on when `--user` is not given
    pub user_id: String,
    /// Replaces the bundled catalog
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Fixed seed for reproducible plans
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (GLUCOPLAN__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("database.url", "sqlite:glucoplan.db")?
            .set_default("database.max_connections", 5)?
            .set_default("planner.timezone", "UTC")?
            .set_default("planner.user_id", "default")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // The file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("GLUCOPLAN")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if time_tz::timezones::get_by_name(&self.planner.timezone).is_none() {
            return Err(format!("Unknown timezone: {}", self.planner.timezone));
        }
        if self.planner.user_id.trim().is_empty() {
            return Err("Planner user_id must not be empty".to_string());
        }
        if let Some(path) = &self.planner.catalog_path
            && !path.exists()
        {
            return Err(format!("Catalog file not found: {}", path.display()));
        }
        Ok(())
    }
}
