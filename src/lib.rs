pub mod config;
pub mod db;
pub mod observability;

pub use config::Config;
pub use db::{create_read_pool, create_write_pool, migrate};

use std::sync::Arc;

use anyhow::Context;
use glucoplan_mealplan::{Catalog, PlanService, Planner, SqliteStore};
use glucoplan_shared::user::Profile;

/// Bundled catalog, or the file named by `planner.catalog_path`
pub fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    let catalog = match &config.planner.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Catalog::builtin()?,
    };

    tracing::debug!(dishes = catalog.len(), "catalog loaded");

    Ok(catalog)
}

/// Profile from a JSON file when given, otherwise the `[profile]` section
pub fn load_profile(config: &Config, path: Option<&str>) -> anyhow::Result<Profile> {
    let Some(path) = path else {
        return Ok(config.profile.clone());
    };

    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read profile {path}"))?;

    serde_json::from_str(&content).with_context(|| format!("invalid profile {path}"))
}

/// Plan service wired to the configured SQLite database
pub async fn plan_service(config: &Config) -> anyhow::Result<PlanService<SqliteStore>> {
    let planner = Planner::new(Arc::new(load_catalog(config)?))?;

    let write_db = create_write_pool(&config.database.url).await?;
    let read_db = create_read_pool(&config.database.url, config.database.max_connections).await?;

    Ok(PlanService::new(planner, SqliteStore::new(read_db, write_db))
        .with_seed(config.planner.seed))
}
