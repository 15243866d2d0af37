use std::path::PathBuf;

use clap::Subcommand;
use glucoplan::config::Config;
use glucoplan_mealplan::{Catalog, Pool};
use glucoplan_shared::user::Profile;
use strum::VariantArray;

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// Validate a catalog and report how many dishes the profile can eat
    Check {
        /// Catalog file, defaults to the configured one
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn run(config: Config, profile: Profile, command: CatalogCommand) -> anyhow::Result<()> {
    let CatalogCommand::Check { path } = command;

    let catalog = match path {
        Some(path) => Catalog::from_path(&path)?,
        None => glucoplan::load_catalog(&config)?,
    };

    println!("{:<18} {:>6} {:>6}", "pool", "dishes", "safe");
    for pool in Pool::VARIANTS {
        let allowed = catalog
            .pool(*pool)
            .iter()
            .filter(|dish| !dish.contains_any(&profile.allergens))
            .count();
        if allowed == 0 {
            tracing::warn!("every {pool} dish contains an excluded allergen");
        }

        println!(
            "{:<18} {:>6} {:>6}",
            pool.as_ref(),
            catalog.pool(*pool).len(),
            allowed
        );
    }

    tracing::info!(dishes = catalog.len(), "catalog is valid");

    Ok(())
}
