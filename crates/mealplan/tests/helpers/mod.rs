use std::{path::PathBuf, str::FromStr, sync::Arc};

use glucoplan_mealplan::{Catalog, PlanService, Planner, SqliteStore};
use glucoplan_shared::mealplan::Allergen;
use glucoplan_shared::user::{DiabetesClass, Profile};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::migrator::{Migrate, Plan};

pub struct TestState {
    pub pool: SqlitePool,
    pub store: SqliteStore,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    glucoplan_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(TestState {
        store: SqliteStore::new(pool.clone(), pool.clone()),
        pool,
    })
}

#[allow(dead_code)]
pub async fn setup_test_service(
    path: PathBuf,
    seed: u64,
) -> anyhow::Result<PlanService<SqliteStore>> {
    let state = setup_test_state(path).await?;

    Ok(PlanService::new(planner(), state.store).with_seed(Some(seed)))
}

#[allow(dead_code)]
pub fn planner() -> Planner {
    Planner::new(Arc::new(Catalog::builtin().unwrap())).unwrap()
}

#[allow(dead_code)]
pub fn profile(diabetes_class: DiabetesClass, allergens: Vec<Allergen>) -> Profile {
    Profile {
        allergens,
        diabetes_class,
        onboarding_complete: true,
        ..Default::default()
    }
}
