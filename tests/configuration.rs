use glucoplan::Config;
use glucoplan_shared::mealplan::Allergen;
use glucoplan_shared::user::DiabetesClass;
use temp_dir::TempDir;

#[test]
fn test_config_loads_from_toml_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("glucoplan.toml");
    std::fs::write(
        &path,
        r#"
[database]
url = "sqlite:plans.db"
max_connections = 3

[planner]
timezone = "Europe/Paris"
user_id = "john"
seed = 7

[profile]
diabetes_class = "type1"
allergens = ["gluten", "tree_nuts"]
onboarding_complete = true
"#,
    )?;

    let config = Config::load(Some(path.display().to_string()))?;

    assert_eq!(config.database.max_connections, 3);
    assert_eq!(config.planner.timezone, "Europe/Paris");
    assert_eq!(config.planner.user_id, "john");
    assert_eq!(config.planner.seed, Some(7));
    assert_eq!(config.planner.catalog_path, None);
    assert_eq!(config.profile.diabetes_class, DiabetesClass::Type1);
    assert_eq!(
        config.profile.allergens,
        vec![Allergen::Gluten, Allergen::TreeNuts]
    );
    assert!(config.profile.onboarding_complete);
    assert_eq!(config.observability.log_level, "info");
    assert!(config.validate().is_ok());

    Ok(())
}

#[test]
fn test_config_defaults_without_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.child("missing.toml");

    let config = Config::load(Some(missing.display().to_string()))?;

    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.planner.timezone, "UTC");
    assert_eq!(config.planner.user_id, "default");
    assert!(!config.profile.onboarding_complete);
    assert!(config.validate().is_ok());

    Ok(())
}

#[test]
fn test_config_rejects_unknown_allergen() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("glucoplan.toml");
    std::fs::write(&path, "[profile]\nallergens = [\"peanuts\"]\n")?;

    assert!(Config::load(Some(path.display().to_string())).is_err());

    Ok(())
}
