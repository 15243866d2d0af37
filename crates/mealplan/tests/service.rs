use glucoplan_mealplan::{PlanStore, SwapOutcome, WINDOW_DAYS, window};
use glucoplan_shared::mealplan::Slot;
use glucoplan_shared::user::{DiabetesClass, Profile};
use temp_dir::TempDir;
use time::{Duration, macros::date};

mod helpers;

#[tokio::test]
async fn test_boot_generates_then_syncs() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let service = helpers::setup_test_service(path, 1).await?;
    let profile = helpers::profile(DiabetesClass::Mody2, vec![]);
    let today = date!(2025 - 05 - 10);

    let view = service.boot("john", &profile, today).await?;
    assert_eq!(view.days.len(), 15);
    assert_eq!(view.days[0].date, today);
    assert!(view.tracking.is_empty());

    let again = service.boot("john", &profile, today).await?;
    assert_eq!(again.days, view.days, "same-day boot keeps the plan");

    let later = today + Duration::days(3);
    let synced = service.boot("john", &profile, later).await?;
    let (start, end) = window(later);
    assert_eq!(synced.days.first().map(|d| d.date), Some(start));
    assert_eq!(synced.days.last().map(|d| d.date), Some(end));
    assert_eq!(synced.days.len() as i64, WINDOW_DAYS);
    assert_eq!(synced.day(start), view.day(start));

    Ok(())
}

#[tokio::test]
async fn test_boot_requires_onboarding() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let service = helpers::setup_test_service(path, 1).await?;

    let result = service
        .boot("john", &Profile::default(), date!(2025 - 05 - 10))
        .await;

    assert!(matches!(result, Err(glucoplan_shared::Error::Forbidden(_))));

    Ok(())
}

#[tokio::test]
async fn test_concurrent_boots_converge() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let service = helpers::setup_test_service(path, 2).await?;
    let profile = helpers::profile(DiabetesClass::Type2, vec![]);
    let today = date!(2025 - 05 - 10);

    let (a, b) = futures::future::join(
        service.boot("john", &profile, today),
        service.boot("john", &profile, today),
    )
    .await;
    a?;
    b?;

    let view = service.show("john", today).await?;
    assert_eq!(view.days.len(), 15);

    Ok(())
}

#[tokio::test]
async fn test_swap_replaces_one_slot() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let service = helpers::setup_test_service(path, 3).await?;
    let profile = helpers::profile(DiabetesClass::Type1, vec![]);
    let today = date!(2025 - 05 - 10);

    let view = service.boot("john", &profile, today).await?;
    let before = view.day(today).unwrap().clone();

    let SwapOutcome::Swapped(after) = service
        .swap("john", &profile, today, Slot::Dinner, &[])
        .await?
    else {
        panic!("dinner should have alternatives");
    };

    assert_ne!(after.meals.dinner.id, before.meals.dinner.id);
    assert!(after.meals.dinner.medication_linked);
    assert_eq!(after.meals.breakfast, before.meals.breakfast);
    assert_eq!(after.meals.morning_snack, before.meals.morning_snack);
    assert_eq!(after.meals.lunch, before.meals.lunch);
    assert_eq!(after.meals.afternoon_snack, before.meals.afternoon_snack);
    if before.lunch_has_carbs {
        assert!(
            service
                .planner()
                .catalog()
                .dinner_low_carb
                .contains(&after.meals.dinner.dish)
        );
    }

    let stored = service.show("john", today).await?;
    assert_eq!(stored.day(today), Some(&after));
    for day in stored.days.iter().filter(|day| day.date != today) {
        assert_eq!(Some(day), view.day(day.date));
    }

    Ok(())
}

#[tokio::test]
async fn test_swap_lunch_updates_carb_flag() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let service = helpers::setup_test_service(path, 4).await?;
    let profile = helpers::profile(DiabetesClass::Mody3, vec![]);
    let today = date!(2025 - 05 - 10);

    service.boot("john", &profile, today).await?;

    let SwapOutcome::Swapped(after) = service
        .swap("john", &profile, today, Slot::Lunch, &[])
        .await?
    else {
        panic!("lunch should have alternatives");
    };

    assert_eq!(after.lunch_has_carbs, after.meals.lunch.has_carbs);

    Ok(())
}

#[tokio::test]
async fn test_swap_without_alternative_is_unchanged() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let service = helpers::setup_test_service(path, 5).await?;
    let profile = helpers::profile(DiabetesClass::Mody2, vec![]);
    let today = date!(2025 - 05 - 10);

    let view = service.boot("john", &profile, today).await?;
    let blacklist: Vec<String> = service
        .planner()
        .catalog()
        .breakfast
        .iter()
        .map(|dish| dish.id.clone())
        .collect();

    let outcome = service
        .swap("john", &profile, today, Slot::Breakfast, &blacklist)
        .await?;

    assert_eq!(outcome, SwapOutcome::Unchanged);
    assert_eq!(service.show("john", today).await?.days, view.days);

    Ok(())
}

#[tokio::test]
async fn test_swap_unknown_day_is_not_found() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let service = helpers::setup_test_service(path, 6).await?;
    let profile = helpers::profile(DiabetesClass::Mody2, vec![]);

    let result = service
        .swap("john", &profile, date!(2025 - 05 - 10), Slot::Lunch, &[])
        .await;

    assert!(matches!(result, Err(glucoplan_shared::Error::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_tracking_toggles() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let service = helpers::setup_test_service(path, 7).await?;
    let today = date!(2025 - 05 - 10);

    let record = service.toggle_meal("john", today, Slot::Lunch).await?;
    assert!(record.completed.contains(&Slot::Lunch));

    let record = service
        .toggle_medication("john", today, Slot::Breakfast)
        .await?;
    assert!(record.completed.contains(&Slot::Lunch));
    assert!(record.medication_taken.contains(&Slot::Breakfast));

    let record = service.toggle_meal("john", today, Slot::Lunch).await?;
    assert!(record.completed.is_empty());

    let result = service
        .toggle_medication("john", today, Slot::AfternoonSnack)
        .await;
    assert!(matches!(result, Err(glucoplan_shared::Error::Validate(_))));

    let view = service.show("john", today).await?;
    assert_eq!(view.tracking.get(&today), Some(&record));

    Ok(())
}

#[tokio::test]
async fn test_regenerate_and_reset() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let store = state.store.clone();
    let service = glucoplan_mealplan::PlanService::new(helpers::planner(), state.store)
        .with_seed(Some(8));
    let profile = helpers::profile(DiabetesClass::Type2, vec![]);
    let today = date!(2025 - 05 - 10);

    service.boot("john", &profile, today).await?;
    service.toggle_meal("john", today, Slot::Dinner).await?;

    let later = today + Duration::days(2);
    let days = service.regenerate("john", &profile, later).await?;
    assert_eq!(days[0].date, later);
    assert!(store.load_tracking("john").await?.is_empty());
    assert_eq!(store.load_days("john", today).await?, days);

    service.reset("john").await?;
    assert!(store.load_days("john", today).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_boot_deletes_evicted_days() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let store = state.store.clone();
    let service = glucoplan_mealplan::PlanService::new(helpers::planner(), state.store)
        .with_seed(Some(9));
    let profile = helpers::profile(DiabetesClass::Mody2, vec![]);
    let today = date!(2025 - 05 - 10);

    service.boot("john", &profile, today).await?;
    service.toggle_meal("john", today, Slot::Lunch).await?;

    let later = today + Duration::days(4);
    let view = service.boot("john", &profile, later).await?;
    let (start, _) = window(later);

    let stored = store.load_days("john", today).await?;
    assert_eq!(stored.first().map(|day| day.date), Some(start));
    assert_eq!(stored, view.days);
    assert!(store.load_tracking("john").await?.is_empty());
    assert!(view.tracking.is_empty());

    let (evicted,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM daily_menu WHERE user_id = ? AND day < ?")
            .bind("john")
            .bind(start.to_string())
            .fetch_one(&state.pool)
            .await?;
    assert_eq!(evicted, 0);

    Ok(())
}

#[tokio::test]
async fn test_boot_without_seed() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let service = glucoplan_mealplan::PlanService::new(helpers::planner(), state.store);
    let profile = helpers::profile(DiabetesClass::Lada, vec![]);
    let today = date!(2025 - 05 - 10);

    let view = service.boot("john", &profile, today).await?;

    assert_eq!(view.days.len(), 15);
    assert_eq!(view.days[0].date, today);
    for day in view.days.iter().filter(|day| day.lunch_has_carbs) {
        assert!(
            service
                .planner()
                .catalog()
                .dinner_low_carb
                .contains(&day.meals.dinner.dish)
        );
    }

    Ok(())
}
