use glucoplan_shared::mealplan::{Day, LunchPattern, Meals, PlannedMeal, Slot};
use time::Date;

use crate::catalog::{Catalog, Pool};
use crate::history::History;
use crate::selection::{Randomness, pick};

/// Composes one day from already filtered pools.
///
/// # Business Rules
/// - Lunch pattern rotates with `day_index` (carbs, legumes, vegetables)
/// - Restricted profiles eating a carb-heavy lunch get a low-carb dinner
/// - Breakfast and dinner carry a medication reminder unless unrestricted
/// - Picks skip recent and upcoming ids of the same slot
/// - Every pick is appended to the returned history
pub fn synthesize<R: Randomness + ?Sized>(
    date: Date,
    day_index: usize,
    history: History,
    pools: &Catalog,
    unrestricted: bool,
    rng: &mut R,
) -> (Day, History) {
    let pattern = LunchPattern::for_day_index(day_index);
    let medication_linked = !unrestricted;

    let mut history = history;
    let mut choose = |slot: Slot, pool: Pool, medication_linked: bool| {
        let avoided = history.avoided(slot);
        let dish = pick(pools.pool(pool), &avoided, avoided.len(), &mut *rng).clone();
        history = std::mem::take(&mut history).with(slot, &dish.id);

        PlannedMeal::new(dish, medication_linked)
    };

    let breakfast = choose(Slot::Breakfast, Pool::Breakfast, medication_linked);
    let morning_snack = choose(Slot::MorningSnack, Pool::MorningSnack, false);
    let lunch = choose(Slot::Lunch, Pool::for_lunch(pattern), false);
    let afternoon_snack = choose(Slot::AfternoonSnack, Pool::AfternoonSnack, false);

    let lunch_has_carbs = lunch.has_carbs;
    let dinner_pool = Pool::for_dinner(lunch_has_carbs, unrestricted);
    let dinner = choose(Slot::Dinner, dinner_pool, medication_linked);

    tracing::debug!(
        %date,
        %pattern,
        lunch = %lunch.id,
        dinner = %dinner.id,
        dinner_pool = dinner_pool.as_ref(),
        "day synthesized"
    );

    let day = Day {
        date,
        pattern,
        lunch_has_carbs,
        meals: Meals {
            breakfast,
            morning_snack,
            lunch,
            afternoon_snack,
            dinner,
        },
    };

    (day, history)
}
