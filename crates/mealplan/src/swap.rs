use glucoplan_shared::mealplan::{DayContext, Dish, PlannedMeal, Slot};
use glucoplan_shared::user::Profile;

use crate::catalog::{Catalog, Pool};
use crate::scheduler::Planner;
use crate::selection::Randomness;

/// Picks a replacement for the meal in `slot` of a day described by
/// `context`.
///
/// # Business Rules
/// - The candidate pool is chosen exactly as when the day was synthesized
/// - The current dish and every blacklisted id are never proposed
/// - Returns `None` when no candidate is left
/// - The medication reminder survives only if the current meal had one and
///   the profile is restricted
pub fn resolve_swap<R: Randomness + ?Sized>(
    pools: &Catalog,
    slot: Slot,
    current: &PlannedMeal,
    unrestricted: bool,
    blacklist: &[String],
    context: DayContext,
    rng: &mut R,
) -> Option<PlannedMeal> {
    let pool = Pool::for_slot(slot, context.pattern, context.lunch_has_carbs, unrestricted);
    let candidates: Vec<&Dish> = pools
        .pool(pool)
        .iter()
        .filter(|dish| dish.id != current.id && !blacklist.contains(&dish.id))
        .collect();

    if candidates.is_empty() {
        tracing::debug!(
            %slot,
            pool = pool.as_ref(),
            current = %current.id,
            "no alternative left for swap"
        );
        return None;
    }

    let dish = candidates[rng.index(candidates.len())].clone();

    Some(PlannedMeal::new(
        dish,
        current.medication_linked && !unrestricted,
    ))
}

impl Planner {
    /// Alternative for a single meal under the profile's current allergens.
    pub fn swap<R: Randomness + ?Sized>(
        &self,
        slot: Slot,
        current: &PlannedMeal,
        profile: &Profile,
        blacklist: &[String],
        context: DayContext,
        rng: &mut R,
    ) -> Option<PlannedMeal> {
        let pools = self.catalog().for_allergens(&profile.allergens);

        resolve_swap(
            &pools,
            slot,
            current,
            profile.is_unrestricted(),
            blacklist,
            context,
            rng,
        )
    }
}
