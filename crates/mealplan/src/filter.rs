use glucoplan_shared::mealplan::{Allergen, Dish};

/// Removes dishes tagged with any of the excluded allergens.
///
/// # Business Rules
/// - **No exclusions**: the pool is returned unchanged
/// - **Any match excludes**: a dish is dropped when one of its tags is excluded
/// - **Fail-open**: when nothing survives, the unfiltered pool is returned so
///   a slot is never left without candidates
pub fn filter_by_allergens(dishes: &[Dish], excluded: &[Allergen]) -> Vec<Dish> {
    if excluded.is_empty() {
        return dishes.to_vec();
    }

    let safe: Vec<Dish> = dishes
        .iter()
        .filter(|dish| !dish.contains_any(excluded))
        .cloned()
        .collect();

    if safe.is_empty() {
        return dishes.to_vec();
    }

    safe
}
