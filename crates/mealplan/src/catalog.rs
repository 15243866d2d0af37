use std::collections::HashSet;
use std::path::Path;

use glucoplan_shared::mealplan::{Allergen, Dish, LunchPattern, Slot};
use serde::Deserialize;
use strum::{AsRefStr, Display, VariantArray};

use crate::filter::filter_by_allergens;

const BUILTIN: &str = include_str!("../data/catalog.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog pool `{0}` is empty")]
    EmptyPool(Pool),

    #[error("dish `{id}` appears twice in pool `{pool}`")]
    DuplicateId { pool: Pool, id: String },

    #[error("dish `{id}` in pool `{pool}` is flagged as carb-heavy")]
    UnexpectedCarbs { pool: Pool, id: String },

    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}

/// Named dish pools of the catalog.
#[derive(VariantArray, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum Pool {
    Breakfast,
    MorningSnack,
    LunchCarbs,
    LunchLegumes,
    LunchVegetables,
    AfternoonSnack,
    DinnerLowCarb,
    DinnerFlexible,
}

impl Pool {
    pub fn for_lunch(pattern: LunchPattern) -> Self {
        match pattern {
            LunchPattern::Carbs => Pool::LunchCarbs,
            LunchPattern::Legumes => Pool::LunchLegumes,
            LunchPattern::Vegetables => Pool::LunchVegetables,
        }
    }

    /// Carb-compensation rule: a restricted profile eating a carb-heavy
    /// lunch gets a low-carb dinner.
    pub fn for_dinner(lunch_has_carbs: bool, unrestricted: bool) -> Self {
        if !unrestricted && lunch_has_carbs {
            Pool::DinnerLowCarb
        } else {
            Pool::DinnerFlexible
        }
    }

    pub fn for_slot(
        slot: Slot,
        pattern: LunchPattern,
        lunch_has_carbs: bool,
        unrestricted: bool,
    ) -> Self {
        match slot {
            Slot::Breakfast => Pool::Breakfast,
            Slot::MorningSnack => Pool::MorningSnack,
            Slot::Lunch => Pool::for_lunch(pattern),
            Slot::AfternoonSnack => Pool::AfternoonSnack,
            Slot::Dinner => Pool::for_dinner(lunch_has_carbs, unrestricted),
        }
    }
}

/// Read-only dish pools, one per [`Pool`].
///
/// Filtered copies produced by [`Catalog::for_allergens`] share this type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Catalog {
    pub breakfast: Vec<Dish>,
    pub morning_snack: Vec<Dish>,
    pub lunch_carbs: Vec<Dish>,
    pub lunch_legumes: Vec<Dish>,
    pub lunch_vegetables: Vec<Dish>,
    pub afternoon_snack: Vec<Dish>,
    pub dinner_low_carb: Vec<Dish>,
    pub dinner_flexible: Vec<Dish>,
}

impl Catalog {
    /// Catalog bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses and validates a catalog document.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(content)?;
        catalog.validate()?;

        Ok(catalog)
    }

    pub fn pool(&self, pool: Pool) -> &[Dish] {
        match pool {
            Pool::Breakfast => &self.breakfast,
            Pool::MorningSnack => &self.morning_snack,
            Pool::LunchCarbs => &self.lunch_carbs,
            Pool::LunchLegumes => &self.lunch_legumes,
            Pool::LunchVegetables => &self.lunch_vegetables,
            Pool::AfternoonSnack => &self.afternoon_snack,
            Pool::DinnerLowCarb => &self.dinner_low_carb,
            Pool::DinnerFlexible => &self.dinner_flexible,
        }
    }

    fn pool_mut(&mut self, pool: Pool) -> &mut Vec<Dish> {
        match pool {
            Pool::Breakfast => &mut self.breakfast,
            Pool::MorningSnack => &mut self.morning_snack,
            Pool::LunchCarbs => &mut self.lunch_carbs,
            Pool::LunchLegumes => &mut self.lunch_legumes,
            Pool::LunchVegetables => &mut self.lunch_vegetables,
            Pool::AfternoonSnack => &mut self.afternoon_snack,
            Pool::DinnerLowCarb => &mut self.dinner_low_carb,
            Pool::DinnerFlexible => &mut self.dinner_flexible,
        }
    }

    /// Checks the invariants the planner relies on.
    ///
    /// # Business Rules
    /// - Every pool holds at least one dish
    /// - Ids are unique within a pool (the same dish may sit in several pools)
    /// - Only the carb-heavy lunch pool may flag `has_carbs`
    pub fn validate(&self) -> Result<(), CatalogError> {
        for pool in Pool::VARIANTS {
            let dishes = self.pool(*pool);
            if dishes.is_empty() {
                return Err(CatalogError::EmptyPool(*pool));
            }

            let mut seen = HashSet::new();
            for dish in dishes {
                if !seen.insert(dish.id.as_str()) {
                    return Err(CatalogError::DuplicateId {
                        pool: *pool,
                        id: dish.id.to_owned(),
                    });
                }

                if dish.has_carbs && *pool != Pool::LunchCarbs {
                    return Err(CatalogError::UnexpectedCarbs {
                        pool: *pool,
                        id: dish.id.to_owned(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Copy of the catalog with every pool passed through the allergen filter.
    pub fn for_allergens(&self, excluded: &[Allergen]) -> Catalog {
        let mut filtered = self.clone();
        if excluded.is_empty() {
            return filtered;
        }

        for pool in Pool::VARIANTS {
            let dishes = filter_by_allergens(self.pool(*pool), excluded);
            if dishes.iter().any(|dish| dish.contains_any(excluded)) {
                tracing::warn!(
                    pool = pool.as_ref(),
                    ?excluded,
                    "no dish satisfies the allergen filter, keeping the whole pool"
                );
            }

            *filtered.pool_mut(*pool) = dishes;
        }

        filtered
    }

    pub fn len(&self) -> usize {
        Pool::VARIANTS.iter().map(|p| self.pool(*p).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
