use std::collections::BTreeSet;
use std::ops::Deref;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;

#[derive(
    Encode,
    Decode,
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Allergen {
    Gluten,
    Dairy,
    TreeNuts,
    Shellfish,
    Egg,
}

/// A catalog entry. `has_carbs` only carries meaning for lunch dishes.
#[derive(Encode, Decode, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<Allergen>,
    #[serde(default)]
    pub has_carbs: bool,
}

impl Dish {
    pub fn contains_any(&self, excluded: &[Allergen]) -> bool {
        self.allergens.iter().any(|a| excluded.contains(a))
    }
}

#[derive(
    Encode,
    Decode,
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LunchPattern {
    Carbs,
    Legumes,
    Vegetables,
}

impl LunchPattern {
    /// Pattern for the n-th day of a generation pass, rotating
    /// carbs, legumes, vegetables.
    pub fn for_day_index(day_index: usize) -> Self {
        Self::VARIANTS[day_index % Self::VARIANTS.len()]
    }
}

#[derive(
    Encode,
    Decode,
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Dinner,
}

impl Slot {
    /// Slots a medication intake can be attached to.
    pub fn takes_medication(&self) -> bool {
        matches!(self, Slot::Breakfast | Slot::Dinner)
    }
}

#[derive(Encode, Decode, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMeal {
    #[serde(flatten)]
    pub dish: Dish,
    #[serde(default)]
    pub medication_linked: bool,
}

impl PlannedMeal {
    pub fn new(dish: Dish, medication_linked: bool) -> Self {
        Self {
            dish,
            medication_linked,
        }
    }
}

impl Deref for PlannedMeal {
    type Target = Dish;

    fn deref(&self) -> &Self::Target {
        &self.dish
    }
}

#[derive(Encode, Decode, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: PlannedMeal,
    pub morning_snack: PlannedMeal,
    pub lunch: PlannedMeal,
    pub afternoon_snack: PlannedMeal,
    pub dinner: PlannedMeal,
}

impl Meals {
    pub fn get(&self, slot: Slot) -> &PlannedMeal {
        match slot {
            Slot::Breakfast => &self.breakfast,
            Slot::MorningSnack => &self.morning_snack,
            Slot::Lunch => &self.lunch,
            Slot::AfternoonSnack => &self.afternoon_snack,
            Slot::Dinner => &self.dinner,
        }
    }

    fn get_mut(&mut self, slot: Slot) -> &mut PlannedMeal {
        match slot {
            Slot::Breakfast => &mut self.breakfast,
            Slot::MorningSnack => &mut self.morning_snack,
            Slot::Lunch => &mut self.lunch,
            Slot::AfternoonSnack => &mut self.afternoon_snack,
            Slot::Dinner => &mut self.dinner,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &PlannedMeal)> {
        Slot::VARIANTS.iter().map(|slot| (*slot, self.get(*slot)))
    }
}

/// Constraint context a swap needs from the day it edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayContext {
    pub pattern: LunchPattern,
    pub lunch_has_carbs: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    #[serde(with = "crate::day_format")]
    pub date: Date,
    pub pattern: LunchPattern,
    pub lunch_has_carbs: bool,
    pub meals: Meals,
}

impl Day {
    pub fn context(&self) -> DayContext {
        DayContext {
            pattern: self.pattern,
            lunch_has_carbs: self.lunch_has_carbs,
        }
    }

    /// Puts `meal` in `slot` and returns the meal it replaced.
    ///
    /// Replacing the lunch re-derives `lunch_has_carbs` from the new dish.
    pub fn replace(&mut self, slot: Slot, meal: PlannedMeal) -> PlannedMeal {
        if slot == Slot::Lunch {
            self.lunch_has_carbs = meal.has_carbs;
        }

        std::mem::replace(self.meals.get_mut(slot), meal)
    }
}

/// Per-day adherence record: meals eaten and medication intakes taken.
#[derive(Encode, Decode, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub completed: BTreeSet<Slot>,
    pub medication_taken: BTreeSet<Slot>,
}

impl TrackingRecord {
    /// Flips the completion mark of `slot`, returning the new state.
    pub fn toggle_meal(&mut self, slot: Slot) -> bool {
        toggle(&mut self.completed, slot)
    }

    /// Flips the medication mark of `slot`, returning the new state.
    pub fn toggle_medication(&mut self, slot: Slot) -> bool {
        toggle(&mut self.medication_taken, slot)
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.medication_taken.is_empty()
    }
}

fn toggle(set: &mut BTreeSet<Slot>, slot: Slot) -> bool {
    if set.remove(&slot) {
        return false;
    }

    set.insert(slot);
    true
}
