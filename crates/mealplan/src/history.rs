use std::collections::VecDeque;

use glucoplan_shared::mealplan::{Day, Slot};

use crate::selection::AVOID_LAST;

/// Trailing days a resumed plan rebuilds its history from.
pub const RECENT_DAYS: usize = 5;

/// Recently picked dish ids per slot, oldest first.
///
/// Each queue keeps at most [`RECENT_DAYS`] ids, which covers the
/// avoidance window of the selection policy. Days already planned after
/// the one being built, when filling a hole, are kept apart as `upcoming`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    slots: [VecDeque<String>; 5],
    upcoming: [Vec<String>; 5],
}

fn position(slot: Slot) -> usize {
    match slot {
        Slot::Breakfast => 0,
        Slot::MorningSnack => 1,
        Slot::Lunch => 2,
        Slot::AfternoonSnack => 3,
        Slot::Dinner => 4,
    }
}

impl History {
    /// Rebuilds the history from the last [`RECENT_DAYS`] days of a plan.
    pub fn from_days(days: &[Day]) -> Self {
        let start = days.len().saturating_sub(RECENT_DAYS);

        days[start..].iter().fold(Self::default(), |history, day| {
            day.meals
                .iter()
                .fold(history, |history, (slot, meal)| history.with(slot, &meal.id))
        })
    }

    pub fn recent(&self, slot: Slot) -> Vec<String> {
        self.slots[position(slot)].iter().cloned().collect()
    }

    /// Ids a pick for `slot` must skip: the last [`AVOID_LAST`] recent ones
    /// and every upcoming one.
    pub fn avoided(&self, slot: Slot) -> Vec<String> {
        let recent = &self.slots[position(slot)];
        recent
            .iter()
            .skip(recent.len().saturating_sub(AVOID_LAST))
            .chain(&self.upcoming[position(slot)])
            .cloned()
            .collect()
    }

    /// Returns the history with `days` as the days that follow the next pick.
    pub fn with_upcoming<'a>(mut self, days: impl IntoIterator<Item = &'a Day>) -> Self {
        self.upcoming = Default::default();
        for day in days {
            for (slot, meal) in day.meals.iter() {
                self.upcoming[position(slot)].push(meal.id.clone());
            }
        }

        self
    }

    /// Returns the history with `id` appended to `slot`.
    pub fn with(mut self, slot: Slot, id: impl Into<String>) -> Self {
        let queue = &mut self.slots[position(slot)];
        queue.push_back(id.into());
        if queue.len() > RECENT_DAYS {
            queue.pop_front();
        }

        self
    }
}
