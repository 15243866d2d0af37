use std::collections::VecDeque;
use std::sync::Arc;

use glucoplan_shared::mealplan::{Day, LunchPattern};
use glucoplan_shared::user::Profile;
use strum::VariantArray;
use time::{Date, Duration};

use crate::catalog::{Catalog, CatalogError};
use crate::history::History;
use crate::selection::{AVOID_LAST, Randomness};
use crate::synthesizer::synthesize;

/// Length of a freshly generated plan and of the synced window.
pub const WINDOW_DAYS: i64 = 15;

/// First and last day a synced plan must cover: yesterday through
/// `today + 13`.
pub fn window(today: Date) -> (Date, Date) {
    (
        today - Duration::days(1),
        today + Duration::days(WINDOW_DAYS - 2),
    )
}

/// Plan synthesis engine over a shared, validated catalog.
#[derive(Clone, Debug)]
pub struct Planner {
    catalog: Arc<Catalog>,
}

impl Planner {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, CatalogError> {
        catalog.validate()?;

        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Builds [`WINDOW_DAYS`] consecutive days starting at `from` with a
    /// fresh history.
    pub fn generate<R: Randomness + ?Sized>(
        &self,
        from: Date,
        profile: &Profile,
        rng: &mut R,
    ) -> Vec<Day> {
        let pools = self.catalog.for_allergens(&profile.allergens);
        let unrestricted = profile.is_unrestricted();

        let mut history = History::default();
        let mut days = Vec::with_capacity(WINDOW_DAYS as usize);
        for offset in 0..WINDOW_DAYS {
            let date = from + Duration::days(offset);
            let (day, next) = synthesize(
                date,
                offset as usize,
                history,
                &pools,
                unrestricted,
                &mut *rng,
            );
            history = next;
            days.push(day);
        }

        tracing::info!(%from, days = days.len(), "plan generated");

        days
    }

    /// Rolls an existing plan forward so it covers [`window`] of `today`.
    ///
    /// # Business Rules
    /// - Days before yesterday are evicted, the others are kept untouched
    /// - Pools are re-filtered with the profile's current allergens
    /// - Missing dates from the first retained day (yesterday when nothing is
    ///   retained) through `today + 13` are synthesized in date order, each
    ///   with the history of the five days before it
    /// - Days appended after the plan continue the lunch rotation from the
    ///   number of retained days
    /// - A hole between retained days follows the lunch pattern of the day
    ///   before it and avoids the dishes of the days after it
    /// - Nothing is generated before the first retained day, so a clock that
    ///   went backwards leaves the plan as is
    pub fn sync<R: Randomness + ?Sized>(
        &self,
        existing: Vec<Day>,
        profile: &Profile,
        today: Date,
        rng: &mut R,
    ) -> Vec<Day> {
        let (window_start, window_end) = window(today);

        let mut retained: Vec<Day> = existing
            .into_iter()
            .filter(|day| day.date >= window_start)
            .collect();
        retained.sort_by_key(|day| day.date);
        retained.dedup_by_key(|day| day.date);

        let start = retained.first().map_or(window_start, |day| day.date);
        let retained_count = retained.len();

        let pools = self.catalog.for_allergens(&profile.allergens);
        let unrestricted = profile.is_unrestricted();

        let mut pending: VecDeque<Day> = retained.into();
        let mut days: Vec<Day> = Vec::with_capacity(retained_count.max(WINDOW_DAYS as usize));
        let mut next_index = retained_count;
        let mut generated = 0;

        for offset in 0..=(window_end - start).whole_days() {
            let date = start + Duration::days(offset);
            if pending.front().is_some_and(|day| day.date == date) {
                days.extend(pending.pop_front());
                continue;
            }

            let day_index = match days.last() {
                Some(previous) if !pending.is_empty() => index_after(previous.pattern),
                _ => {
                    next_index += 1;
                    next_index - 1
                }
            };

            let upcoming = pending
                .iter()
                .take_while(|day| day.date - date <= Duration::days(AVOID_LAST as i64));
            let history = History::from_days(&days).with_upcoming(upcoming);

            let (day, _) = synthesize(date, day_index, history, &pools, unrestricted, &mut *rng);
            days.push(day);
            generated += 1;
        }

        tracing::info!(
            %today,
            retained = retained_count,
            generated,
            "plan synced"
        );

        days.extend(pending);

        days
    }
}

/// Rotation index of the day after one with `pattern`.
fn index_after(pattern: LunchPattern) -> usize {
    LunchPattern::VARIANTS
        .iter()
        .position(|variant| *variant == pattern)
        .map_or(0, |position| position + 1)
}
