use std::collections::BTreeMap;

use glucoplan_shared::mealplan::{Day, Slot, TrackingRecord};
use glucoplan_shared::user::Profile;
use time::{Date, OffsetDateTime};
use time_tz::{ToTimezone, timezones};

use crate::scheduler::{Planner, window};
use crate::selection::{Randomness, SeededRandom, ThreadRandom};
use crate::store::PlanStore;

/// Calendar day of "now" in `tz`, falling back to UTC for unknown zones.
pub fn today(tz: &str) -> Date {
    let now = OffsetDateTime::now_utc();

    match timezones::get_by_name(tz) {
        Some(tz) => now.to_timezone(tz).date(),
        None => {
            tracing::warn!(tz, "unknown timezone, using UTC");
            now.date()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanView {
    pub days: Vec<Day>,
    pub tracking: BTreeMap<Date, TrackingRecord>,
}

impl PlanView {
    pub fn day(&self, date: Date) -> Option<&Day> {
        self.days.iter().find(|day| day.date == date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwapOutcome {
    /// No alternative was left; the plan is untouched.
    Unchanged,
    Swapped(Day),
}

/// Plan life-cycle on top of a [`PlanStore`].
pub struct PlanService<S> {
    planner: Planner,
    store: S,
    seed: Option<u64>,
}

impl<S: PlanStore> PlanService<S> {
    pub fn new(planner: Planner, store: S) -> Self {
        Self {
            planner,
            store,
            seed: None,
        }
    }

    /// Makes every operation draw from a generator seeded with `seed`.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    fn rng(&self) -> Box<dyn Randomness> {
        match self.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom::default()),
        }
    }

    /// Loads the stored plan and rolls it forward, or generates a fresh one
    /// starting today when nothing is stored. The result is persisted and
    /// days that left the window are deleted along with their tracking.
    #[tracing::instrument(skip(self, profile))]
    pub async fn boot(
        &self,
        user_id: &str,
        profile: &Profile,
        today: Date,
    ) -> glucoplan_shared::Result<PlanView> {
        if !profile.onboarding_complete {
            return Err(glucoplan_shared::Error::Forbidden(
                "onboarding is not complete".to_owned(),
            ));
        }

        let (window_start, _) = window(today);
        let saved = self.store.load_days(user_id, window_start).await?;
        let mut tracking = self.store.load_tracking(user_id).await?;

        let days = if saved.is_empty() {
            tracing::info!(user_id, "no stored plan, generating");
            self.planner.generate(today, profile, &mut *self.rng())
        } else {
            self.planner.sync(saved, profile, today, &mut *self.rng())
        };

        self.store.save_days(user_id, &days).await?;
        self.store.delete_before(user_id, window_start).await?;

        let tracking = tracking.split_off(&window_start);

        Ok(PlanView { days, tracking })
    }

    /// Stored plan and tracking from yesterday on, without generating.
    pub async fn show(&self, user_id: &str, today: Date) -> glucoplan_shared::Result<PlanView> {
        let (window_start, _) = window(today);
        let days = self.store.load_days(user_id, window_start).await?;
        let tracking = self.store.load_tracking(user_id).await?;

        Ok(PlanView { days, tracking })
    }

    /// Drops the stored plan and tracking, then generates from today.
    #[tracing::instrument(skip(self, profile))]
    pub async fn regenerate(
        &self,
        user_id: &str,
        profile: &Profile,
        today: Date,
    ) -> glucoplan_shared::Result<Vec<Day>> {
        self.store.clear(user_id).await?;

        let days = self.planner.generate(today, profile, &mut *self.rng());
        self.store.save_days(user_id, &days).await?;

        Ok(days)
    }

    #[tracing::instrument(skip(self))]
    pub async fn reset(&self, user_id: &str) -> glucoplan_shared::Result<()> {
        self.store.clear(user_id).await?;
        tracing::info!(user_id, "plan cleared");

        Ok(())
    }

    /// Replaces the meal in `slot` on `date` and persists only that day.
    #[tracing::instrument(skip(self, profile, blacklist))]
    pub async fn swap(
        &self,
        user_id: &str,
        profile: &Profile,
        date: Date,
        slot: Slot,
        blacklist: &[String],
    ) -> glucoplan_shared::Result<SwapOutcome> {
        let days = self.store.load_days(user_id, date).await?;
        let Some(mut day) = days.into_iter().find(|day| day.date == date) else {
            glucoplan_shared::not_found!("plan day {date}");
        };

        let current = day.meals.get(slot);
        let Some(meal) = self.planner.swap(
            slot,
            current,
            profile,
            blacklist,
            day.context(),
            &mut *self.rng(),
        ) else {
            tracing::info!(user_id, %date, %slot, "no alternative available");
            return Ok(SwapOutcome::Unchanged);
        };

        let previous = day.replace(slot, meal);
        self.store
            .save_days(user_id, std::slice::from_ref(&day))
            .await?;

        tracing::info!(
            user_id,
            %date,
            %slot,
            from = %previous.id,
            to = %day.meals.get(slot).id,
            "meal swapped"
        );

        Ok(SwapOutcome::Swapped(day))
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_meal(
        &self,
        user_id: &str,
        date: Date,
        slot: Slot,
    ) -> glucoplan_shared::Result<TrackingRecord> {
        self.update_tracking(user_id, date, |record| {
            record.toggle_meal(slot);
        })
        .await
    }

    /// Flips the medication intake of `slot`. Only breakfast and dinner
    /// carry a medication.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_medication(
        &self,
        user_id: &str,
        date: Date,
        slot: Slot,
    ) -> glucoplan_shared::Result<TrackingRecord> {
        if !slot.takes_medication() {
            glucoplan_shared::invalid!("no medication is taken with {slot}");
        }

        self.update_tracking(user_id, date, |record| {
            record.toggle_medication(slot);
        })
        .await
    }

    async fn update_tracking(
        &self,
        user_id: &str,
        date: Date,
        update: impl FnOnce(&mut TrackingRecord),
    ) -> glucoplan_shared::Result<TrackingRecord> {
        let mut tracking = self.store.load_tracking(user_id).await?;
        let record = tracking.entry(date).or_default();
        update(record);

        self.store.save_tracking(user_id, date, record).await?;

        Ok(record.clone())
    }
}
