use std::collections::BTreeMap;

use glucoplan_shared::mealplan::{Day, TrackingRecord};
use time::Date;

/// Persistence contract for plans and adherence tracking, keyed by
/// (user, date).
#[async_trait::async_trait]
pub trait PlanStore: Send + Sync {
    /// Upserts every day. Saving the same day twice is harmless.
    async fn save_days(&self, user_id: &str, days: &[Day]) -> anyhow::Result<()>;

    /// Days on or after `from`, in date order.
    async fn load_days(&self, user_id: &str, from: Date) -> anyhow::Result<Vec<Day>>;

    /// Removes the user's plan and tracking rows.
    async fn clear(&self, user_id: &str) -> anyhow::Result<()>;

    /// Removes plan and tracking rows dated before `before`.
    async fn delete_before(&self, user_id: &str, before: Date) -> anyhow::Result<()>;

    async fn save_tracking(
        &self,
        user_id: &str,
        date: Date,
        record: &TrackingRecord,
    ) -> anyhow::Result<()>;

    async fn load_tracking(&self, user_id: &str) -> anyhow::Result<BTreeMap<Date, TrackingRecord>>;
}
