use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::Context;
use glucoplan_db::table::{DailyMenu, Tracking};
use glucoplan_shared::mealplan::{Day, LunchPattern, Meals, TrackingRecord};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::{Date, OffsetDateTime};

use crate::store::PlanStore;

#[derive(FromRow)]
pub struct DailyMenuRow {
    pub day: String,
    pub pattern: String,
    pub lunch_has_carbs: bool,
    pub meals: Vec<u8>,
}

impl TryFrom<DailyMenuRow> for Day {
    type Error = anyhow::Error;

    fn try_from(value: DailyMenuRow) -> Result<Self, Self::Error> {
        let date = glucoplan_shared::parse_day(&value.day)?;
        let pattern = LunchPattern::from_str(&value.pattern)
            .with_context(|| format!("unknown lunch pattern `{}` on {date}", value.pattern))?;
        let meals = bitcode::decode::<Meals>(&value.meals)
            .with_context(|| format!("corrupted meals on {date}"))?;

        Ok(Day {
            date,
            pattern,
            lunch_has_carbs: value.lunch_has_carbs,
            meals,
        })
    }
}

#[derive(FromRow)]
pub struct TrackingRow {
    pub day: String,
    pub record: Vec<u8>,
}

/// [`PlanStore`] backed by the `daily_menu` and `tracking` tables.
#[derive(Clone)]
pub struct SqliteStore {
    read_db: SqlitePool,
    write_db: SqlitePool,
}

impl SqliteStore {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }

    /// Deletes plan and tracking rows of `user_id`, only those dated before
    /// `before` when given.
    async fn delete(&self, user_id: &str, before: Option<Date>) -> anyhow::Result<()> {
        let mut menus = Query::delete()
            .from_table(DailyMenu::Table)
            .and_where(Expr::col(DailyMenu::UserId).eq(user_id))
            .to_owned();
        let mut tracking = Query::delete()
            .from_table(Tracking::Table)
            .and_where(Expr::col(Tracking::UserId).eq(user_id))
            .to_owned();

        if let Some(before) = before {
            menus.and_where(Expr::col(DailyMenu::Day).lt(before.to_string()));
            tracking.and_where(Expr::col(Tracking::Day).lt(before.to_string()));
        }

        let mut tx = self.write_db.begin().await?;

        let (sql, values) = menus.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let (sql, values) = tracking.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl PlanStore for SqliteStore {
    async fn save_days(&self, user_id: &str, days: &[Day]) -> anyhow::Result<()> {
        if days.is_empty() {
            return Ok(());
        }

        let mut statement = Query::insert()
            .into_table(DailyMenu::Table)
            .columns([
                DailyMenu::UserId,
                DailyMenu::Day,
                DailyMenu::Pattern,
                DailyMenu::LunchHasCarbs,
                DailyMenu::Meals,
            ])
            .to_owned();

        for day in days {
            statement.values_panic([
                user_id.into(),
                day.date.to_string().into(),
                day.pattern.to_string().into(),
                day.lunch_has_carbs.into(),
                bitcode::encode(&day.meals).into(),
            ]);
        }

        statement.on_conflict(
            OnConflict::columns([DailyMenu::UserId, DailyMenu::Day])
                .update_columns([
                    DailyMenu::Pattern,
                    DailyMenu::LunchHasCarbs,
                    DailyMenu::Meals,
                ])
                .to_owned(),
        );

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    async fn load_days(&self, user_id: &str, from: Date) -> anyhow::Result<Vec<Day>> {
        let statement = Query::select()
            .columns([
                DailyMenu::Day,
                DailyMenu::Pattern,
                DailyMenu::LunchHasCarbs,
                DailyMenu::Meals,
            ])
            .from(DailyMenu::Table)
            .and_where(Expr::col(DailyMenu::UserId).eq(user_id))
            .and_where(Expr::col(DailyMenu::Day).gte(from.to_string()))
            .order_by_expr(Expr::col(DailyMenu::Day), sea_query::Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, DailyMenuRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter().map(Day::try_from).collect()
    }

    async fn clear(&self, user_id: &str) -> anyhow::Result<()> {
        self.delete(user_id, None).await
    }

    async fn delete_before(&self, user_id: &str, before: Date) -> anyhow::Result<()> {
        self.delete(user_id, Some(before)).await
    }

    async fn save_tracking(
        &self,
        user_id: &str,
        date: Date,
        record: &TrackingRecord,
    ) -> anyhow::Result<()> {
        let statement = Query::insert()
            .into_table(Tracking::Table)
            .columns([
                Tracking::UserId,
                Tracking::Day,
                Tracking::Record,
                Tracking::UpdatedAt,
            ])
            .values_panic([
                user_id.into(),
                date.to_string().into(),
                bitcode::encode(record).into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .on_conflict(
                OnConflict::columns([Tracking::UserId, Tracking::Day])
                    .update_columns([Tracking::Record, Tracking::UpdatedAt])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    async fn load_tracking(&self, user_id: &str) -> anyhow::Result<BTreeMap<Date, TrackingRecord>> {
        let statement = Query::select()
            .columns([Tracking::Day, Tracking::Record])
            .from(Tracking::Table)
            .and_where(Expr::col(Tracking::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, TrackingRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        rows.into_iter()
            .map(|row| -> anyhow::Result<(Date, TrackingRecord)> {
                let date = glucoplan_shared::parse_day(&row.day)?;
                let record = bitcode::decode::<TrackingRecord>(&row.record)
                    .with_context(|| format!("corrupted tracking on {date}"))?;

                Ok((date, record))
            })
            .collect()
    }
}
