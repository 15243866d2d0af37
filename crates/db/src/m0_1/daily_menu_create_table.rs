use sea_query::{ColumnDef, Index, Table, TableCreateStatement, TableDropStatement};

use crate::table::DailyMenu;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(DailyMenu::Table)
        .col(
            ColumnDef::new(DailyMenu::UserId)
                .string()
                .not_null()
                .string_len(64),
        )
        .col(
            ColumnDef::new(DailyMenu::Day)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(DailyMenu::Pattern)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(
            ColumnDef::new(DailyMenu::LunchHasCarbs)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(DailyMenu::Meals).blob().not_null())
        .primary_key(Index::create().col(DailyMenu::UserId).col(DailyMenu::Day))
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(DailyMenu::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
