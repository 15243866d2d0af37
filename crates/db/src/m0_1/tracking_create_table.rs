use sea_query::{ColumnDef, Index, Table, TableCreateStatement, TableDropStatement};

use crate::table::Tracking;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Tracking::Table)
        .col(
            ColumnDef::new(Tracking::UserId)
                .string()
                .not_null()
                .string_len(64),
        )
        .col(
            ColumnDef::new(Tracking::Day)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(ColumnDef::new(Tracking::Record).blob().not_null())
        .col(ColumnDef::new(Tracking::UpdatedAt).big_integer().not_null())
        .primary_key(Index::create().col(Tracking::UserId).col(Tracking::Day))
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Tracking::Table).to_owned()
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
