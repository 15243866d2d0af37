use anyhow::Result;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use sqlx_migrator::migrator::{Migrate, Plan};
use std::str::FromStr;
use tracing::log::LevelFilter;

/// SQLite PRAGMAs shared by every pool
///
/// - WAL lets readers run while the single writer commits
/// - busy_timeout waits instead of failing with SQLITE_BUSY
/// - synchronous=NORMAL is durable enough under WAL
async fn configure_pragmas(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA temp_store = memory")
        .execute(pool)
        .await?;

    Ok(())
}

/// Read-only pool for plan and tracking queries
pub async fn create_read_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .read_only(true)
        .log_statements(LevelFilter::Debug);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    configure_pragmas(&pool).await?;

    tracing::debug!(max_connections, "read-only pool created");

    Ok(pool)
}

/// Write pool, limited to a single connection
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.log_statements(LevelFilter::Debug);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    configure_pragmas(&pool).await?;

    tracing::debug!("write pool created");

    Ok(pool)
}

/// Creates the database file when missing and applies pending migrations
#[tracing::instrument]
pub async fn migrate(database_url: &str) -> Result<()> {
    if !sqlx::Sqlite::database_exists(database_url).await? {
        tracing::info!("Database does not exist, creating: {database_url}");
        sqlx::Sqlite::create_database(database_url).await?;
    }

    let pool = create_write_pool(database_url).await?;
    let mut conn = pool.acquire().await?;
    glucoplan_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);
    pool.close().await;

    tracing::info!("Migrations applied");

    Ok(())
}
