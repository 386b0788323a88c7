// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::QueryableByName;
use diesel::connection::SimpleConnection;
use diesel::sqlite::{Sqlite, SqliteConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::StoreError;

pub mod models;
pub mod schema;

pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;
pub type DbPool = Pool<DbConnection>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// The bootstrap script: conditional table creation plus insert-or-ignore seeds.
pub const SCHEMA_SQL: &str = include_str!("../migrations/2024-11-01-000000_bootstrap/up.sql");

/// Every table created by [`SCHEMA_SQL`].
pub const TABLES: [&str; 7] = [
    "users",
    "forums",
    "submissions",
    "challenges",
    "judgement",
    "config",
    "safety_team",
];

pub fn run_migrations(connection: &mut impl MigrationHarness<Sqlite>) -> Result<(), StoreError> {
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(StoreError::Migration)?;
    tracing::info!("Applied {} pending migration(s)", applied.len());

    Ok(())
}

/// Runs the bootstrap script directly, outside of the migration bookkeeping.
/// Safe to call on a database that is already set up.
pub fn apply_schema(connection: &mut SqliteConnection) -> Result<(), StoreError> {
    connection.batch_execute(SCHEMA_SQL)?;
    Ok(())
}

pub async fn establish(database_url: &str) -> Result<DbConnection, StoreError> {
    Ok(DbConnection::establish(database_url).await?)
}

pub async fn create_pool(database_url: &str, size: u32) -> Result<DbPool, StoreError> {
    let manager = AsyncDieselConnectionManager::<DbConnection>::new(database_url);
    Pool::builder()
        .max_size(size)
        .build(manager)
        .await
        .map_err(|e| StoreError::Pool(e.to_string()))
}

pub async fn get_conn(pool: &DbPool) -> Result<PooledConnection<'_, DbConnection>, StoreError> {
    pool.get().await.map_err(|e| StoreError::Pool(e.to_string()))
}

#[derive(QueryableByName)]
struct ColumnInfo {
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

fn check_table(table: &str) -> Result<(), StoreError> {
    if TABLES.contains(&table) {
        Ok(())
    } else {
        Err(StoreError::UnknownTable(table.to_string()))
    }
}

/// Column names of a declared table, in declaration order.
pub async fn describe_table(conn: &mut DbConnection, table: &str) -> Result<Vec<String>, StoreError> {
    check_table(table)?;
    let columns = diesel::sql_query(format!("PRAGMA table_info({table})"))
        .load::<ColumnInfo>(conn)
        .await?;
    Ok(columns.into_iter().map(|c| c.name).collect())
}

pub async fn row_count(conn: &mut DbConnection, table: &str) -> Result<i64, StoreError> {
    check_table(table)?;
    let row = diesel::sql_query(format!("SELECT COUNT(*) AS count FROM {table}"))
        .get_result::<RowCount>(conn)
        .await?;
    Ok(row.count)
}
