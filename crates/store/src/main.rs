// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::error::Error;

use diesel::Connection;
use tracing_subscriber::EnvFilter;

use spreebreak_store::db;
use spreebreak_store::queries::challenges::list_challenges;
use spreebreak_store::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env()?;

    {
        let mut connection = diesel::sqlite::SqliteConnection::establish(&settings.database_url)?;
        db::run_migrations(&mut connection)?;
    }

    let pool = db::create_pool(&settings.database_url, settings.pool_size).await?;
    let mut conn = db::get_conn(&pool).await?;

    for table in db::TABLES {
        let rows = db::row_count(&mut conn, table).await?;
        tracing::info!("Table {table}: {rows} row(s)");
    }

    for challenge in list_challenges(&mut conn).await? {
        tracing::info!(
            "Challenge {} ({}) worth {} point(s)",
            challenge.name,
            challenge.short_name,
            challenge.points
        );
    }

    tracing::info!("Database at {} is ready", settings.database_url);
    Ok(())
}
