//! Database schema migrations
//!
//! Versioned, idempotent changes applied after the base tables exist.
//! Progress is tracked in `schema_version`; never edit a released migration,
//! add a new one and bump `CURRENT_SCHEMA_VERSION`.

use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Current schema version
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Latest applied version, 0 when nothing has been recorded
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        migrate_v1(pool).await?;
        set_schema_version(pool, 1).await?;
        info!("Migration v1 completed");
    }

    if current_version < 2 {
        migrate_v2(pool).await?;
        set_schema_version(pool, 2).await?;
        info!("Migration v2 completed");
    }

    Ok(())
}

/// v1: indexes for the per-venue and per-artist show lookups
async fn migrate_v1(pool: &SqlitePool) -> Result<()> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_start ON shows(start_time)")
        .execute(pool)
        .await?;
    Ok(())
}

/// v2: rewrite legacy comma-delimited genre values as JSON arrays
async fn migrate_v2(pool: &SqlitePool) -> Result<()> {
    use crate::genres::Genres;
    use sqlx::Row;

    for table in ["venues", "artists"] {
        let rows = sqlx::query(&format!(
            "SELECT id, genres FROM {} WHERE genres NOT LIKE '[%'",
            table
        ))
        .fetch_all(pool)
        .await?;

        let mut tx = pool.begin().await?;
        for row in &rows {
            let id: i64 = row.try_get("id")?;
            let raw: String = row.try_get("genres")?;
            sqlx::query(&format!("UPDATE {} SET genres = ? WHERE id = ?", table))
                .bind(Genres::decode(&raw).encode())
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        if !rows.is_empty() {
            info!("Migration v2: normalized genres on {} {} rows", rows.len(), table);
        }
    }

    Ok(())
}
