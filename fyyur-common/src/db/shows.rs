//! Show queries

use super::models::{Show, ShowDraft, ShowListing};
use crate::time::format_show_time;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::info;

const SELECT_LISTING: &str = r#"
    SELECT s.id AS show_id, s.start_time,
           v.id AS venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
           a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link
    FROM shows s
    JOIN venues v ON v.id = s.venue_id
    JOIN artists a ON a.id = s.artist_id
"#;

/// Every show with both sides joined, by start time
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(&format!("{} ORDER BY s.start_time, s.id", SELECT_LISTING))
        .fetch_all(pool)
        .await?;
    rows.iter().map(ShowListing::from_row).collect()
}

pub async fn for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(&format!(
        "{} WHERE s.venue_id = ? ORDER BY s.start_time, s.id",
        SELECT_LISTING
    ))
    .bind(venue_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(ShowListing::from_row).collect()
}

pub async fn for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(&format!(
        "{} WHERE s.artist_id = ? ORDER BY s.start_time, s.id",
        SELECT_LISTING
    ))
    .bind(artist_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(ShowListing::from_row).collect()
}

/// Shows starting strictly after `after`
pub async fn starting_after(pool: &SqlitePool, after: NaiveDateTime) -> Result<Vec<Show>> {
    let rows = sqlx::query(
        "SELECT id, venue_id, artist_id, start_time FROM shows WHERE start_time > ? ORDER BY start_time, id",
    )
    .bind(format_show_time(&after))
    .fetch_all(pool)
    .await?;
    rows.iter().map(Show::from_row).collect()
}

/// Total number of shows
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(pool)
        .await?)
}

/// Insert a show. A missing venue or artist fails the foreign key check.
pub async fn insert(pool: &SqlitePool, draft: &ShowDraft) -> Result<i64> {
    let mut tx = pool.begin().await.map_err(Error::persistence)?;

    let result = sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
        .bind(draft.venue_id)
        .bind(draft.artist_id)
        .bind(format_show_time(&draft.start_time))
        .execute(&mut *tx)
        .await
        .map_err(Error::persistence)?;

    tx.commit().await.map_err(Error::persistence)?;

    let id = result.last_insert_rowid();
    info!(
        "Created show {} (venue {}, artist {}, {})",
        id,
        draft.venue_id,
        draft.artist_id,
        format_show_time(&draft.start_time)
    );
    Ok(id)
}
