//! Venue queries

use super::name_matches;
use super::models::{Venue, VenueDraft};
use crate::time::{format_show_time, now};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

const SELECT_VENUE: &str = "SELECT id, name, city, state, address, phone, website, image_link, \
     facebook_link, seeking_talent, seeking_description, genres, created_at FROM venues";

/// All venues in ascending id order
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_VENUE))
        .fetch_all(pool)
        .await?;
    rows.iter().map(Venue::from_row).collect()
}

/// Most recently created venues, newest first
pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Venue>> {
    let rows = sqlx::query(&format!(
        "{} ORDER BY created_at DESC, id DESC LIMIT ?",
        SELECT_VENUE
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.iter().map(Venue::from_row).collect()
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Venue> {
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_VENUE))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("venue {}", id)))?;
    Venue::from_row(&row)
}

/// Case-insensitive substring match on name; an empty phrase matches everything
pub async fn search_by_name(pool: &SqlitePool, phrase: &str) -> Result<Vec<Venue>> {
    let venues = list_all(pool).await?;
    Ok(venues
        .into_iter()
        .filter(|v| name_matches(&v.name, phrase))
        .collect())
}

/// Insert a venue, returning its id
pub async fn insert(pool: &SqlitePool, draft: &VenueDraft) -> Result<i64> {
    let mut tx = pool.begin().await.map_err(Error::persistence)?;

    let result = sqlx::query(
        r#"
        INSERT INTO venues (name, city, state, address, phone, website, image_link,
                            facebook_link, seeking_talent, seeking_description, genres, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.address)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.image_link)
    .bind(&draft.facebook_link)
    .bind(draft.seeking_talent)
    .bind(&draft.seeking_description)
    .bind(draft.genres.encode())
    .bind(format_show_time(&now()))
    .execute(&mut *tx)
    .await
    .map_err(Error::persistence)?;

    tx.commit().await.map_err(Error::persistence)?;

    let id = result.last_insert_rowid();
    info!("Created venue {} ({})", id, draft.name);
    Ok(id)
}

/// Overwrite every editable field of an existing venue
pub async fn update(pool: &SqlitePool, id: i64, draft: &VenueDraft) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::persistence)?;

    let result = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, city = ?, state = ?, address = ?, phone = ?, website = ?,
            image_link = ?, facebook_link = ?, seeking_talent = ?,
            seeking_description = ?, genres = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.address)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.image_link)
    .bind(&draft.facebook_link)
    .bind(draft.seeking_talent)
    .bind(&draft.seeking_description)
    .bind(draft.genres.encode())
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(Error::persistence)?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", id)));
    }

    tx.commit().await.map_err(Error::persistence)?;
    info!("Updated venue {}", id);
    Ok(())
}

/// Delete a venue and its shows; returns the number of shows removed
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let mut tx = pool.begin().await.map_err(Error::persistence)?;

    let show_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE venue_id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::persistence)?;

    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(Error::persistence)?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", id)));
    }

    tx.commit().await.map_err(Error::persistence)?;
    info!("Deleted venue {} and {} show(s)", id, show_count);
    Ok(show_count as u64)
}
