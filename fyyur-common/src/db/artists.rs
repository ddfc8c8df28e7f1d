//! Artist queries

use super::name_matches;
use super::models::{Artist, ArtistDraft};
use crate::time::{format_show_time, now};
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

const SELECT_ARTIST: &str = "SELECT id, name, city, state, phone, website, image_link, \
     facebook_link, seeking_venue, seeking_description, genres, created_at FROM artists";

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_ARTIST))
        .fetch_all(pool)
        .await?;
    rows.iter().map(Artist::from_row).collect()
}

pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Artist>> {
    let rows = sqlx::query(&format!(
        "{} ORDER BY created_at DESC, id DESC LIMIT ?",
        SELECT_ARTIST
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.iter().map(Artist::from_row).collect()
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Artist> {
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_ARTIST))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("artist {}", id)))?;
    Artist::from_row(&row)
}

pub async fn search_by_name(pool: &SqlitePool, phrase: &str) -> Result<Vec<Artist>> {
    let artists = list_all(pool).await?;
    Ok(artists
        .into_iter()
        .filter(|a| name_matches(&a.name, phrase))
        .collect())
}

pub async fn insert(pool: &SqlitePool, draft: &ArtistDraft) -> Result<i64> {
    let mut tx = pool.begin().await.map_err(Error::persistence)?;

    let result = sqlx::query(
        r#"
        INSERT INTO artists (name, city, state, phone, website, image_link, facebook_link,
                             seeking_venue, seeking_description, genres, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.image_link)
    .bind(&draft.facebook_link)
    .bind(draft.seeking_venue)
    .bind(&draft.seeking_description)
    .bind(draft.genres.encode())
    .bind(format_show_time(&now()))
    .execute(&mut *tx)
    .await
    .map_err(Error::persistence)?;

    tx.commit().await.map_err(Error::persistence)?;

    let id = result.last_insert_rowid();
    info!("Created artist {} ({})", id, draft.name);
    Ok(id)
}

pub async fn update(pool: &SqlitePool, id: i64, draft: &ArtistDraft) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::persistence)?;

    let result = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, city = ?, state = ?, phone = ?, website = ?, image_link = ?,
            facebook_link = ?, seeking_venue = ?, seeking_description = ?, genres = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.image_link)
    .bind(&draft.facebook_link)
    .bind(draft.seeking_venue)
    .bind(&draft.seeking_description)
    .bind(draft.genres.encode())
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(Error::persistence)?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }

    tx.commit().await.map_err(Error::persistence)?;
    info!("Updated artist {}", id);
    Ok(())
}

/// Delete an artist and its shows; returns the number of shows removed
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64> {
    let mut tx = pool.begin().await.map_err(Error::persistence)?;

    let show_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE artist_id = ?")
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::persistence)?;

    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(Error::persistence)?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }

    tx.commit().await.map_err(Error::persistence)?;
    info!("Deleted artist {} and {} show(s)", id, show_count);
    Ok(show_count as u64)
}
