//! Database models

use crate::genres::Genres;
use crate::time::parse_show_time;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

#[derive(Debug, Clone, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
    pub created_at: NaiveDateTime,
}

/// Field values for creating or overwriting a venue
#[derive(Debug, Clone, Default)]
pub struct VenueDraft {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

#[derive(Debug, Clone, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
    pub created_at: NaiveDateTime,
}

/// Field values for creating or overwriting an artist
#[derive(Debug, Clone, Default)]
pub struct ArtistDraft {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Genres,
}

#[derive(Debug, Clone, Serialize)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct ShowDraft {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: NaiveDateTime,
}

/// A show joined with the names and images of both sides
#[derive(Debug, Clone, Serialize)]
pub struct ShowListing {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// Decode a stored timestamp column
pub(crate) fn timestamp_column(row: &SqliteRow, column: &str) -> Result<NaiveDateTime> {
    let raw: String = row.try_get(column)?;
    parse_show_time(&raw)
        .ok_or_else(|| Error::Internal(format!("Malformed timestamp in {}: {:?}", column, raw)))
}

fn genres_column(row: &SqliteRow) -> Result<Genres> {
    let raw: String = row.try_get("genres")?;
    Ok(Genres::decode(&raw))
}

impl Venue {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Venue {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            website: row.try_get("website")?,
            image_link: row.try_get("image_link")?,
            facebook_link: row.try_get("facebook_link")?,
            seeking_talent: row.try_get("seeking_talent")?,
            seeking_description: row.try_get("seeking_description")?,
            genres: genres_column(row)?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }
}

impl From<Venue> for VenueDraft {
    fn from(v: Venue) -> Self {
        VenueDraft {
            name: v.name,
            city: v.city,
            state: v.state,
            address: v.address,
            phone: v.phone,
            website: v.website,
            image_link: v.image_link,
            facebook_link: v.facebook_link,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description,
            genres: v.genres,
        }
    }
}

impl Artist {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Artist {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            phone: row.try_get("phone")?,
            website: row.try_get("website")?,
            image_link: row.try_get("image_link")?,
            facebook_link: row.try_get("facebook_link")?,
            seeking_venue: row.try_get("seeking_venue")?,
            seeking_description: row.try_get("seeking_description")?,
            genres: genres_column(row)?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }
}

impl From<Artist> for ArtistDraft {
    fn from(a: Artist) -> Self {
        ArtistDraft {
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone,
            website: a.website,
            image_link: a.image_link,
            facebook_link: a.facebook_link,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description,
            genres: a.genres,
        }
    }
}

impl Show {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(Show {
            id: row.try_get("id")?,
            venue_id: row.try_get("venue_id")?,
            artist_id: row.try_get("artist_id")?,
            start_time: timestamp_column(row, "start_time")?,
        })
    }
}

impl ShowListing {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self> {
        Ok(ShowListing {
            show_id: row.try_get("show_id")?,
            venue_id: row.try_get("venue_id")?,
            venue_name: row.try_get("venue_name")?,
            venue_image_link: row.try_get("venue_image_link")?,
            artist_id: row.try_get("artist_id")?,
            artist_name: row.try_get("artist_name")?,
            artist_image_link: row.try_get("artist_image_link")?,
            start_time: timestamp_column(row, "start_time")?,
        })
    }
}
