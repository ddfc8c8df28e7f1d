//! Directory operations
//!
//! Each operation loads what it needs through the query layer and hands it to
//! the pure aggregation functions. The pool is passed in explicitly.

use crate::aggregate::{
    group_venues_by_area, partition_shows, venue_hits, AreaGroup, AreaGrouping,
    PartitionedShows, Perspective, SearchHit, SearchResults, ShowRow,
};
use crate::db::models::{Artist, Venue};
use crate::db::{artists, shows, venues};
use crate::Result;
use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use tracing::debug;

/// Number of venues and artists on the home page
pub const RECENT_LIMIT: i64 = 10;

#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: Venue,
    pub shows: PartitionedShows,
}

#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub shows: PartitionedShows,
}

#[derive(Debug, Clone, Default)]
pub struct HomeListing {
    pub venues: Vec<Venue>,
    pub artists: Vec<Artist>,
}

/// All venues grouped by area, with upcoming show counts
pub async fn venue_areas(
    pool: &SqlitePool,
    now: NaiveDateTime,
    grouping: AreaGrouping,
) -> Result<Vec<AreaGroup>> {
    let all_venues = venues::list_all(pool).await?;
    let upcoming = shows::starting_after(pool, now).await?;
    let groups = group_venues_by_area(&all_venues, &upcoming, now, grouping);
    debug!(
        "Grouped {} venues into {} areas by {}",
        all_venues.len(),
        groups.len(),
        grouping
    );
    Ok(groups)
}

/// Venue with its shows split into past and upcoming
pub async fn venue_detail(pool: &SqlitePool, id: i64, now: NaiveDateTime) -> Result<VenueDetail> {
    let venue = venues::get(pool, id).await?;
    let listings = shows::for_venue(pool, id).await?;
    Ok(VenueDetail {
        venue,
        shows: partition_shows(&listings, Perspective::Venue, now),
    })
}

pub async fn artist_detail(
    pool: &SqlitePool,
    id: i64,
    now: NaiveDateTime,
) -> Result<ArtistDetail> {
    let artist = artists::get(pool, id).await?;
    let listings = shows::for_artist(pool, id).await?;
    Ok(ArtistDetail {
        artist,
        shows: partition_shows(&listings, Perspective::Artist, now),
    })
}

pub async fn search_venues(
    pool: &SqlitePool,
    phrase: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let matches = venues::search_by_name(pool, phrase).await?;
    let upcoming = shows::starting_after(pool, now).await?;
    let results = venue_hits(&matches, &upcoming, now);
    debug!("Venue search {:?}: {} hit(s)", phrase, results.count());
    Ok(results)
}

pub async fn search_artists(pool: &SqlitePool, phrase: &str) -> Result<SearchResults> {
    let matches = artists::search_by_name(pool, phrase).await?;
    let results = SearchResults::from_hits(
        matches
            .into_iter()
            .map(|a| SearchHit {
                id: a.id,
                name: a.name,
                num_upcoming_shows: None,
            })
            .collect(),
    );
    debug!("Artist search {:?}: {} hit(s)", phrase, results.count());
    Ok(results)
}

/// Most recently listed venues and artists
pub async fn home(pool: &SqlitePool) -> Result<HomeListing> {
    Ok(HomeListing {
        venues: venues::recent(pool, RECENT_LIMIT).await?,
        artists: artists::recent(pool, RECENT_LIMIT).await?,
    })
}

/// Every show, by start time
pub async fn show_rows(pool: &SqlitePool) -> Result<Vec<ShowRow>> {
    let listings = shows::list_all(pool).await?;
    Ok(listings.iter().map(ShowRow::from).collect())
}
