//! Venue and show aggregation
//!
//! Pure functions over already-loaded records. Nothing here touches the
//! database or reads the clock; callers pass "now" explicitly so every
//! classification is reproducible.

use crate::db::models::{Show, ShowListing, Venue};
use crate::time::format_show_time;
use crate::Error;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Label shown for a venue with no city
pub const CITY_PLACEHOLDER: &str = "venue city";
/// Label shown for a venue with no state
pub const STATE_PLACEHOLDER: &str = "venue state";

/// Key used to bucket venues into area groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaGrouping {
    /// One group per state; the group keeps the first-seen venue's city
    #[default]
    State,
    /// One group per (city, state) pair
    CityState,
}

impl FromStr for AreaGrouping {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "state" => Ok(AreaGrouping::State),
            "city_state" | "city-state" => Ok(AreaGrouping::CityState),
            other => Err(Error::Config(format!(
                "Unknown venue grouping '{}' (expected 'state' or 'city_state')",
                other
            ))),
        }
    }
}

impl fmt::Display for AreaGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaGrouping::State => write!(f, "state"),
            AreaGrouping::CityState => write!(f, "city_state"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

fn label_or(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Count of shows per venue with start strictly after `now`
pub fn upcoming_counts(shows: &[Show], now: NaiveDateTime) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for show in shows.iter().filter(|s| s.start_time > now) {
        *counts.entry(show.venue_id).or_insert(0) += 1;
    }
    counts
}

/// Group venues by area
///
/// Venues are visited in ascending id order. The first venue seen for a key
/// opens the group and fixes its recorded city and state; later venues with
/// the same key are appended. Groups come out in first-seen order.
pub fn group_venues_by_area(
    venues: &[Venue],
    shows: &[Show],
    now: NaiveDateTime,
    grouping: AreaGrouping,
) -> Vec<AreaGroup> {
    let counts = upcoming_counts(shows, now);

    let mut ordered: Vec<&Venue> = venues.iter().collect();
    ordered.sort_by_key(|v| v.id);

    let mut groups: Vec<AreaGroup> = Vec::new();
    let mut index: HashMap<(Option<String>, String), usize> = HashMap::new();

    for venue in ordered {
        let city = label_or(venue.city.as_deref(), CITY_PLACEHOLDER);
        let state = label_or(venue.state.as_deref(), STATE_PLACEHOLDER);
        let key = match grouping {
            AreaGrouping::State => (None, state.clone()),
            AreaGrouping::CityState => (Some(city.clone()), state.clone()),
        };

        let summary = VenueSummary {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
        };

        match index.get(&key) {
            Some(&i) => groups[i].venues.push(summary),
            None => {
                index.insert(key, groups.len());
                groups.push(AreaGroup {
                    city,
                    state,
                    venues: vec![summary],
                });
            }
        }
    }

    groups
}

/// Which side of a show is the page subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    /// Venue page: entries describe the artist
    Venue,
    /// Artist page: entries describe the venue
    Artist,
}

/// One show as seen from a venue or artist page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowEntry {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: String,
}

impl ShowEntry {
    fn from_listing(listing: &ShowListing, perspective: Perspective) -> Self {
        let (id, name, image) = match perspective {
            Perspective::Venue => (
                listing.artist_id,
                &listing.artist_name,
                &listing.artist_image_link,
            ),
            Perspective::Artist => (
                listing.venue_id,
                &listing.venue_name,
                &listing.venue_image_link,
            ),
        };
        ShowEntry {
            counterpart_id: id,
            counterpart_name: name.clone(),
            counterpart_image_link: image.clone(),
            start_time: format_show_time(&listing.start_time),
        }
    }
}

/// Shows split at "now". Counts are always the list lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedShows {
    past: Vec<ShowEntry>,
    upcoming: Vec<ShowEntry>,
}

impl PartitionedShows {
    pub fn past(&self) -> &[ShowEntry] {
        &self.past
    }

    pub fn upcoming(&self) -> &[ShowEntry] {
        &self.upcoming
    }

    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// Split shows into past (start <= now) and upcoming (start > now), keeping input order
pub fn partition_shows(
    listings: &[ShowListing],
    perspective: Perspective,
    now: NaiveDateTime,
) -> PartitionedShows {
    let mut out = PartitionedShows::default();
    for listing in listings {
        let entry = ShowEntry::from_listing(listing, perspective);
        if listing.start_time > now {
            out.upcoming.push(entry);
        } else {
            out.past.push(entry);
        }
    }
    out
}

/// Row of the flat show listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowRow {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowListing> for ShowRow {
    fn from(l: &ShowListing) -> Self {
        ShowRow {
            venue_id: l.venue_id,
            venue_name: l.venue_name.clone(),
            artist_id: l.artist_id,
            artist_name: l.artist_name.clone(),
            artist_image_link: l.artist_image_link.clone(),
            start_time: format_show_time(&l.start_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_upcoming_shows: Option<usize>,
}

/// `count` always equals `data.len()`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    count: usize,
    data: Vec<SearchHit>,
}

impl SearchResults {
    pub fn from_hits(data: Vec<SearchHit>) -> Self {
        SearchResults {
            count: data.len(),
            data,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn data(&self) -> &[SearchHit] {
        &self.data
    }
}

/// Search hits for venues, with their upcoming show counts
pub fn venue_hits(venues: &[Venue], shows: &[Show], now: NaiveDateTime) -> SearchResults {
    let counts = upcoming_counts(shows, now);
    SearchResults::from_hits(
        venues
            .iter()
            .map(|v| SearchHit {
                id: v.id,
                name: v.name.clone(),
                num_upcoming_shows: Some(counts.get(&v.id).copied().unwrap_or(0)),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genres::Genres;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn venue(id: i64, name: &str, city: Option<&str>, state: Option<&str>) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            city: city.map(String::from),
            state: state.map(String::from),
            address: None,
            phone: None,
            website: None,
            image_link: None,
            facebook_link: None,
            seeking_talent: false,
            seeking_description: None,
            genres: Genres::default(),
            created_at: now(),
        }
    }

    fn show(id: i64, venue_id: i64, start: NaiveDateTime) -> Show {
        Show {
            id,
            venue_id,
            artist_id: 1,
            start_time: start,
        }
    }

    fn listing(show_id: i64, start: NaiveDateTime) -> ShowListing {
        ShowListing {
            show_id,
            venue_id: 10,
            venue_name: "The Musical Hop".to_string(),
            venue_image_link: Some("https://img/venue".to_string()),
            artist_id: 20,
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: None,
            start_time: start,
        }
    }

    #[test]
    fn test_state_grouping_keeps_first_seen_city() {
        let venues = vec![
            venue(1, "Venue A", Some("SF"), Some("CA")),
            venue(2, "Venue B", Some("LA"), Some("CA")),
        ];

        let groups = group_venues_by_area(&venues, &[], now(), AreaGrouping::State);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].state, "CA");
        assert_eq!(groups[0].city, "SF");
        let ids: Vec<i64> = groups[0].venues.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_state_grouping_one_group_per_state() {
        let venues = vec![
            venue(3, "C", Some("New York"), Some("NY")),
            venue(1, "A", Some("San Francisco"), Some("CA")),
            venue(4, "D", Some("Brooklyn"), Some("NY")),
            venue(2, "B", Some("Oakland"), Some("CA")),
        ];

        let groups = group_venues_by_area(&venues, &[], now(), AreaGrouping::State);

        assert_eq!(groups.len(), 2);
        // ascending id order decides which key is seen first
        assert_eq!(groups[0].state, "CA");
        assert_eq!(groups[0].venues.len(), 2);
        assert_eq!(groups[1].state, "NY");
        assert_eq!(groups[1].city, "New York");
        assert_eq!(groups[1].venues.len(), 2);
    }

    #[test]
    fn test_city_state_grouping_splits_cities() {
        let venues = vec![
            venue(1, "A", Some("SF"), Some("CA")),
            venue(2, "B", Some("LA"), Some("CA")),
            venue(3, "C", Some("SF"), Some("CA")),
        ];

        let groups = group_venues_by_area(&venues, &[], now(), AreaGrouping::CityState);

        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].city.as_str(), groups[0].venues.len()), ("SF", 2));
        assert_eq!((groups[1].city.as_str(), groups[1].venues.len()), ("LA", 1));
    }

    #[test]
    fn test_missing_location_uses_placeholders() {
        let venues = vec![
            venue(1, "Nowhere", None, None),
            venue(2, "Blank", Some(" "), Some("")),
        ];

        let groups = group_venues_by_area(&venues, &[], now(), AreaGrouping::State);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].city, CITY_PLACEHOLDER);
        assert_eq!(groups[0].state, STATE_PLACEHOLDER);
        assert_eq!(groups[0].venues.len(), 2);
    }

    #[test]
    fn test_upcoming_count_is_strictly_after_now() {
        let venues = vec![venue(1, "A", Some("SF"), Some("CA"))];
        let shows = vec![
            show(1, 1, now() - Duration::days(1)),
            show(2, 1, now()),
            show(3, 1, now() + Duration::seconds(1)),
            show(4, 1, now() + Duration::days(30)),
            show(5, 2, now() + Duration::days(30)),
        ];

        let groups = group_venues_by_area(&venues, &shows, now(), AreaGrouping::State);

        assert_eq!(groups[0].venues[0].num_upcoming_shows, 2);
    }

    #[test]
    fn test_grouping_empty_input() {
        assert!(group_venues_by_area(&[], &[], now(), AreaGrouping::State).is_empty());
    }

    #[test]
    fn test_partition_boundary_is_past() {
        let listings = vec![listing(1, now())];

        let parts = partition_shows(&listings, Perspective::Venue, now());

        assert_eq!(parts.past_count(), 1);
        assert_eq!(parts.upcoming_count(), 0);
    }

    #[test]
    fn test_partition_counts_match_lists() {
        let listings = vec![
            listing(1, now() - Duration::days(400)),
            listing(2, now() + Duration::hours(2)),
            listing(3, now() - Duration::minutes(5)),
            listing(4, now() + Duration::days(90)),
            listing(5, now() + Duration::days(91)),
        ];

        let parts = partition_shows(&listings, Perspective::Artist, now());

        assert_eq!(parts.past_count(), parts.past().len());
        assert_eq!(parts.upcoming_count(), parts.upcoming().len());
        assert_eq!(parts.past_count(), 2);
        assert_eq!(parts.upcoming_count(), 3);
    }

    #[test]
    fn test_partition_perspective_selects_counterpart() {
        let start = now() + Duration::days(1);
        let listings = vec![listing(1, start)];

        let from_venue = partition_shows(&listings, Perspective::Venue, now());
        let from_artist = partition_shows(&listings, Perspective::Artist, now());

        let e = &from_venue.upcoming()[0];
        assert_eq!(e.counterpart_id, 20);
        assert_eq!(e.counterpart_name, "Guns N Petals");
        assert_eq!(e.counterpart_image_link, None);
        assert_eq!(e.start_time, "2026-06-02 12:00:00");

        let e = &from_artist.upcoming()[0];
        assert_eq!(e.counterpart_id, 10);
        assert_eq!(e.counterpart_image_link.as_deref(), Some("https://img/venue"));
    }

    #[test]
    fn test_search_results_count_matches_data() {
        let venues = vec![
            venue(1, "The Musical Hop", None, None),
            venue(2, "Park Square", None, None),
        ];
        let shows = vec![show(1, 2, now() + Duration::days(1))];

        let results = venue_hits(&venues, &shows, now());

        assert_eq!(results.count(), 2);
        assert_eq!(results.data()[0].num_upcoming_shows, Some(0));
        assert_eq!(results.data()[1].num_upcoming_shows, Some(1));
        assert_eq!(SearchResults::from_hits(Vec::new()).count(), 0);
    }

    #[test]
    fn test_grouping_parse() {
        assert_eq!("state".parse::<AreaGrouping>().unwrap(), AreaGrouping::State);
        assert_eq!(
            "City_State".parse::<AreaGrouping>().unwrap(),
            AreaGrouping::CityState
        );
        assert!("zip".parse::<AreaGrouping>().is_err());
        assert_eq!(AreaGrouping::CityState.to_string(), "city_state");
    }
}
