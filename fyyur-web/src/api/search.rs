//! Venue and artist name search
//!
//! GET reads `search_term` from the query string, POST from the form body.
//! The term is matched exactly as submitted; a missing term is the empty
//! phrase, which matches everything.

use axum::extract::{Query, RawForm, State};
use axum::http::StatusCode;
use fyyur_common::{directory, time};
use serde::Deserialize;

use super::error::PageResult;
use crate::forms::FormFields;
use crate::views::{render, SearchPage};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
}

fn term_from_body(body: &[u8]) -> String {
    FormFields::parse(body).raw("search_term").to_string()
}

async fn venue_results(state: &AppState, term: String) -> PageResult {
    let results = directory::search_venues(&state.db, &term, time::now()).await?;
    Ok(render(
        StatusCode::OK,
        &SearchPage {
            notice: None,
            kind: "venues",
            search_term: term,
            results,
        },
    ))
}

async fn artist_results(state: &AppState, term: String) -> PageResult {
    let results = directory::search_artists(&state.db, &term).await?;
    Ok(render(
        StatusCode::OK,
        &SearchPage {
            notice: None,
            kind: "artists",
            search_term: term,
            results,
        },
    ))
}

/// GET /venues/search?search_term=...
pub async fn search_venues_get(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> PageResult {
    venue_results(&state, query.search_term).await
}

/// POST /venues/search
pub async fn search_venues_post(State(state): State<AppState>, RawForm(body): RawForm) -> PageResult {
    venue_results(&state, term_from_body(&body)).await
}

/// GET /artists/search?search_term=...
pub async fn search_artists_get(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> PageResult {
    artist_results(&state, query.search_term).await
}

/// POST /artists/search
pub async fn search_artists_post(
    State(state): State<AppState>,
    RawForm(body): RawForm,
) -> PageResult {
    artist_results(&state, term_from_body(&body)).await
}
