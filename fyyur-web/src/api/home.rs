//! Home page

use axum::extract::State;
use axum::http::StatusCode;
use fyyur_common::directory;

use super::error::PageResult;
use crate::views::{render, HomePage};
use crate::AppState;

/// GET /
pub async fn index(State(state): State<AppState>) -> PageResult {
    home_page(&state, None).await
}

/// Home page with an optional notice; write handlers land here after a
/// create succeeds or any write fails
pub async fn home_page(state: &AppState, notice: Option<String>) -> PageResult {
    let listing = directory::home(&state.db).await?;
    Ok(render(
        StatusCode::OK,
        &HomePage {
            notice,
            venues: listing.venues,
            artists: listing.artists,
        },
    ))
}
