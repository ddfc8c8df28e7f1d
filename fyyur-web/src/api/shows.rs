//! Show listing and creation

use axum::extract::{RawForm, State};
use axum::http::StatusCode;
use fyyur_common::db::{artists, shows, venues};
use fyyur_common::directory;
use tracing::{error, warn};

use super::error::PageResult;
use super::home::home_page;
use crate::forms::{FieldErrors, FormFields, ShowForm};
use crate::views::{render, ShowFormPage, ShowsPage};
use crate::AppState;

/// GET /shows
pub async fn list(State(state): State<AppState>) -> PageResult {
    let rows = directory::show_rows(&state.db).await?;
    Ok(render(
        StatusCode::OK,
        &ShowsPage {
            notice: None,
            shows: rows,
        },
    ))
}

async fn form_page(state: &AppState, form: ShowForm, errors: FieldErrors) -> PageResult {
    let all_artists = artists::list_all(&state.db).await?;
    let all_venues = venues::list_all(&state.db).await?;
    Ok(render(
        StatusCode::OK,
        &ShowFormPage::new(form, errors, &all_artists, &all_venues),
    ))
}

/// GET /shows/create
pub async fn create_form(State(state): State<AppState>) -> PageResult {
    form_page(&state, ShowForm::default(), FieldErrors::default()).await
}

/// POST /shows/create
pub async fn create_submit(State(state): State<AppState>, RawForm(body): RawForm) -> PageResult {
    let form = ShowForm::from_fields(&FormFields::parse(&body));

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            warn!("Show submission rejected: {}", errors.summary());
            return form_page(&state, form, errors).await;
        }
    };

    let notice = match shows::insert(&state.db, &draft).await {
        Ok(_) => "Show was successfully listed!".to_string(),
        Err(e) => {
            error!(
                "Failed to create show (venue {}, artist {}): {}",
                draft.venue_id, draft.artist_id, e
            );
            "An error occurred. Show could not be listed.".to_string()
        }
    };

    home_page(&state, Some(notice)).await
}
