//! Venue pages and submissions

use axum::extract::{Path, RawForm, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fyyur_common::db::venues;
use fyyur_common::{directory, time, Error};
use serde_json::json;
use tracing::{error, warn};

use super::error::{PageError, PageResult};
use super::home::home_page;
use crate::forms::{FieldErrors, FormFields, VenueForm};
use crate::views::{render, VenuePage, VenueFormPage, VenuesPage};
use crate::AppState;

/// GET /venues
pub async fn list(State(state): State<AppState>) -> PageResult {
    let areas = directory::venue_areas(&state.db, time::now(), state.grouping).await?;
    Ok(render(StatusCode::OK, &VenuesPage { notice: None, areas }))
}

/// GET /venues/:id
pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    detail_page(&state, id, None).await
}

async fn detail_page(state: &AppState, id: i64, notice: Option<String>) -> PageResult {
    let detail = directory::venue_detail(&state.db, id, time::now()).await?;
    Ok(render(
        StatusCode::OK,
        &VenuePage {
            notice,
            venue: detail.venue,
            shows: detail.shows,
        },
    ))
}

fn create_page(form: VenueForm, errors: FieldErrors) -> Response {
    render(
        StatusCode::OK,
        &VenueFormPage::new(
            "List a new venue".to_string(),
            "/venues/create".to_string(),
            form,
            errors,
        ),
    )
}

fn edit_page(id: i64, name: &str, form: VenueForm, errors: FieldErrors) -> Response {
    render(
        StatusCode::OK,
        &VenueFormPage::new(
            format!("Edit venue {}", name),
            format!("/venues/{}/edit", id),
            form,
            errors,
        ),
    )
}

/// GET /venues/create
pub async fn create_form() -> Response {
    create_page(VenueForm::default(), FieldErrors::default())
}

/// POST /venues/create
pub async fn create_submit(State(state): State<AppState>, RawForm(body): RawForm) -> PageResult {
    let form = VenueForm::from_fields(&FormFields::parse(&body));

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            warn!("Venue submission rejected: {}", errors.summary());
            return Ok(create_page(form, errors));
        }
    };

    let notice = match venues::insert(&state.db, &draft).await {
        Ok(_) => format!("Venue {} was successfully listed!", draft.name),
        Err(e) => {
            error!("Failed to create venue {}: {}", draft.name, e);
            format!("An error occurred. Venue {} could not be listed.", draft.name)
        }
    };

    home_page(&state, Some(notice)).await
}

/// GET /venues/:id/edit
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let venue = venues::get(&state.db, id).await?;
    Ok(edit_page(
        id,
        &venue.name,
        VenueForm::from_venue(&venue),
        FieldErrors::default(),
    ))
}

/// POST /venues/:id/edit
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    RawForm(body): RawForm,
) -> PageResult {
    let form = VenueForm::from_fields(&FormFields::parse(&body));

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            warn!("Edit of venue {} rejected: {}", id, errors.summary());
            let current = venues::get(&state.db, id).await?;
            return Ok(edit_page(id, &current.name, form, errors));
        }
    };

    match venues::update(&state.db, id, &draft).await {
        Ok(()) => {
            let notice = format!("Venue {} was successfully edited!", draft.name);
            detail_page(&state, id, Some(notice)).await
        }
        Err(Error::NotFound(what)) => Err(PageError::NotFound(what)),
        Err(e) => {
            error!("Failed to edit venue {}: {}", id, e);
            home_page(&state, Some("An error occurred. Venue could not be edited.".to_string()))
                .await
        }
    }
}

/// DELETE /venues/:id
///
/// Called from the venue page script; replies with JSON.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match venues::delete(&state.db, id).await {
        Ok(deleted_shows) => Json(json!({
            "success": true,
            "deleted_shows": deleted_shows,
        }))
        .into_response(),
        Err(Error::NotFound(what)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": format!("Not found: {}", what) })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete venue {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Venue could not be deleted." })),
            )
                .into_response()
        }
    }
}
