//! Artist pages and submissions

use axum::extract::{Path, RawForm, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fyyur_common::db::artists;
use fyyur_common::{directory, time, Error};
use serde_json::json;
use tracing::{error, warn};

use super::error::{PageError, PageResult};
use super::home::home_page;
use crate::forms::{ArtistForm, FieldErrors, FormFields};
use crate::views::{render, ArtistFormPage, ArtistPage, ArtistsPage};
use crate::AppState;

/// GET /artists
pub async fn list(State(state): State<AppState>) -> PageResult {
    let all = artists::list_all(&state.db).await?;
    Ok(render(
        StatusCode::OK,
        &ArtistsPage {
            notice: None,
            artists: all,
        },
    ))
}

/// GET /artists/:id
pub async fn detail(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    detail_page(&state, id, None).await
}

async fn detail_page(state: &AppState, id: i64, notice: Option<String>) -> PageResult {
    let detail = directory::artist_detail(&state.db, id, time::now()).await?;
    Ok(render(
        StatusCode::OK,
        &ArtistPage {
            notice,
            artist: detail.artist,
            shows: detail.shows,
        },
    ))
}

fn create_page(form: ArtistForm, errors: FieldErrors) -> Response {
    render(
        StatusCode::OK,
        &ArtistFormPage::new(
            "List a new artist".to_string(),
            "/artists/create".to_string(),
            form,
            errors,
        ),
    )
}

fn edit_page(id: i64, name: &str, form: ArtistForm, errors: FieldErrors) -> Response {
    render(
        StatusCode::OK,
        &ArtistFormPage::new(
            format!("Edit artist {}", name),
            format!("/artists/{}/edit", id),
            form,
            errors,
        ),
    )
}

/// GET /artists/create
pub async fn create_form() -> Response {
    create_page(ArtistForm::default(), FieldErrors::default())
}

/// POST /artists/create
pub async fn create_submit(State(state): State<AppState>, RawForm(body): RawForm) -> PageResult {
    let form = ArtistForm::from_fields(&FormFields::parse(&body));

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            warn!("Artist submission rejected: {}", errors.summary());
            return Ok(create_page(form, errors));
        }
    };

    let notice = match artists::insert(&state.db, &draft).await {
        Ok(_) => format!("Artist {} was successfully listed!", draft.name),
        Err(e) => {
            error!("Failed to create artist {}: {}", draft.name, e);
            format!("An error occurred. Artist {} could not be listed.", draft.name)
        }
    };

    home_page(&state, Some(notice)).await
}

/// GET /artists/:id/edit
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let artist = artists::get(&state.db, id).await?;
    Ok(edit_page(
        id,
        &artist.name,
        ArtistForm::from_artist(&artist),
        FieldErrors::default(),
    ))
}

/// POST /artists/:id/edit
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    RawForm(body): RawForm,
) -> PageResult {
    let form = ArtistForm::from_fields(&FormFields::parse(&body));

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            warn!("Edit of artist {} rejected: {}", id, errors.summary());
            let current = artists::get(&state.db, id).await?;
            return Ok(edit_page(id, &current.name, form, errors));
        }
    };

    match artists::update(&state.db, id, &draft).await {
        Ok(()) => {
            let notice = format!("Artist {} was successfully edited!", draft.name);
            detail_page(&state, id, Some(notice)).await
        }
        Err(Error::NotFound(what)) => Err(PageError::NotFound(what)),
        Err(e) => {
            error!("Failed to edit artist {}: {}", id, e);
            home_page(&state, Some("An error occurred. Artist could not be edited.".to_string()))
                .await
        }
    }
}

/// DELETE /artists/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match artists::delete(&state.db, id).await {
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
            error!("Failed to delete artist {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Artist could not be deleted." })),
            )
                .into_response()
        }
    }
}
