//! Page templates
//!
//! Every page shares `layouts/main.html`, which renders the navigation bar
//! and the optional one-line notice.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use fyyur_common::aggregate::{AreaGroup, PartitionedShows, SearchResults, ShowRow};
use fyyur_common::db::models::{Artist, Venue};
use fyyur_common::genres::GENRE_CHOICES;
use tracing::error;

use crate::forms::{ArtistForm, FieldErrors, ShowForm, VenueForm, STATE_CHOICES};

/// Served when a template itself fails to render
const RENDER_FAILURE_PAGE: &str = "<!doctype html><html><head><title>500 Server Error</title></head>\
    <body><h1>500</h1><p>Something went wrong.</p></body></html>";

/// Render a template with the given status
pub fn render<T: Template>(status: StatusCode, page: &T) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(RENDER_FAILURE_PAGE)).into_response()
        }
    }
}

pub mod filters {
    use fyyur_common::time::{display, DisplayStyle};

    /// `{{ value|datetime("full") }}` or `{{ value|datetime("medium") }}`
    pub fn datetime<T: std::fmt::Display>(value: T, style: &str) -> askama::Result<String> {
        Ok(display(&value.to_string(), DisplayStyle::from_name(style)))
    }
}

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn choices(values: &[&str], selected: &[String]) -> Vec<SelectOption> {
        values
            .iter()
            .map(|v| SelectOption {
                value: v.to_string(),
                label: v.to_string(),
                selected: selected.iter().any(|s| s == v),
            })
            .collect()
    }

    fn records(records: impl IntoIterator<Item = (i64, String)>, selected: &str) -> Vec<SelectOption> {
        records
            .into_iter()
            .map(|(id, name)| {
                let value = id.to_string();
                SelectOption {
                    selected: value == selected,
                    label: name,
                    value,
                }
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomePage {
    pub notice: Option<String>,
    pub venues: Vec<Venue>,
    pub artists: Vec<Artist>,
}

#[derive(Template)]
#[template(path = "pages/venues.html")]
pub struct VenuesPage {
    pub notice: Option<String>,
    pub areas: Vec<AreaGroup>,
}

#[derive(Template)]
#[template(path = "pages/artists.html")]
pub struct ArtistsPage {
    pub notice: Option<String>,
    pub artists: Vec<Artist>,
}

#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchPage {
    pub notice: Option<String>,
    /// "venues" or "artists"; used for links and the heading
    pub kind: &'static str,
    pub search_term: String,
    pub results: SearchResults,
}

#[derive(Template)]
#[template(path = "pages/show_venue.html")]
pub struct VenuePage {
    pub notice: Option<String>,
    pub venue: Venue,
    pub shows: PartitionedShows,
}

#[derive(Template)]
#[template(path = "pages/show_artist.html")]
pub struct ArtistPage {
    pub notice: Option<String>,
    pub artist: Artist,
    pub shows: PartitionedShows,
}

#[derive(Template)]
#[template(path = "pages/shows.html")]
pub struct ShowsPage {
    pub notice: Option<String>,
    pub shows: Vec<ShowRow>,
}

#[derive(Template)]
#[template(path = "forms/venue.html")]
pub struct VenueFormPage {
    pub notice: Option<String>,
    pub heading: String,
    pub action: String,
    pub form: VenueForm,
    pub errors: FieldErrors,
    pub state_options: Vec<SelectOption>,
    pub genre_options: Vec<SelectOption>,
}

impl VenueFormPage {
    pub fn new(heading: String, action: String, form: VenueForm, errors: FieldErrors) -> Self {
        VenueFormPage {
            notice: (!errors.is_empty()).then(|| "Please correct the highlighted fields.".to_string()),
            heading,
            action,
            state_options: SelectOption::choices(STATE_CHOICES, std::slice::from_ref(&form.state)),
            genre_options: SelectOption::choices(GENRE_CHOICES, &form.genres),
            form,
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "forms/artist.html")]
pub struct ArtistFormPage {
    pub notice: Option<String>,
    pub heading: String,
    pub action: String,
    pub form: ArtistForm,
    pub errors: FieldErrors,
    pub state_options: Vec<SelectOption>,
    pub genre_options: Vec<SelectOption>,
}

impl ArtistFormPage {
    pub fn new(heading: String, action: String, form: ArtistForm, errors: FieldErrors) -> Self {
        ArtistFormPage {
            notice: (!errors.is_empty()).then(|| "Please correct the highlighted fields.".to_string()),
            heading,
            action,
            state_options: SelectOption::choices(STATE_CHOICES, std::slice::from_ref(&form.state)),
            genre_options: SelectOption::choices(GENRE_CHOICES, &form.genres),
            form,
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "forms/show.html")]
pub struct ShowFormPage {
    pub notice: Option<String>,
    pub form: ShowForm,
    pub errors: FieldErrors,
    pub artist_options: Vec<SelectOption>,
    pub venue_options: Vec<SelectOption>,
}

impl ShowFormPage {
    pub fn new(form: ShowForm, errors: FieldErrors, artists: &[Artist], venues: &[Venue]) -> Self {
        ShowFormPage {
            notice: (!errors.is_empty()).then(|| "Please correct the highlighted fields.".to_string()),
            artist_options: SelectOption::records(
                artists.iter().map(|a| (a.id, a.name.clone())),
                &form.artist_id,
            ),
            venue_options: SelectOption::records(
                venues.iter().map(|v| (v.id, v.name.clone())),
                &form.venue_id,
            ),
            form,
            errors,
        }
    }
}

#[derive(Template)]
#[template(path = "errors/error.html")]
pub struct ErrorPage {
    pub notice: Option<String>,
    pub status: u16,
    pub title: String,
    pub message: String,
}

impl ErrorPage {
    pub fn for_status(status: StatusCode) -> Self {
        let message = match status.as_u16() {
            400 => "The request could not be understood.",
            401 => "You need to sign in to see this page.",
            403 => "You are not allowed to see this page.",
            404 => "The page you were looking for does not exist.",
            405 => "That action is not allowed on this page.",
            409 => "That record conflicts with one that already exists.",
            422 => "The submitted data could not be processed.",
            _ => "Something went wrong on our end.",
        };
        ErrorPage {
            notice: None,
            status: status.as_u16(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_filter() {
        assert_eq!(
            filters::datetime("2026-10-16 20:00:00", "full").unwrap(),
            "Friday October 16, 2026 at 8:00PM"
        );
        assert_eq!(filters::datetime("someday", "medium").unwrap(), "someday");
    }

    #[test]
    fn test_select_options_mark_selection() {
        let opts = SelectOption::choices(&["CA", "NY"], &["NY".to_string()]);
        assert!(!opts[0].selected);
        assert!(opts[1].selected);

        let opts = SelectOption::records(vec![(1, "A".to_string()), (2, "B".to_string())], "2");
        assert_eq!(opts[1].label, "B");
        assert!(opts[1].selected);
    }

    #[test]
    fn test_error_page_renders_status() {
        let html = ErrorPage::for_status(StatusCode::NOT_FOUND).render().unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("Not Found"));
    }
}
