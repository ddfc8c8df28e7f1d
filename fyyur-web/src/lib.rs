//! fyyur-web library - booking directory web front end
//!
//! Server-rendered pages for browsing and searching venues and artists,
//! listing them, and posting shows that pair the two.

use axum::Router;
use fyyur_common::AreaGrouping;
use sqlx::SqlitePool;

pub mod api;
pub mod forms;
pub mod views;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// How the venue listing buckets venues
    pub grouping: AreaGrouping,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, grouping: AreaGrouping) -> Self {
        Self { db, grouping }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;
    use tower_http::trace::TraceLayer;

    let venues = Router::new()
        .route("/venues", get(api::venues::list))
        .route(
            "/venues/search",
            get(api::search::search_venues_get).post(api::search::search_venues_post),
        )
        .route(
            "/venues/create",
            get(api::venues::create_form).post(api::venues::create_submit),
        )
        .route(
            "/venues/:id",
            get(api::venues::detail).delete(api::venues::delete),
        )
        .route(
            "/venues/:id/edit",
            get(api::venues::edit_form).post(api::venues::edit_submit),
        );

    let artists = Router::new()
        .route("/artists", get(api::artists::list))
        .route(
            "/artists/search",
            get(api::search::search_artists_get).post(api::search::search_artists_post),
        )
        .route(
            "/artists/create",
            get(api::artists::create_form).post(api::artists::create_submit),
        )
        .route(
            "/artists/:id",
            get(api::artists::detail).delete(api::artists::delete),
        )
        .route(
            "/artists/:id/edit",
            get(api::artists::edit_form).post(api::artists::edit_submit),
        );

    let shows = Router::new()
        .route("/shows", get(api::shows::list))
        .route(
            "/shows/create",
            get(api::shows::create_form).post(api::shows::create_submit),
        );

    Router::new()
        .route("/", get(api::home::index))
        .merge(venues)
        .merge(artists)
        .merge(shows)
        .merge(api::health_routes())
        .fallback(api::not_found)
        .layer(middleware::map_response(api::render_error_pages))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
