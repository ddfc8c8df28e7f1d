//! Error documents
//!
//! Handler failures become `PageError`, which renders the error template.
//! Rejections produced by the router or extractors (unknown path, wrong
//! method, unparseable id) carry a plain-text or empty body; the
//! `render_error_pages` response mapper swaps those for the same template.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use fyyur_common::Error;
use tracing::{debug, error};

use crate::views::{render, ErrorPage};

/// Statuses that get a rendered error document
const ERROR_PAGE_STATUSES: &[u16] = &[400, 401, 403, 404, 405, 409, 422, 500];

#[derive(Debug)]
pub enum PageError {
    NotFound(String),
    Internal(String),
}

impl From<Error> for PageError {
    fn from(e: Error) -> Self {
        match e {
            Error::NotFound(what) => PageError::NotFound(what),
            other => PageError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = match &self {
            PageError::NotFound(what) => {
                debug!("Not found: {}", what);
                StatusCode::NOT_FOUND
            }
            PageError::Internal(msg) => {
                error!("Request failed: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        render(status, &ErrorPage::for_status(status))
    }
}

pub type PageResult = std::result::Result<Response, PageError>;

/// Router fallback
pub async fn not_found() -> Response {
    render(StatusCode::NOT_FOUND, &ErrorPage::for_status(StatusCode::NOT_FOUND))
}

/// Response mapper: replace bare error responses with the error document
pub async fn render_error_pages(response: Response) -> Response {
    let status = response.status();
    if !ERROR_PAGE_STATUSES.contains(&status.as_u16()) || has_document_body(&response) {
        return response;
    }

    debug!("Rendering error page for bare {} response", status);
    render(status, &ErrorPage::for_status(status))
}

fn has_document_body(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("text/html") || ct.starts_with("application/json"))
        .unwrap_or(false)
}
