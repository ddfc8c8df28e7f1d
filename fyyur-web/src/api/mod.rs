//! HTTP handlers for fyyur-web

pub mod artists;
pub mod error;
pub mod health;
pub mod home;
pub mod search;
pub mod shows;
pub mod venues;

pub use error::{not_found, render_error_pages, PageError, PageResult};
pub use health::health_routes;
