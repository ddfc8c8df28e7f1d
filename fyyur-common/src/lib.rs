//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking directory:
//! - Entity store (schema, migrations, queries)
//! - Venue/show aggregation (area grouping, past/upcoming partitioning, search results)
//! - Directory operations combining queries with aggregation
//! - Configuration loading
//! - Genre and timestamp helpers

pub mod aggregate;
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod genres;
pub mod time;

pub use aggregate::AreaGrouping;
pub use error::{Error, Result};
pub use genres::Genres;
