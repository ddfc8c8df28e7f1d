//! Entity store: schema, migrations and queries

pub mod artists;
pub mod init;
pub mod migrations;
pub mod models;
pub mod shows;
pub mod venues;

pub use init::*;
pub use migrations::{run_migrations, CURRENT_SCHEMA_VERSION};
pub use models::*;

/// Case-insensitive substring test on a record name; an empty phrase matches everything
///
/// Folding happens in Rust because SQLite `LOWER()` only folds ASCII.
pub(crate) fn name_matches(name: &str, phrase: &str) -> bool {
    name.to_lowercase().contains(&phrase.to_lowercase())
}
