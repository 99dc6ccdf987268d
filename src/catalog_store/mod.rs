//! Catalog store module.
//!
//! Records for artists, albums, songs and genres, persisted in SQLite.

mod deletion_guard;
mod error;
mod models;
mod resolve;
mod schema;
mod store;
mod trait_def;
mod validation;

pub use deletion_guard::GENRE_HAS_SONGS_MESSAGE;
pub use error::{StoreError, StoreResult};
pub use models::*;
pub use resolve::{
    resolve_album, resolve_albums, resolve_song, resolve_songs, Expand, Resolver, Select,
    ALBUM_EXPANSION, SONG_EXPANSION,
};
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use store::SqliteCatalogStore;
pub use trait_def::{CatalogStore, GroupCount};
pub use validation::{ValidationError, ValidationResult};
