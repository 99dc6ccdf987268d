//! Referential checks that run before a delete.
//!
//! Only genres are guarded. Artists and albums can be deleted while other records still
//! point at them, which leaves those references dangling.

use super::error::{StoreError, StoreResult};
use super::models::GenreId;
use rusqlite::{params, Connection};
use tracing::debug;

pub const GENRE_HAS_SONGS_MESSAGE: &str = "The genre has songs, delete the songs first.";

/// Ids of all songs referencing `genre_id`.
pub(super) fn songs_referencing_genre(conn: &Connection, genre_id: &GenreId) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare_cached("SELECT id FROM songs WHERE genre_id = ?1 ORDER BY rowid")?;
    let ids = stmt
        .query_map(params![genre_id], |r| r.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(ids)
}

/// Refuse with [`StoreError::Conflict`] while any song references the genre.
///
/// Must run on the same connection and inside the same transaction as the delete it
/// protects, otherwise a song created in between slips through.
pub(super) fn ensure_genre_deletable(conn: &Connection, genre_id: &GenreId) -> StoreResult<()> {
    let songs = songs_referencing_genre(conn, genre_id)?;
    if !songs.is_empty() {
        debug!(
            "Refusing to delete genre {}: referenced by {} songs",
            genre_id,
            songs.len()
        );
        return Err(StoreError::Conflict(GENRE_HAS_SONGS_MESSAGE.to_string()));
    }
    Ok(())
}
