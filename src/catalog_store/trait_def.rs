//! CatalogStore trait definition.

use super::error::StoreResult;
use super::models::*;

/// Number of records sharing one value of a [`ReferenceField`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Trait for catalog storage backends.
///
/// Lookups by id fail with [`StoreError::NotFound`](super::StoreError::NotFound) when the
/// id does not resolve. Writes fail with
/// [`StoreError::Validation`](super::StoreError::Validation) when a required field is empty
/// or a referenced record does not exist.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Artists
    // =========================================================================

    /// List all artists in insertion order.
    fn list_artists(&self) -> StoreResult<Vec<Artist>>;

    fn get_artist(&self, id: &ArtistId) -> StoreResult<Artist>;

    fn create_artist(&self, artist: NewArtist) -> StoreResult<Artist>;

    /// Merge `patch` into the stored artist, refreshing `updated_at`.
    fn update_artist(&self, id: &ArtistId, patch: ArtistPatch) -> StoreResult<Artist>;

    /// Delete an artist. Albums pointing at it are left untouched.
    fn delete_artist(&self, id: &ArtistId) -> StoreResult<ArtistId>;

    // =========================================================================
    // Albums
    // =========================================================================

    fn list_albums(&self) -> StoreResult<Vec<Album>>;

    fn get_album(&self, id: &AlbumId) -> StoreResult<Album>;

    fn create_album(&self, album: NewAlbum) -> StoreResult<Album>;

    fn update_album(&self, id: &AlbumId, patch: AlbumPatch) -> StoreResult<Album>;

    /// Delete an album. Songs pointing at it are left untouched.
    fn delete_album(&self, id: &AlbumId) -> StoreResult<AlbumId>;

    // =========================================================================
    // Genres
    // =========================================================================

    fn list_genres(&self) -> StoreResult<Vec<Genre>>;

    fn get_genre(&self, id: &GenreId) -> StoreResult<Genre>;

    fn create_genre(&self, genre: NewGenre) -> StoreResult<Genre>;

    fn update_genre(&self, id: &GenreId, patch: GenrePatch) -> StoreResult<Genre>;

    /// Delete a genre, refusing with [`StoreError::Conflict`](super::StoreError::Conflict)
    /// while any song references it.
    fn delete_genre(&self, id: &GenreId) -> StoreResult<GenreId>;

    // =========================================================================
    // Songs
    // =========================================================================

    fn list_songs(&self) -> StoreResult<Vec<Song>>;

    fn get_song(&self, id: &SongId) -> StoreResult<Song>;

    fn create_song(&self, song: NewSong) -> StoreResult<Song>;

    fn update_song(&self, id: &SongId, patch: SongPatch) -> StoreResult<Song>;

    fn delete_song(&self, id: &SongId) -> StoreResult<SongId>;

    /// All songs referencing the given genre.
    fn find_songs_by_genre(&self, genre_id: &GenreId) -> StoreResult<Vec<Song>>;

    // =========================================================================
    // Aggregation
    // =========================================================================

    /// Number of records in a collection.
    fn count(&self, kind: EntityKind) -> StoreResult<usize>;

    /// Count the records of `field.owner()` per distinct value of `field`, ordered by value.
    fn group_count(&self, field: ReferenceField) -> StoreResult<Vec<GroupCount>>;

    // =========================================================================
    // Reference resolution
    // =========================================================================

    /// Get any record by kind and raw id as its JSON representation, `None` if absent.
    fn get_record_json(&self, kind: EntityKind, id: &str)
        -> StoreResult<Option<serde_json::Value>>;
}
