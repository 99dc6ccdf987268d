//! SQLite-backed catalog store implementation.
//!
//! Writes go through a single connection, each inside an immediate transaction, so
//! check-then-write sequences (reference checks, the genre deletion guard) cannot
//! interleave. Reads are spread over a small pool of read-only connections.

use super::deletion_guard::ensure_genre_deletable;
use super::error::{StoreError, StoreResult};
use super::models::*;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::{CatalogStore, GroupCount};
use super::validation::{
    validate_album, validate_artist, validate_genre, validate_song, ValidationError,
};
use crate::sqlite_persistence::ensure_schema;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row, Transaction};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// SQLite-backed catalog store.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
}

/// A record type stored in one catalog table.
trait Record: Sized + serde::Serialize {
    const KIND: EntityKind;
    /// Column list matching the field order expected by `from_row`.
    const COLUMNS: &'static str;

    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

impl Record for Artist {
    const KIND: EntityKind = EntityKind::Artist;
    const COLUMNS: &'static str = "id, name, birth_date, created_at, updated_at";

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Artist {
            id: row.get::<_, String>(0)?.into(),
            name: row.get(1)?,
            birth_date: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

impl Record for Album {
    const KIND: EntityKind = EntityKind::Album;
    const COLUMNS: &'static str = "id, title, release_date, artist_id, created_at, updated_at";

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Album {
            id: row.get::<_, String>(0)?.into(),
            title: row.get(1)?,
            release_date: row.get(2)?,
            artist: row.get::<_, String>(3)?.into(),
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }
}

impl Record for Genre {
    const KIND: EntityKind = EntityKind::Genre;
    const COLUMNS: &'static str = "id, name, created_at, updated_at";

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Genre {
            id: row.get::<_, String>(0)?.into(),
            name: row.get(1)?,
            created_at: row.get(2)?,
            updated_at: row.get(3)?,
        })
    }
}

impl Record for Song {
    const KIND: EntityKind = EntityKind::Song;
    const COLUMNS: &'static str =
        "id, title, duration, album_id, genre_id, created_at, updated_at";

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Song {
            id: row.get::<_, String>(0)?.into(),
            title: row.get(1)?,
            duration: row.get(2)?,
            album: row.get::<_, String>(3)?.into(),
            genre: row.get::<_, String>(4)?.into(),
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

// =============================================================================
// Row helpers shared by reads and writes
// =============================================================================

fn fetch<T: Record>(conn: &Connection, id: &str) -> StoreResult<Option<T>> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", T::COLUMNS, T::KIND.table());
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row(params![id], T::from_row).optional()?)
}

fn require<T: Record>(conn: &Connection, id: &str) -> StoreResult<T> {
    fetch(conn, id)?.ok_or_else(|| StoreError::not_found(T::KIND, id))
}

fn fetch_all<T: Record>(conn: &Connection) -> StoreResult<Vec<T>> {
    let sql = format!(
        "SELECT {} FROM {} ORDER BY rowid",
        T::COLUMNS,
        T::KIND.table()
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt
        .query_map([], T::from_row)?
        .collect::<rusqlite::Result<Vec<T>>>()?;
    Ok(rows)
}

fn exists(conn: &Connection, kind: EntityKind, id: &str) -> StoreResult<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", kind.table());
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row(params![id], |r| r.get(0))?)
}

/// Fail with a validation error when a referenced record does not exist.
fn ensure_reference(conn: &Connection, kind: EntityKind, id: &str) -> StoreResult<()> {
    if !exists(conn, kind, id)? {
        return Err(ValidationError::ForeignKeyViolation {
            entity: kind,
            id: id.to_string(),
        }
        .into());
    }
    Ok(())
}

fn delete_row(conn: &Connection, kind: EntityKind, id: &str) -> StoreResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
    let deleted = conn.execute(&sql, params![id])?;
    if deleted == 0 {
        return Err(StoreError::not_found(kind, id));
    }
    debug!("Deleted {} {}", kind, id);
    Ok(())
}

fn to_json<T: Record>(record: Option<T>) -> StoreResult<Option<serde_json::Value>> {
    record
        .map(|r| serde_json::to_value(r).map_err(|e| StoreError::Other(e.into())))
        .transpose()
}

fn lock(conn: &Mutex<Connection>) -> StoreResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| StoreError::Other(anyhow!("Catalog connection mutex poisoned")))
}

impl SqliteCatalogStore {
    /// Open (or create) the catalog database at `db_path`.
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    /// * `read_pool_size` - Number of connections for concurrent read operations
    pub fn new<P: AsRef<Path>>(db_path: P, read_pool_size: usize) -> Result<Self> {
        let db_path = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open catalog database at {:?}", db_path))?;

        write_conn.pragma_update(None, "journal_mode", "WAL")?;
        ensure_schema(&mut write_conn, CATALOG_VERSIONED_SCHEMAS)?;

        let mut read_pool = Vec::with_capacity(read_pool_size.max(1));
        for _ in 0..read_pool_size.max(1) {
            let read_conn = Connection::open_with_flags(
                db_path,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        let store = SqliteCatalogStore {
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
        };

        info!(
            "Opened catalog: {} artists, {} albums, {} songs, {} genres",
            store.count(EntityKind::Artist)?,
            store.count(EntityKind::Album)?,
            store.count(EntityKind::Song)?,
            store.count(EntityKind::Genre)?,
        );

        Ok(store)
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    fn read<T>(&self, op: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let conn = self.get_read_conn();
        let conn = lock(&conn)?;
        op(&conn)
    }

    /// Run `op` in an immediate transaction on the write connection.
    /// The transaction is rolled back when `op` fails.
    fn write<T>(&self, op: impl FnOnce(&Transaction) -> StoreResult<T>) -> StoreResult<T> {
        let mut conn = lock(&self.write_conn)?;
        let tx = conn.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        let result = op(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

impl CatalogStore for SqliteCatalogStore {
    // =========================================================================
    // Artists
    // =========================================================================

    fn list_artists(&self) -> StoreResult<Vec<Artist>> {
        self.read(fetch_all)
    }

    fn get_artist(&self, id: &ArtistId) -> StoreResult<Artist> {
        self.read(|conn| require(conn, id.as_str()))
    }

    fn create_artist(&self, artist: NewArtist) -> StoreResult<Artist> {
        let now = Utc::now();
        let artist = Artist {
            id: ArtistId::generate(),
            name: artist.name,
            birth_date: artist.birth_date,
            created_at: now,
            updated_at: now,
        };
        validate_artist(&artist)?;

        self.write(|tx| {
            tx.execute(
                "INSERT INTO artists (id, name, birth_date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    artist.id,
                    artist.name,
                    artist.birth_date,
                    artist.created_at,
                    artist.updated_at
                ],
            )?;
            Ok(())
        })?;
        debug!("Created artist {}", artist.id);
        Ok(artist)
    }

    fn update_artist(&self, id: &ArtistId, patch: ArtistPatch) -> StoreResult<Artist> {
        self.write(|tx| {
            let mut artist: Artist = require(tx, id.as_str())?;
            artist.apply(patch);
            artist.updated_at = Utc::now();
            validate_artist(&artist)?;

            tx.execute(
                "UPDATE artists SET name = ?2, birth_date = ?3, updated_at = ?4 WHERE id = ?1",
                params![artist.id, artist.name, artist.birth_date, artist.updated_at],
            )?;
            Ok(artist)
        })
    }

    fn delete_artist(&self, id: &ArtistId) -> StoreResult<ArtistId> {
        self.write(|tx| delete_row(tx, EntityKind::Artist, id.as_str()))?;
        Ok(id.clone())
    }

    // =========================================================================
    // Albums
    // =========================================================================

    fn list_albums(&self) -> StoreResult<Vec<Album>> {
        self.read(fetch_all)
    }

    fn get_album(&self, id: &AlbumId) -> StoreResult<Album> {
        self.read(|conn| require(conn, id.as_str()))
    }

    fn create_album(&self, album: NewAlbum) -> StoreResult<Album> {
        let now = Utc::now();
        let album = Album {
            id: AlbumId::generate(),
            title: album.title,
            release_date: album.release_date,
            artist: album.artist,
            created_at: now,
            updated_at: now,
        };
        validate_album(&album)?;

        self.write(|tx| {
            ensure_reference(tx, EntityKind::Artist, album.artist.as_str())?;
            tx.execute(
                "INSERT INTO albums (id, title, release_date, artist_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    album.id,
                    album.title,
                    album.release_date,
                    album.artist,
                    album.created_at,
                    album.updated_at
                ],
            )?;
            Ok(())
        })?;
        debug!("Created album {}", album.id);
        Ok(album)
    }

    fn update_album(&self, id: &AlbumId, patch: AlbumPatch) -> StoreResult<Album> {
        self.write(|tx| {
            let mut album: Album = require(tx, id.as_str())?;
            if let Some(artist) = &patch.artist {
                ensure_reference(tx, EntityKind::Artist, artist.as_str())?;
            }
            album.apply(patch);
            album.updated_at = Utc::now();
            validate_album(&album)?;

            tx.execute(
                "UPDATE albums SET title = ?2, release_date = ?3, artist_id = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![
                    album.id,
                    album.title,
                    album.release_date,
                    album.artist,
                    album.updated_at
                ],
            )?;
            Ok(album)
        })
    }

    fn delete_album(&self, id: &AlbumId) -> StoreResult<AlbumId> {
        self.write(|tx| delete_row(tx, EntityKind::Album, id.as_str()))?;
        Ok(id.clone())
    }

    // =========================================================================
    // Genres
    // =========================================================================

    fn list_genres(&self) -> StoreResult<Vec<Genre>> {
        self.read(fetch_all)
    }

    fn get_genre(&self, id: &GenreId) -> StoreResult<Genre> {
        self.read(|conn| require(conn, id.as_str()))
    }

    fn create_genre(&self, genre: NewGenre) -> StoreResult<Genre> {
        let now = Utc::now();
        let genre = Genre {
            id: GenreId::generate(),
            name: genre.name,
            created_at: now,
            updated_at: now,
        };
        validate_genre(&genre)?;

        self.write(|tx| {
            tx.execute(
                "INSERT INTO genres (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
                params![genre.id, genre.name, genre.created_at, genre.updated_at],
            )?;
            Ok(())
        })?;
        debug!("Created genre {}", genre.id);
        Ok(genre)
    }

    fn update_genre(&self, id: &GenreId, patch: GenrePatch) -> StoreResult<Genre> {
        self.write(|tx| {
            let mut genre: Genre = require(tx, id.as_str())?;
            genre.apply(patch);
            genre.updated_at = Utc::now();
            validate_genre(&genre)?;

            tx.execute(
                "UPDATE genres SET name = ?2, updated_at = ?3 WHERE id = ?1",
                params![genre.id, genre.name, genre.updated_at],
            )?;
            Ok(genre)
        })
    }

    fn delete_genre(&self, id: &GenreId) -> StoreResult<GenreId> {
        self.write(|tx| {
            if !exists(tx, EntityKind::Genre, id.as_str())? {
                return Err(StoreError::not_found(EntityKind::Genre, id));
            }
            ensure_genre_deletable(tx, id)?;
            delete_row(tx, EntityKind::Genre, id.as_str())
        })?;
        Ok(id.clone())
    }

    // =========================================================================
    // Songs
    // =========================================================================

    fn list_songs(&self) -> StoreResult<Vec<Song>> {
        self.read(fetch_all)
    }

    fn get_song(&self, id: &SongId) -> StoreResult<Song> {
        self.read(|conn| require(conn, id.as_str()))
    }

    fn create_song(&self, song: NewSong) -> StoreResult<Song> {
        let now = Utc::now();
        let song = Song {
            id: SongId::generate(),
            title: song.title,
            duration: song.duration,
            album: song.album,
            genre: song.genre,
            created_at: now,
            updated_at: now,
        };
        validate_song(&song)?;

        self.write(|tx| {
            ensure_reference(tx, EntityKind::Album, song.album.as_str())?;
            ensure_reference(tx, EntityKind::Genre, song.genre.as_str())?;
            tx.execute(
                "INSERT INTO songs (id, title, duration, album_id, genre_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    song.id,
                    song.title,
                    song.duration,
                    song.album,
                    song.genre,
                    song.created_at,
                    song.updated_at
                ],
            )?;
            Ok(())
        })?;
        debug!("Created song {}", song.id);
        Ok(song)
    }

    fn update_song(&self, id: &SongId, patch: SongPatch) -> StoreResult<Song> {
        self.write(|tx| {
            let mut song: Song = require(tx, id.as_str())?;
            if let Some(album) = &patch.album {
                ensure_reference(tx, EntityKind::Album, album.as_str())?;
            }
            if let Some(genre) = &patch.genre {
                ensure_reference(tx, EntityKind::Genre, genre.as_str())?;
            }
            song.apply(patch);
            song.updated_at = Utc::now();
            validate_song(&song)?;

            tx.execute(
                "UPDATE songs SET title = ?2, duration = ?3, album_id = ?4, genre_id = ?5,
                 updated_at = ?6 WHERE id = ?1",
                params![
                    song.id,
                    song.title,
                    song.duration,
                    song.album,
                    song.genre,
                    song.updated_at
                ],
            )?;
            Ok(song)
        })
    }

    fn delete_song(&self, id: &SongId) -> StoreResult<SongId> {
        self.write(|tx| delete_row(tx, EntityKind::Song, id.as_str()))?;
        Ok(id.clone())
    }

    fn find_songs_by_genre(&self, genre_id: &GenreId) -> StoreResult<Vec<Song>> {
        self.read(|conn| {
            let sql = format!(
                "SELECT {} FROM songs WHERE genre_id = ?1 ORDER BY rowid",
                Song::COLUMNS
            );
            let mut stmt = conn.prepare_cached(&sql)?;
            let songs = stmt
                .query_map(params![genre_id], Song::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(songs)
        })
    }

    // =========================================================================
    // Aggregation
    // =========================================================================

    fn count(&self, kind: EntityKind) -> StoreResult<usize> {
        self.read(|conn| {
            let count: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", kind.table()),
                [],
                |r| r.get(0),
            )?;
            Ok(count as usize)
        })
    }

    fn group_count(&self, field: ReferenceField) -> StoreResult<Vec<GroupCount>> {
        self.read(|conn| {
            let sql = format!(
                "SELECT {column}, COUNT(*) FROM {table} GROUP BY {column} ORDER BY {column}",
                column = field.column(),
                table = field.owner().table()
            );
            let mut stmt = conn.prepare_cached(&sql)?;
            let groups = stmt
                .query_map([], |row| {
                    Ok(GroupCount {
                        key: row.get(0)?,
                        count: row.get::<_, i64>(1)? as usize,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(groups)
        })
    }

    // =========================================================================
    // Reference resolution
    // =========================================================================

    fn get_record_json(
        &self,
        kind: EntityKind,
        id: &str,
    ) -> StoreResult<Option<serde_json::Value>> {
        self.read(|conn| match kind {
            EntityKind::Artist => to_json(fetch::<Artist>(conn, id)?),
            EntityKind::Album => to_json(fetch::<Album>(conn, id)?),
            EntityKind::Song => to_json(fetch::<Song>(conn, id)?),
            EntityKind::Genre => to_json(fetch::<Genre>(conn, id)?),
        })
    }
}
