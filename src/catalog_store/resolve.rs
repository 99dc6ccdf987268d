//! Reference population for API responses.
//!
//! Records store references as plain ids. Before a record leaves the server, each
//! declared reference field is replaced by the referenced record, trimmed to the
//! selected fields and expanded further when the expansion is nested.

use super::error::{StoreError, StoreResult};
use super::models::{Album, EntityKind, Song};
use super::trait_def::CatalogStore;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Which fields of a referenced record are inlined. `id` is always kept.
#[derive(Clone, Copy, Debug)]
pub enum Select {
    All,
    Fields(&'static [&'static str]),
}

/// Replace the id stored in `field` with the `target` record it points at.
#[derive(Clone, Copy, Debug)]
pub struct Expand {
    pub field: &'static str,
    pub target: EntityKind,
    pub select: Select,
    /// Expansions applied to the inlined record.
    pub nested: &'static [Expand],
}

pub const ALBUM_EXPANSION: &[Expand] = &[Expand {
    field: "artist",
    target: EntityKind::Artist,
    select: Select::All,
    nested: &[],
}];

pub const SONG_EXPANSION: &[Expand] = &[
    Expand {
        field: "album",
        target: EntityKind::Album,
        select: Select::Fields(&["title", "artist"]),
        nested: &[Expand {
            field: "artist",
            target: EntityKind::Artist,
            select: Select::Fields(&["name"]),
            nested: &[],
        }],
    },
    Expand {
        field: "genre",
        target: EntityKind::Genre,
        select: Select::All,
        nested: &[],
    },
];

/// Expands references of one or more records, looking each referenced record up once.
pub struct Resolver<'a> {
    store: &'a dyn CatalogStore,
    cache: HashMap<(EntityKind, String), Option<Value>>,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Resolver {
            store,
            cache: HashMap::new(),
        }
    }

    pub fn resolve<T: Serialize>(&mut self, record: &T, expansions: &[Expand]) -> StoreResult<Value> {
        let mut value = serde_json::to_value(record).map_err(|e| StoreError::Other(e.into()))?;
        self.expand(&mut value, expansions)?;
        Ok(value)
    }

    pub fn resolve_all<T: Serialize>(
        &mut self,
        records: &[T],
        expansions: &[Expand],
    ) -> StoreResult<Vec<Value>> {
        records
            .iter()
            .map(|record| self.resolve(record, expansions))
            .collect()
    }

    fn lookup(&mut self, kind: EntityKind, id: &str) -> StoreResult<Option<Value>> {
        let key = (kind, id.to_string());
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }
        let record = self.store.get_record_json(kind, id)?;
        self.cache.insert(key, record.clone());
        Ok(record)
    }

    fn expand(&mut self, value: &mut Value, expansions: &[Expand]) -> StoreResult<()> {
        let Some(object) = value.as_object_mut() else {
            return Ok(());
        };
        for expansion in expansions {
            let Some(Value::String(id)) = object.get(expansion.field) else {
                continue;
            };
            let replacement = match self.lookup(expansion.target, id)? {
                Some(record) => {
                    let mut projected = project(record, expansion.select);
                    self.expand(&mut projected, expansion.nested)?;
                    projected
                }
                None => Value::Null,
            };
            object.insert(expansion.field.to_string(), replacement);
        }
        Ok(())
    }
}

fn project(record: Value, select: Select) -> Value {
    match (select, record) {
        (Select::All, record) => record,
        (Select::Fields(fields), Value::Object(mut source)) => {
            let mut projected = Map::new();
            if let Some(id) = source.remove("id") {
                projected.insert("id".to_string(), id);
            }
            for field in fields {
                if let Some(v) = source.remove(*field) {
                    projected.insert(field.to_string(), v);
                }
            }
            Value::Object(projected)
        }
        (_, record) => record,
    }
}

pub fn resolve_album(store: &dyn CatalogStore, album: &Album) -> StoreResult<Value> {
    Resolver::new(store).resolve(album, ALBUM_EXPANSION)
}

pub fn resolve_albums(store: &dyn CatalogStore, albums: &[Album]) -> StoreResult<Vec<Value>> {
    Resolver::new(store).resolve_all(albums, ALBUM_EXPANSION)
}

pub fn resolve_song(store: &dyn CatalogStore, song: &Song) -> StoreResult<Value> {
    Resolver::new(store).resolve(song, SONG_EXPANSION)
}

pub fn resolve_songs(store: &dyn CatalogStore, songs: &[Song]) -> StoreResult<Vec<Value>> {
    Resolver::new(store).resolve_all(songs, SONG_EXPANSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        store: SqliteCatalogStore,
        album: Album,
        songs: Vec<Song>,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let store = SqliteCatalogStore::new(dir.path().join("catalog.db"), 1).unwrap();
        let artist = store
            .create_artist(NewArtist {
                name: "Miles Davis".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1926, 5, 26).unwrap(),
            })
            .unwrap();
        let album = store
            .create_album(NewAlbum {
                title: "Kind of Blue".to_string(),
                release_date: NaiveDate::from_ymd_opt(1959, 8, 17).unwrap(),
                artist: artist.id.clone(),
            })
            .unwrap();
        let genre = store
            .create_genre(NewGenre {
                name: "Jazz".to_string(),
            })
            .unwrap();
        let songs = ["So What", "Freddie Freeloader"]
            .iter()
            .map(|title| {
                store
                    .create_song(NewSong {
                        title: title.to_string(),
                        duration: 545.0,
                        album: album.id.clone(),
                        genre: genre.id.clone(),
                    })
                    .unwrap()
            })
            .collect();
        Fixture {
            _dir: dir,
            store,
            album,
            songs,
        }
    }

    /// Counts record lookups going to the underlying store.
    struct CountingStore<'a> {
        inner: &'a SqliteCatalogStore,
        lookups: std::sync::atomic::AtomicUsize,
    }

    macro_rules! delegate {
        ($($name:ident($($arg:ident: $ty:ty),*) -> $ret:ty;)*) => {
            $(fn $name(&self, $($arg: $ty),*) -> $ret { self.inner.$name($($arg),*) })*
        };
    }

    impl CatalogStore for CountingStore<'_> {
        delegate! {
            list_artists() -> StoreResult<Vec<Artist>>;
            get_artist(id: &ArtistId) -> StoreResult<Artist>;
            create_artist(a: NewArtist) -> StoreResult<Artist>;
            update_artist(id: &ArtistId, p: ArtistPatch) -> StoreResult<Artist>;
            delete_artist(id: &ArtistId) -> StoreResult<ArtistId>;
            list_albums() -> StoreResult<Vec<Album>>;
            get_album(id: &AlbumId) -> StoreResult<Album>;
            create_album(a: NewAlbum) -> StoreResult<Album>;
            update_album(id: &AlbumId, p: AlbumPatch) -> StoreResult<Album>;
            delete_album(id: &AlbumId) -> StoreResult<AlbumId>;
            list_genres() -> StoreResult<Vec<Genre>>;
            get_genre(id: &GenreId) -> StoreResult<Genre>;
            create_genre(g: NewGenre) -> StoreResult<Genre>;
            update_genre(id: &GenreId, p: GenrePatch) -> StoreResult<Genre>;
            delete_genre(id: &GenreId) -> StoreResult<GenreId>;
            list_songs() -> StoreResult<Vec<Song>>;
            get_song(id: &SongId) -> StoreResult<Song>;
            create_song(s: NewSong) -> StoreResult<Song>;
            update_song(id: &SongId, p: SongPatch) -> StoreResult<Song>;
            delete_song(id: &SongId) -> StoreResult<SongId>;
            find_songs_by_genre(id: &GenreId) -> StoreResult<Vec<Song>>;
            count(kind: EntityKind) -> StoreResult<usize>;
            group_count(field: ReferenceField) -> StoreResult<Vec<GroupCount>>;
        }

        fn get_record_json(&self, kind: EntityKind, id: &str) -> StoreResult<Option<Value>> {
            self.lookups.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.inner.get_record_json(kind, id)
        }
    }

    #[test]
    fn album_artist_is_inlined_in_full() {
        let f = fixture();

        let value = resolve_album(&f.store, &f.album).unwrap();

        assert_eq!(value["title"], "Kind of Blue");
        assert_eq!(value["artist"]["name"], "Miles Davis");
        assert_eq!(value["artist"]["birthDate"], "1926-05-26");
        assert!(value["artist"]["createdAt"].is_string());
    }

    #[test]
    fn song_expansion_selects_nested_fields() {
        let f = fixture();

        let value = resolve_song(&f.store, &f.songs[0]).unwrap();

        let album = value["album"].as_object().unwrap();
        let mut keys: Vec<&str> = album.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["artist", "id", "title"]);
        assert_eq!(album["id"], f.album.id.as_str());
        assert_eq!(album["title"], "Kind of Blue");

        let artist = album["artist"].as_object().unwrap();
        assert_eq!(artist.len(), 2);
        assert_eq!(artist["name"], "Miles Davis");

        assert_eq!(value["genre"]["name"], "Jazz");
        assert!(value["genre"]["updatedAt"].is_string());
        assert_eq!(value["duration"], 545.0);
    }

    #[test]
    fn dangling_reference_resolves_to_null() {
        let f = fixture();
        f.store.delete_album(&f.album.id).unwrap();

        let value = resolve_song(&f.store, &f.songs[0]).unwrap();

        assert!(value["album"].is_null());
        assert_eq!(value["genre"]["name"], "Jazz");
    }

    #[test]
    fn dangling_nested_reference_resolves_to_null() {
        let f = fixture();
        f.store.delete_artist(&f.album.artist).unwrap();

        let value = resolve_song(&f.store, &f.songs[0]).unwrap();

        assert_eq!(value["album"]["title"], "Kind of Blue");
        assert!(value["album"]["artist"].is_null());
    }

    #[test]
    fn lookups_are_memoized_within_one_call() {
        let f = fixture();
        let counting = CountingStore {
            inner: &f.store,
            lookups: Default::default(),
        };

        let values = resolve_songs(&counting, &f.songs).unwrap();

        assert_eq!(values.len(), 2);
        // album, album.artist, genre: once each despite two songs.
        assert_eq!(
            counting.lookups.load(std::sync::atomic::Ordering::SeqCst),
            3
        );
    }
}
