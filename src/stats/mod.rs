//! Dashboard statistics computed from the catalog on every request.
//!
//! Group counts come from the store, group keys are resolved through id maps built once
//! per computation, and the per-album song counts are joined with the per-artist album
//! counts into one entry per artist.

use crate::catalog_store::{
    Album, AlbumId, Artist, ArtistId, CatalogStore, EntityKind, Genre, GenreId, GroupCount,
    ReferenceField, StoreError, StoreResult,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityCounts {
    pub songs: usize,
    pub artists: usize,
    pub albums: usize,
    pub genres: usize,
}

/// Number of songs in one genre. `genre` is `None` when the genre no longer exists.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenreSongs {
    pub id: GenreId,
    pub genre: Option<Genre>,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlbumSongs {
    pub id: AlbumId,
    pub album: Option<Album>,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArtistAlbums {
    pub id: ArtistId,
    pub artist: Option<Artist>,
    pub count: usize,
}

/// Songs and albums of one artist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArtistStat {
    pub artist: String,
    pub songs: usize,
    pub albums: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub stat: EntityCounts,
    pub genre_songs: Vec<GenreSongs>,
    pub artist_stats: Vec<ArtistStat>,
    pub album_songs: Vec<AlbumSongs>,
    pub artist_albums: Vec<ArtistAlbums>,
}

fn index_by_id<K, V>(records: Vec<V>, id: impl Fn(&V) -> &K) -> HashMap<K, V>
where
    K: Clone + Eq + std::hash::Hash,
{
    records.into_iter().map(|r| (id(&r).clone(), r)).collect()
}

fn resolve_groups<K, V, T>(
    groups: Vec<GroupCount>,
    records: &HashMap<K, V>,
    make: impl Fn(K, Option<V>, usize) -> T,
) -> Vec<T>
where
    K: From<String> + Eq + std::hash::Hash,
    V: Clone,
{
    groups
        .into_iter()
        .map(|group| {
            let key = K::from(group.key);
            let record = records.get(&key).cloned();
            make(key, record, group.count)
        })
        .collect()
}

/// Join per-album song counts with per-artist album counts, one entry per artist.
fn join_artist_stats(
    album_songs: &[AlbumSongs],
    artist_albums: &[ArtistAlbums],
) -> StoreResult<Vec<ArtistStat>> {
    let albums_per_artist: HashMap<&ArtistId, &ArtistAlbums> =
        artist_albums.iter().map(|entry| (&entry.id, entry)).collect();

    let mut per_artist: HashMap<&ArtistId, ArtistStat> = HashMap::new();
    for entry in album_songs {
        let album = entry.album.as_ref().ok_or_else(|| {
            StoreError::InternalConsistency(format!(
                "Songs reference album {} which does not exist",
                entry.id
            ))
        })?;
        let artist_entry = albums_per_artist.get(&album.artist).ok_or_else(|| {
            StoreError::InternalConsistency(format!(
                "Album {} belongs to artist {} which has no album count",
                album.id, album.artist
            ))
        })?;
        let artist = artist_entry.artist.as_ref().ok_or_else(|| {
            StoreError::InternalConsistency(format!(
                "Album {} references artist {} which does not exist",
                album.id, album.artist
            ))
        })?;

        per_artist
            .entry(&artist.id)
            .or_insert_with(|| ArtistStat {
                artist: artist.name.clone(),
                songs: 0,
                albums: artist_entry.count,
            })
            .songs += entry.count;
    }

    let mut stats: Vec<ArtistStat> = per_artist.into_values().collect();
    stats.sort_by(|a, b| a.artist.cmp(&b.artist));
    Ok(stats)
}

/// Compute the dashboard statistics.
///
/// The reads are not isolated from each other, a write landing between them can make
/// the sections disagree or surface as an internal consistency error.
pub fn compute_dashboard_stats(store: &dyn CatalogStore) -> StoreResult<DashboardStats> {
    let stat = EntityCounts {
        songs: store.count(EntityKind::Song)?,
        artists: store.count(EntityKind::Artist)?,
        albums: store.count(EntityKind::Album)?,
        genres: store.count(EntityKind::Genre)?,
    };

    let songs_by_genre = store.group_count(ReferenceField::SongGenre)?;
    let songs_by_album = store.group_count(ReferenceField::SongAlbum)?;
    let albums_by_artist = store.group_count(ReferenceField::AlbumArtist)?;

    let genres = index_by_id(store.list_genres()?, |g: &Genre| &g.id);
    let albums = index_by_id(store.list_albums()?, |a: &Album| &a.id);
    let artists = index_by_id(store.list_artists()?, |a: &Artist| &a.id);

    let genre_songs = resolve_groups(songs_by_genre, &genres, |id, genre, count| GenreSongs {
        id,
        genre,
        count,
    });
    let album_songs = resolve_groups(songs_by_album, &albums, |id, album, count| AlbumSongs {
        id,
        album,
        count,
    });
    let artist_albums =
        resolve_groups(albums_by_artist, &artists, |id, artist, count| ArtistAlbums {
            id,
            artist,
            count,
        });

    let artist_stats = join_artist_stats(&album_songs, &artist_albums)?;
    debug!(
        "Computed stats over {} genres, {} albums, {} artists",
        genre_songs.len(),
        album_songs.len(),
        artist_stats.len()
    );

    Ok(DashboardStats {
        stat,
        genre_songs,
        artist_stats,
        album_songs,
        artist_albums,
    })
}
