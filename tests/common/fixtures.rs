//! Test fixture creation for the catalog database
//!
//! Records are created through the store so they carry real timestamps and pass
//! validation, then their generated ids are swapped for the fixed ids in `constants`.

use super::constants::*;
use anyhow::Result;
use chrono::NaiveDate;
use music_catalog_server::catalog_store::{
    AlbumId, ArtistId, CatalogStore, GenreId, NewAlbum, NewArtist, NewGenre, NewSong,
    SqliteCatalogStore,
};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("Invalid fixture date")
}

fn assign_id(conn: &Connection, table: &str, generated: &str, fixed: &str) -> Result<()> {
    conn.execute(
        &format!("UPDATE {} SET id = ?1 WHERE id = ?2", table),
        params![fixed, generated],
    )?;
    Ok(())
}

/// Creates a temporary catalog with 2 artists, 3 albums, 3 genres and 3 songs.
/// Returns (temp_dir, catalog_db_path)
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let catalog_db_path = dir.path().join("catalog.db");

    let store = SqliteCatalogStore::new(&catalog_db_path, 1)?;
    let conn = Connection::open(&catalog_db_path)?;

    for (fixed, name, birth_date) in [
        (ARTIST_1_ID, ARTIST_1_NAME, ARTIST_1_BIRTH_DATE),
        (ARTIST_2_ID, ARTIST_2_NAME, ARTIST_2_BIRTH_DATE),
    ] {
        let artist = store.create_artist(NewArtist {
            name: name.to_string(),
            birth_date: date(birth_date),
        })?;
        assign_id(&conn, "artists", artist.id.as_str(), fixed)?;
    }

    for (fixed, title, release_date, artist) in [
        (ALBUM_1_ID, ALBUM_1_TITLE, ALBUM_1_RELEASE_DATE, ARTIST_1_ID),
        (ALBUM_2_ID, ALBUM_2_TITLE, ALBUM_2_RELEASE_DATE, ARTIST_2_ID),
        (ALBUM_3_ID, ALBUM_3_TITLE, ALBUM_3_RELEASE_DATE, ARTIST_1_ID),
    ] {
        let album = store.create_album(NewAlbum {
            title: title.to_string(),
            release_date: date(release_date),
            artist: ArtistId::from(artist),
        })?;
        assign_id(&conn, "albums", album.id.as_str(), fixed)?;
    }

    for (fixed, name) in [
        (GENRE_1_ID, GENRE_1_NAME),
        (GENRE_2_ID, GENRE_2_NAME),
        (GENRE_3_ID, GENRE_3_NAME),
    ] {
        let genre = store.create_genre(NewGenre {
            name: name.to_string(),
        })?;
        assign_id(&conn, "genres", genre.id.as_str(), fixed)?;
    }

    for (fixed, title, duration, album, genre) in [
        (SONG_1_ID, SONG_1_TITLE, SONG_1_DURATION, ALBUM_1_ID, GENRE_2_ID),
        (SONG_2_ID, SONG_2_TITLE, SONG_2_DURATION, ALBUM_1_ID, GENRE_1_ID),
        (SONG_3_ID, SONG_3_TITLE, SONG_3_DURATION, ALBUM_2_ID, GENRE_1_ID),
    ] {
        let song = store.create_song(NewSong {
            title: title.to_string(),
            duration,
            album: AlbumId::from(album),
            genre: GenreId::from(genre),
        })?;
        assign_id(&conn, "songs", song.id.as_str(), fixed)?;
    }

    Ok((dir, catalog_db_path))
}
