//! Catalog records, their typed identifiers and the request payloads that
//! create or patch them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl rusqlite::ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }
    };
}

entity_id!(
    /// Identifier of an [`Artist`].
    ArtistId
);
entity_id!(
    /// Identifier of an [`Album`].
    AlbumId
);
entity_id!(
    /// Identifier of a [`Song`].
    SongId
);
entity_id!(
    /// Identifier of a [`Genre`].
    GenreId
);

// =============================================================================
// Enumerations
// =============================================================================

/// The four record collections of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Artist,
    Album,
    Song,
    Genre,
}

impl EntityKind {
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Artist => "artists",
            EntityKind::Album => "albums",
            EntityKind::Song => "songs",
            EntityKind::Genre => "genres",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Artist => "Artist",
            EntityKind::Album => "Album",
            EntityKind::Song => "Song",
            EntityKind::Genre => "Genre",
        };
        f.write_str(name)
    }
}

/// A field of one record that holds the id of another record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceField {
    /// `Album.artist`
    AlbumArtist,
    /// `Song.album`
    SongAlbum,
    /// `Song.genre`
    SongGenre,
}

impl ReferenceField {
    /// The collection holding the field.
    pub fn owner(&self) -> EntityKind {
        match self {
            ReferenceField::AlbumArtist => EntityKind::Album,
            ReferenceField::SongAlbum | ReferenceField::SongGenre => EntityKind::Song,
        }
    }

    /// The collection the field points into.
    pub fn target(&self) -> EntityKind {
        match self {
            ReferenceField::AlbumArtist => EntityKind::Artist,
            ReferenceField::SongAlbum => EntityKind::Album,
            ReferenceField::SongGenre => EntityKind::Genre,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            ReferenceField::AlbumArtist => "artist_id",
            ReferenceField::SongAlbum => "album_id",
            ReferenceField::SongGenre => "genre_id",
        }
    }
}

// =============================================================================
// Records
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub release_date: NaiveDate,
    pub artist: ArtistId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub title: String,
    /// Length of the song in seconds.
    pub duration: f64,
    pub album: AlbumId,
    pub genre: GenreId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArtist {
    pub name: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub birth_date: NaiveDate,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlbum {
    pub title: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub release_date: NaiveDate,
    pub artist: ArtistId,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub release_date: Option<NaiveDate>,
    pub artist: Option<ArtistId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewGenre {
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenrePatch {
    pub name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub duration: f64,
    pub album: AlbumId,
    pub genre: GenreId,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SongPatch {
    pub title: Option<String>,
    pub duration: Option<f64>,
    pub album: Option<AlbumId>,
    pub genre: Option<GenreId>,
}

impl Artist {
    pub(crate) fn apply(&mut self, patch: ArtistPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = birth_date;
        }
    }
}

impl Album {
    pub(crate) fn apply(&mut self, patch: AlbumPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(release_date) = patch.release_date {
            self.release_date = release_date;
        }
        if let Some(artist) = patch.artist {
            self.artist = artist;
        }
    }
}

impl Genre {
    pub(crate) fn apply(&mut self, patch: GenrePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

impl Song {
    pub(crate) fn apply(&mut self, patch: SongPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(album) = patch.album {
            self.album = album;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
    }
}

// =============================================================================
// Date parsing
// =============================================================================

/// Parse either a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, keeping the UTC date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid date '{}', expected YYYY-MM-DD or an RFC 3339 timestamp",
            raw
        ))
    })
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_date(&raw).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid date '{}', expected YYYY-MM-DD or an RFC 3339 timestamp",
                raw
            ))
        }),
    }
}
