//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes, update only this file.

// ============================================================================
// Test Catalog IDs
// ============================================================================

/// Artist ID for "Miles Davis"
pub const ARTIST_1_ID: &str = "artist-1";

/// Artist ID for "John Coltrane"
pub const ARTIST_2_ID: &str = "artist-2";

/// Album ID for "Kind of Blue" by Miles Davis
pub const ALBUM_1_ID: &str = "album-1";

/// Album ID for "Giant Steps" by John Coltrane
pub const ALBUM_2_ID: &str = "album-2";

/// Album ID for "Sketches of Spain" by Miles Davis, holds no songs
pub const ALBUM_3_ID: &str = "album-3";

/// Genre ID for "Jazz"
pub const GENRE_1_ID: &str = "genre-1";

/// Genre ID for "Modal Jazz"
pub const GENRE_2_ID: &str = "genre-2";

/// Genre ID for "Bebop", no song references it
pub const GENRE_3_ID: &str = "genre-3";

/// Song ID for "So What" on Kind of Blue (Modal Jazz)
pub const SONG_1_ID: &str = "song-1";

/// Song ID for "Blue in Green" on Kind of Blue (Jazz)
pub const SONG_2_ID: &str = "song-2";

/// Song ID for "Giant Steps" on Giant Steps (Jazz)
pub const SONG_3_ID: &str = "song-3";

// ============================================================================
// Test Catalog Content
// ============================================================================

pub const ARTIST_1_NAME: &str = "Miles Davis";
pub const ARTIST_1_BIRTH_DATE: &str = "1926-05-26";
pub const ARTIST_2_NAME: &str = "John Coltrane";
pub const ARTIST_2_BIRTH_DATE: &str = "1926-09-23";

pub const ALBUM_1_TITLE: &str = "Kind of Blue";
pub const ALBUM_1_RELEASE_DATE: &str = "1959-08-17";
pub const ALBUM_2_TITLE: &str = "Giant Steps";
pub const ALBUM_2_RELEASE_DATE: &str = "1960-01-27";
pub const ALBUM_3_TITLE: &str = "Sketches of Spain";
pub const ALBUM_3_RELEASE_DATE: &str = "1960-07-18";

pub const GENRE_1_NAME: &str = "Jazz";
pub const GENRE_2_NAME: &str = "Modal Jazz";
pub const GENRE_3_NAME: &str = "Bebop";

pub const SONG_1_TITLE: &str = "So What";
pub const SONG_1_DURATION: f64 = 562.0;
pub const SONG_2_TITLE: &str = "Blue in Green";
pub const SONG_2_DURATION: f64 = 337.0;
pub const SONG_3_TITLE: &str = "Giant Steps";
pub const SONG_3_DURATION: f64 = 286.0;

// ============================================================================
// Server
// ============================================================================

/// Prefix all API routes are nested under
pub const API_PREFIX: &str = "/api/v1";

/// Maximum time to wait for the test server to start
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Interval between readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
