//! Validation for catalog records.
//!
//! Records are validated after a create payload or a patch has been applied,
//! right before they are written.

use super::models::{Album, Artist, EntityKind, Genre, Song};
use std::fmt;

/// Validation error types
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyField {
        field: &'static str,
    },
    InvalidNumber {
        field: &'static str,
        value: f64,
    },
    ForeignKeyViolation {
        entity: EntityKind,
        id: String,
    },
    MalformedBody(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
            ValidationError::InvalidNumber { field, value } => {
                write!(
                    f,
                    "Field '{}' must be a finite, non-negative number, got {}",
                    field, value
                )
            }
            ValidationError::ForeignKeyViolation { entity, id } => {
                write!(f, "Referenced {} '{}' does not exist", entity, id)
            }
            ValidationError::MalformedBody(reason) => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

fn require_text(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

pub fn validate_artist(artist: &Artist) -> ValidationResult<()> {
    require_text("name", &artist.name)
}

pub fn validate_album(album: &Album) -> ValidationResult<()> {
    require_text("title", &album.title)?;
    require_text("artist", album.artist.as_str())
}

pub fn validate_genre(genre: &Genre) -> ValidationResult<()> {
    require_text("name", &genre.name)
}

pub fn validate_song(song: &Song) -> ValidationResult<()> {
    require_text("title", &song.title)?;
    if !song.duration.is_finite() || song.duration < 0.0 {
        return Err(ValidationError::InvalidNumber {
            field: "duration",
            value: song.duration,
        });
    }
    require_text("album", song.album.as_str())?;
    require_text("genre", song.genre.as_str())
}
