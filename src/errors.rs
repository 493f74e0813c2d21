use std::fmt;

use thiserror::Error;

/// Why a character could not be resolved to a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedKind {
    /// The glyph source has no entry at all for the character.
    Missing,
    /// The glyph source lists the character but carries no stroke for it.
    Undefined,
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnsupportedKind::Missing => write!(f, "not supported"),
            UnsupportedKind::Undefined => write!(f, "has not been defined"),
        }
    }
}

/// Errors raised while shaping a continuous stroke.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrokeError {
    #[error("character {character:?} {kind}")]
    UnsupportedCharacter {
        character: char,
        kind: UnsupportedKind,
    },

    #[error(
        "line {line_index} ({text:?}) does not fit in circle of radius {radius:.2}: \
         point ({:.2}, {:.2}) is at distance {distance:.2}",
        .point.0,
        .point.1
    )]
    BoundsExceeded {
        line_index: usize,
        text: String,
        point: (f64, f64),
        distance: f64,
        radius: f64,
    },
}

impl StrokeError {
    pub fn missing(character: char) -> StrokeError {
        StrokeError::UnsupportedCharacter {
            character,
            kind: UnsupportedKind::Missing,
        }
    }

    pub fn undefined(character: char) -> StrokeError {
        StrokeError::UnsupportedCharacter {
            character,
            kind: UnsupportedKind::Undefined,
        }
    }
}
