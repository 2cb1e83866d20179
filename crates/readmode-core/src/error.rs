// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColourError {
    #[error("invalid colour \"{input}\": {reason}")]
    Format { input: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{field} must be within 0..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        max: u8,
    },

    #[error("no colour selected; per-colour levels need a preset or custom colour")]
    NoColourSelected,

    #[error(transparent)]
    Colour(#[from] ColourError),
}
