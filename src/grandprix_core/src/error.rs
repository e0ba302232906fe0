//! Error types for the championship engine and its configuration layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while simulating races or a season.
///
/// None of these are recoverable mid-season: a season either runs every race
/// or does not run at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChampionshipError {
    /// A race or tie-break was asked to rank zero drivers
    #[error("invalid roster: a race needs at least one driver")]
    InvalidRoster,

    /// A season was started with no tracks on the schedule
    #[error("invalid track list: a season needs at least one track")]
    InvalidTrackList,

    /// Title odds were requested over zero simulated seasons
    #[error("invalid simulation count: at least one season must be simulated")]
    InvalidSimulationCount,
}

/// Errors raised while loading or validating a roster file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read roster file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("roster has no drivers")]
    EmptyRoster,

    #[error("driver {0:?} appears more than once")]
    DuplicateDriver(String),

    #[error("track {0:?} appears more than once")]
    DuplicateTrack(String),

    #[error("driver {driver:?} has {attribute} {value}, expected {min}..={max}")]
    DriverAttributeOutOfRange {
        driver: String,
        attribute: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },

    #[error("track {track:?} has {attribute} {value}, expected {min}..={max}")]
    TrackAttributeOutOfRange {
        track: String,
        attribute: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("season must have exactly {expected} tracks, found {found}")]
    WrongSeasonLength { expected: usize, found: usize },
}

pub type Result<T, E = ChampionshipError> = std::result::Result<T, E>;
