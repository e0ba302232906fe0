//! Built-in roster and roster files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DRIVER_ATTRIBUTE_RANGE, SEASON_LENGTH, TRACK_ATTRIBUTE_RANGE};
use crate::driver::Driver;
use crate::error::ConfigError;
use crate::track::Track;

/// The built-in drivers.
pub fn default_drivers() -> Vec<Driver> {
    vec![
        Driver::new("Juan Manuel Fangio", 10, 7),
        Driver::new("Michael Schumacher", 8, 10),
        Driver::new("Max Verstappen", 10, 9),
    ]
}

/// The built-in season schedule, in race order.
pub fn default_tracks() -> Vec<Track> {
    vec![
        Track::new("Monaco", 0.8, 0.2),
        Track::new("Suzuka", 0.75, 0.8),
        Track::new("Silverstone", 0.6, 1.0),
    ]
}

/// Dedicated venue for the title decider.
pub fn tie_break_track() -> Track {
    Track::new("Nürburgring", 0.95, 0.6)
}

/// Drivers, schedule and tie-break venue for one season.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    pub drivers: Vec<Driver>,
    pub tracks: Vec<Track>,
    pub tie_break_track: Track,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            drivers: default_drivers(),
            tracks: default_tracks(),
            tie_break_track: tie_break_track(),
        }
    }
}

impl RosterConfig {
    /// Read and validate a JSON roster file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON roster.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: RosterConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drivers.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if self.tracks.len() != SEASON_LENGTH {
            return Err(ConfigError::WrongSeasonLength {
                expected: SEASON_LENGTH,
                found: self.tracks.len(),
            });
        }

        let mut names = HashSet::new();
        for driver in &self.drivers {
            if !names.insert(driver.name.as_str()) {
                return Err(ConfigError::DuplicateDriver(driver.name.clone()));
            }
            check_driver_attribute(driver, "skill", driver.skill)?;
            check_driver_attribute(driver, "consistency", driver.consistency)?;
        }

        let mut names = HashSet::new();
        for track in &self.tracks {
            if !names.insert(track.name.as_str()) {
                return Err(ConfigError::DuplicateTrack(track.name.clone()));
            }
        }
        for track in self.tracks.iter().chain(Some(&self.tie_break_track)) {
            check_track_attribute(track, "difficulty", track.difficulty)?;
            check_track_attribute(track, "speed_bias", track.speed_bias)?;
        }

        Ok(())
    }
}

fn check_driver_attribute(driver: &Driver, attribute: &'static str, value: u8) -> Result<(), ConfigError> {
    let (min, max) = DRIVER_ATTRIBUTE_RANGE;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::DriverAttributeOutOfRange {
            driver: driver.name.clone(),
            attribute,
            value,
            min,
            max,
        })
    }
}

fn check_track_attribute(track: &Track, attribute: &'static str, value: f64) -> Result<(), ConfigError> {
    let (min, max) = TRACK_ATTRIBUTE_RANGE;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::TrackAttributeOutOfRange {
            track: track.name.clone(),
            attribute,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_valid() {
        let config = RosterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.drivers.len(), 3);
        assert_eq!(config.tracks.len(), SEASON_LENGTH);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "drivers": [
                {"name": "Alice", "skill": 8, "consistency": 6},
                {"name": "Bob", "skill": 6, "consistency": 9}
            ],
            "tracks": [
                {"name": "One", "difficulty": 0.5, "speed_bias": 0.5},
                {"name": "Two", "difficulty": 0.9, "speed_bias": 0.1},
                {"name": "Three", "difficulty": 0.2, "speed_bias": 0.8}
            ],
            "tie_break_track": {"name": "Decider", "difficulty": 1.0, "speed_bias": 0.0}
        }"#;

        let config = RosterConfig::from_json(json).unwrap();
        assert_eq!(config.drivers[0], Driver::new("Alice", 8, 6));
        assert_eq!(config.tie_break_track.name, "Decider");
    }

    #[test]
    fn test_duplicate_driver_rejected() {
        let mut config = RosterConfig::default();
        config.drivers.push(config.drivers[0].clone());
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateDriver(name)) if name == "Juan Manuel Fangio"));
    }

    #[test]
    fn test_duplicate_track_rejected() {
        let mut config = RosterConfig::default();
        config.tracks[2] = config.tracks[0].clone();
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateTrack(_))));
    }

    #[test]
    fn test_attribute_bounds() {
        let mut config = RosterConfig::default();
        config.drivers[1].skill = 11;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DriverAttributeOutOfRange { attribute: "skill", value: 11, .. })
        ));

        let mut config = RosterConfig::default();
        config.tie_break_track.speed_bias = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TrackAttributeOutOfRange { attribute: "speed_bias", .. })
        ));
    }

    #[test]
    fn test_season_length_fixed() {
        let mut config = RosterConfig::default();
        config.tracks.pop();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WrongSeasonLength { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn test_bundled_roster_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/rosters/modern.json");
        let config = RosterConfig::from_path(path).unwrap();
        assert_eq!(config.drivers.len(), 4);
        assert_eq!(config.tie_break_track.name, "Interlagos");
    }

    #[test]
    fn test_missing_file() {
        let result = RosterConfig::from_path("/nonexistent/roster.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(RosterConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
