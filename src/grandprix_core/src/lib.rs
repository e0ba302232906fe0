//! Grandprix Core - Championship scoring and standings engine.
//!
//! Simulates a short season: drivers are scored on each track with bounded
//! luck, ranked, awarded points, and a shared title lead is settled by a single
//! tie-break race. All randomness comes in through a [`LuckSource`] so a fixed
//! seed reproduces a whole season. Python bindings are available with the
//! `python` feature.

pub mod constants;
pub mod driver;
pub mod error;
pub mod luck;
pub mod odds;
pub mod race;
pub mod roster;
pub mod score;
pub mod season;
pub mod standings;
pub mod tiebreak;
pub mod track;

#[cfg(feature = "python")]
mod python;

pub use constants::{points_for_position, MAX_LUCK, MIN_LUCK, POINTS_TABLE, SEASON_LENGTH};
pub use driver::Driver;
pub use error::{ChampionshipError, ConfigError};
pub use luck::{FixedLuck, LuckSource, RandomLuck, ScriptedLuck};
pub use odds::{title_odds, TitleOdds};
pub use race::{run_race, Placing, RaceResult};
pub use roster::{default_drivers, default_tracks, tie_break_track, RosterConfig};
pub use score::score;
pub use season::{run_season, RaceReport, Season, SeasonOutcome, SeasonPhase, SeasonResult};
pub use standings::{Standings, StandingsEntry};
pub use tiebreak::{resolve_champion, ChampionshipResult, Decision};
pub use track::Track;
