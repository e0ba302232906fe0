//! Championship accumulator and season lifecycle.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::driver::Driver;
use crate::error::{ChampionshipError, Result};
use crate::luck::LuckSource;
use crate::race::{run_race, RaceResult};
use crate::standings::Standings;
use crate::tiebreak::{resolve_champion, ChampionshipResult};
use crate::track::Track;

/// Where a season is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonPhase {
    NotStarted,
    RacesInProgress { completed: usize },
    StandingsFinal,
    TieBreakPending,
    ChampionDeclared,
}

/// One completed round of the season.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceReport {
    /// Round number, 1-indexed
    pub round: usize,
    pub track: Track,
    pub result: RaceResult,
    /// Standings after this round's points were added
    pub standings: Standings,
}

/// Final standings plus every race that produced them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonResult {
    pub standings: Standings,
    pub races: Vec<RaceReport>,
}

impl SeasonResult {
    /// Sum of a driver's awards across all races.
    pub fn points_from_races(&self, driver_name: &str) -> u32 {
        self.races
            .iter()
            .map(|r| r.result.points_for(driver_name))
            .sum()
    }
}

/// A season with its champion decided.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonOutcome {
    pub season: SeasonResult,
    pub champion: ChampionshipResult,
}

/// Season state: roster, schedule and cumulative points.
///
/// Races run strictly in schedule order. Standings are recomputed from the
/// cumulative totals after every race.
#[derive(Clone, Debug)]
pub struct Season {
    roster: Vec<Driver>,
    schedule: Vec<Track>,
    /// Cumulative points, indexed like `roster`
    totals: Vec<u32>,
    races: Vec<RaceReport>,
    phase: SeasonPhase,
    champion: Option<ChampionshipResult>,
}

impl Season {
    /// Create a season.
    ///
    /// # Errors
    /// `InvalidRoster` for no drivers, `InvalidTrackList` for no tracks.
    pub fn new(roster: Vec<Driver>, schedule: Vec<Track>) -> Result<Self> {
        if roster.is_empty() {
            return Err(ChampionshipError::InvalidRoster);
        }
        if schedule.is_empty() {
            return Err(ChampionshipError::InvalidTrackList);
        }

        let totals = vec![0; roster.len()];
        Ok(Season {
            roster,
            schedule,
            totals,
            races: Vec::new(),
            phase: SeasonPhase::NotStarted,
            champion: None,
        })
    }

    pub fn phase(&self) -> SeasonPhase {
        self.phase
    }

    pub fn roster(&self) -> &[Driver] {
        &self.roster
    }

    pub fn schedule(&self) -> &[Track] {
        &self.schedule
    }

    pub fn races(&self) -> &[RaceReport] {
        &self.races
    }

    pub fn champion(&self) -> Option<&ChampionshipResult> {
        self.champion.as_ref()
    }

    /// Track for the next race, if any remain.
    pub fn next_track(&self) -> Option<&Track> {
        self.schedule.get(self.races.len())
    }

    pub fn standings(&self) -> Standings {
        Standings::from_totals(&self.roster, &self.totals)
    }

    /// Run the next scheduled race.
    ///
    /// Returns `None` once every race on the schedule has been run.
    pub fn run_next_race<L: LuckSource + ?Sized>(
        &mut self,
        luck: &mut L,
    ) -> Result<Option<&RaceReport>> {
        let Some(track) = self.next_track().cloned() else {
            return Ok(None);
        };

        let result = run_race(&self.roster, &track, luck)?;
        for placing in &result.placings {
            self.totals[placing.roster_index] += placing.points;
        }

        let round = self.races.len() + 1;
        let standings = self.standings();
        info!(
            round,
            of = self.schedule.len(),
            track = %track.name,
            winner = %result.winner().driver.name,
            leader = %standings.leader().map(|e| e.driver.name.as_str()).unwrap_or(""),
            "round complete"
        );

        self.races.push(RaceReport {
            round,
            track,
            result,
            standings,
        });
        self.set_phase(if round == self.schedule.len() {
            SeasonPhase::StandingsFinal
        } else {
            SeasonPhase::RacesInProgress { completed: round }
        });

        Ok(self.races.last())
    }

    /// Run every remaining race.
    pub fn run_remaining<L: LuckSource + ?Sized>(&mut self, luck: &mut L) -> Result<()> {
        while self.run_next_race(luck)?.is_some() {}
        Ok(())
    }

    /// Decide the champion from the final standings.
    ///
    /// Any races not yet run are run first. Once declared, the champion is
    /// fixed and later calls return it without touching `luck`.
    pub fn declare_champion<L: LuckSource + ?Sized>(
        &mut self,
        tie_break_track: &Track,
        luck: &mut L,
    ) -> Result<&ChampionshipResult> {
        let champion = match self.champion.take() {
            Some(champion) => champion,
            None => {
                self.run_remaining(luck)?;

                let standings = self.standings();
                if standings.is_tied_at_top() {
                    self.set_phase(SeasonPhase::TieBreakPending);
                }

                let champion = resolve_champion(&standings, tie_break_track, luck)?;
                self.set_phase(SeasonPhase::ChampionDeclared);
                champion
            }
        };

        Ok(&*self.champion.insert(champion))
    }

    /// Run the season to the end and declare its champion.
    pub fn finish<L: LuckSource + ?Sized>(
        mut self,
        tie_break_track: &Track,
        luck: &mut L,
    ) -> Result<SeasonOutcome> {
        let champion = self.declare_champion(tie_break_track, luck)?.clone();
        Ok(SeasonOutcome {
            season: self.into_result(),
            champion,
        })
    }

    pub fn into_result(self) -> SeasonResult {
        let standings = Standings::from_totals(&self.roster, &self.totals);
        SeasonResult {
            standings,
            races: self.races,
        }
    }

    fn set_phase(&mut self, phase: SeasonPhase) {
        debug!(from = ?self.phase, to = ?phase, "season phase");
        self.phase = phase;
    }
}

/// Run every race on the schedule and return the final standings with each
/// race's report.
///
/// All-or-nothing: the first error aborts the season.
pub fn run_season<L: LuckSource + ?Sized>(
    roster: &[Driver],
    schedule: &[Track],
    luck: &mut L,
) -> Result<SeasonResult> {
    let mut season = Season::new(roster.to_vec(), schedule.to_vec())?;
    season.run_remaining(luck)?;
    Ok(season.into_result())
}
