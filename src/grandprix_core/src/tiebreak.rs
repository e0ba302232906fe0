use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::driver::Driver;
use crate::error::{ChampionshipError, Result};
use crate::luck::LuckSource;
use crate::race::{run_race, RaceResult};
use crate::standings::Standings;
use crate::track::Track;

/// How the title was decided.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    /// A single driver held the highest points total
    Outright,

    /// Several drivers shared the lead and a single race separated them.
    /// Points from this race are never added to the standings.
    TieBreak {
        track: String,
        contenders: Vec<Driver>,
        race: RaceResult,
    },
}

/// The declared champion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChampionshipResult {
    pub champion: Driver,
    /// Season points of the champion
    pub points: u32,
    pub decided_by: Decision,
}

impl ChampionshipResult {
    pub fn via_tie_break(&self) -> bool {
        matches!(self.decided_by, Decision::TieBreak { .. })
    }
}

/// Pick the champion from final standings.
///
/// A sole leader wins outright and no luck is drawn. A shared lead goes to a
/// single race on `tie_break_track` between only the tied drivers, in their
/// standings order; its winner takes the title. A tie inside that race is
/// settled by the race's own ordering, never by another race.
///
/// # Errors
/// `InvalidRoster` when `standings` is empty.
pub fn resolve_champion<L: LuckSource + ?Sized>(
    standings: &Standings,
    tie_break_track: &Track,
    luck: &mut L,
) -> Result<ChampionshipResult> {
    let leaders = standings.leaders();
    let Some(first) = leaders.first() else {
        return Err(ChampionshipError::InvalidRoster);
    };
    let points = first.points;

    if leaders.len() == 1 {
        info!(champion = %first.driver.name, points, "champion declared outright");
        return Ok(ChampionshipResult {
            champion: first.driver.clone(),
            points,
            decided_by: Decision::Outright,
        });
    }

    let contenders: Vec<Driver> = leaders.iter().map(|e| e.driver.clone()).collect();
    warn!(
        tied = contenders.len(),
        points,
        track = %tie_break_track.name,
        "championship tied, running tie-break"
    );

    let race = run_race(&contenders, tie_break_track, luck)?;
    let champion = race.winner().driver.clone();
    info!(champion = %champion.name, points, "champion declared by tie-break");

    Ok(ChampionshipResult {
        champion,
        points,
        decided_by: Decision::TieBreak {
            track: tie_break_track.name.clone(),
            contenders,
            race,
        },
    })
}
