use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::driver::Driver;
use crate::error::{ChampionshipError, Result};
use crate::luck::RandomLuck;
use crate::season::Season;
use crate::track::Track;

/// Confidence level for the title probability interval
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Estimated championship chances for one driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TitleOdds {
    pub driver: Driver,
    /// Seasons won, including those won in a tie-break
    pub titles: usize,
    pub tie_break_titles: usize,
    pub probability: f64,
    /// Normal-approximation interval around `probability`, clamped to [0, 1]
    pub interval: (f64, f64),
}

/// Estimate each driver's title chances by simulating many seasons.
///
/// Each season gets its own seed drawn from a master generator, so results
/// depend only on `seed` and not on how rayon schedules the work. Output is
/// ordered by titles won; drivers with equal counts stay in roster order.
///
/// # Arguments
/// * `roster` - Drivers in roster order
/// * `schedule` - Season tracks in race order
/// * `tie_break_track` - Venue for title deciders
/// * `simulations` - Number of seasons to run
/// * `seed` - Master seed
pub fn title_odds(
    roster: &[Driver],
    schedule: &[Track],
    tie_break_track: &Track,
    simulations: usize,
    seed: u64,
) -> Result<Vec<TitleOdds>> {
    if simulations == 0 {
        return Err(ChampionshipError::InvalidSimulationCount);
    }
    let template = Season::new(roster.to_vec(), schedule.to_vec())?;

    let mut master = ChaCha8Rng::seed_from_u64(seed);
    let seeds: Vec<u64> = (0..simulations).map(|_| master.gen::<u64>()).collect();

    let champions: Vec<(usize, bool)> = seeds
        .par_iter()
        .map(|&season_seed| -> Result<(usize, bool)> {
            let mut luck = RandomLuck::seeded(season_seed);
            let outcome = template.clone().finish(tie_break_track, &mut luck)?;
            let index = roster
                .iter()
                .position(|d| d.name == outcome.champion.champion.name)
                .unwrap_or_default();
            Ok((index, outcome.champion.via_tie_break()))
        })
        .collect::<Result<_>>()?;

    let mut titles = vec![0usize; roster.len()];
    let mut tie_break_titles = vec![0usize; roster.len()];
    for (index, via_tie_break) in champions {
        titles[index] += 1;
        if via_tie_break {
            tie_break_titles[index] += 1;
        }
    }

    let normal = Normal::new(0.0, 1.0).unwrap();
    let z = normal.inverse_cdf(0.5 + CONFIDENCE_LEVEL / 2.0);
    let n = simulations as f64;

    let mut odds: Vec<TitleOdds> = roster
        .iter()
        .enumerate()
        .map(|(i, driver)| {
            let p = titles[i] as f64 / n;
            let margin = z * (p * (1.0 - p) / n).sqrt();
            TitleOdds {
                driver: driver.clone(),
                titles: titles[i],
                tie_break_titles: tie_break_titles[i],
                probability: p,
                interval: ((p - margin).max(0.0), (p + margin).min(1.0)),
            }
        })
        .collect();
    odds.sort_by(|a, b| b.titles.cmp(&a.titles));

    debug!(simulations, seed, favourite = %odds[0].driver.name, "title odds computed");
    Ok(odds)
}
