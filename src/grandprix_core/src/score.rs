use tracing::trace;

use crate::constants::{MAX_LUCK, MIN_LUCK};
use crate::driver::Driver;
use crate::luck::LuckSource;
use crate::track::Track;

/// Calculate one driver's performance score on a track.
///
/// `skill * difficulty + consistency * speed_bias + luck`, rounded to two
/// decimal places. Exactly one draw is taken from `luck`, clamped to
/// `MIN_LUCK..=MAX_LUCK`.
///
/// # Arguments
/// * `driver` - Driver being scored
/// * `track` - Venue for this race
/// * `luck` - Source of the random perturbation
pub fn score<L: LuckSource + ?Sized>(driver: &Driver, track: &Track, luck: &mut L) -> f64 {
    let draw = luck.luck().clamp(MIN_LUCK, MAX_LUCK);
    let total = base_score(driver, track) + f64::from(draw);
    let rounded = (total * 100.0).round() / 100.0;

    trace!(driver = %driver.name, track = %track.name, luck = draw, score = rounded, "scored");
    rounded
}

/// Score without the luck term.
pub fn base_score(driver: &Driver, track: &Track) -> f64 {
    let skill_impact = f64::from(driver.skill) * track.difficulty;
    let speed_impact = f64::from(driver.consistency) * track.speed_bias;
    skill_impact + speed_impact
}
