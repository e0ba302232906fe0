use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::points_for_position;
use crate::driver::Driver;
use crate::error::{ChampionshipError, Result};
use crate::luck::LuckSource;
use crate::score::score;
use crate::track::Track;

/// One driver's finish in a race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placing {
    /// Finishing position, 1-indexed
    pub position: usize,
    pub driver: Driver,
    /// Index of the driver in the roster the race was run with
    pub roster_index: usize,
    pub score: f64,
    /// Championship points awarded for this finish
    pub points: u32,
}

/// Ranked outcome of one race, winner first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub track: String,
    pub placings: Vec<Placing>,
}

impl RaceResult {
    /// The race winner. A result always has at least one placing.
    pub fn winner(&self) -> &Placing {
        &self.placings[0]
    }

    pub fn placing_of(&self, driver_name: &str) -> Option<&Placing> {
        self.placings.iter().find(|p| p.driver.name == driver_name)
    }

    pub fn points_for(&self, driver_name: &str) -> u32 {
        self.placing_of(driver_name).map(|p| p.points).unwrap_or(0)
    }

    pub fn total_points(&self) -> u32 {
        self.placings.iter().map(|p| p.points).sum()
    }
}

/// Simulate a race by scoring every driver and ranking them.
///
/// Drivers are scored in roster order, one luck draw each. The ranking is
/// score descending; equal scores keep roster order. Points come from the
/// points table by finishing position.
///
/// # Errors
/// `InvalidRoster` when `roster` is empty.
pub fn run_race<L: LuckSource + ?Sized>(
    roster: &[Driver],
    track: &Track,
    luck: &mut L,
) -> Result<RaceResult> {
    if roster.is_empty() {
        return Err(ChampionshipError::InvalidRoster);
    }

    let scores: Vec<(usize, f64)> = roster
        .iter()
        .enumerate()
        .map(|(i, driver)| (i, score(driver, track, luck)))
        .collect();

    let placings = rank_drivers(roster, scores);
    debug!(
        track = %track.name,
        winner = %placings[0].driver.name,
        score = placings[0].score,
        "race finished"
    );

    Ok(RaceResult {
        track: track.name.clone(),
        placings,
    })
}

/// Rank scored drivers and attach points.
///
/// `sort_by` is stable, so drivers on equal scores stay in roster order.
fn rank_drivers(roster: &[Driver], mut scores: Vec<(usize, f64)>) -> Vec<Placing> {
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    scores
        .into_iter()
        .enumerate()
        .map(|(i, (roster_index, score))| {
            let position = i + 1;
            Placing {
                position,
                driver: roster[roster_index].clone(),
                roster_index,
                score,
                points: points_for_position(position),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{max_points_per_race, POINTS_TABLE};
    use crate::luck::{FixedLuck, RandomLuck, ScriptedLuck};
    use proptest::prelude::*;

    fn make_roster() -> Vec<Driver> {
        vec![
            Driver::new("A", 10, 7),
            Driver::new("B", 8, 10),
            Driver::new("C", 10, 9),
        ]
    }

    #[test]
    fn test_empty_roster_rejected() {
        let track = Track::new("Monaco", 0.8, 0.2);
        let result = run_race(&[], &track, &mut FixedLuck(0));
        assert_eq!(result, Err(ChampionshipError::InvalidRoster));
    }

    #[test]
    fn test_ranking_by_score() {
        let roster = make_roster();
        let track = Track::new("Silverstone", 0.6, 1.0);

        // A = 13.0, B = 14.8, C = 15.0
        let result = run_race(&roster, &track, &mut FixedLuck(0)).unwrap();
        let names: Vec<&str> = result.placings.iter().map(|p| p.driver.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);

        let points: Vec<u32> = result.placings.iter().map(|p| p.points).collect();
        assert_eq!(points, POINTS_TABLE.to_vec());
        assert_eq!(result.winner().driver.name, "C");
    }

    #[test]
    fn test_luck_can_change_order() {
        let roster = make_roster();
        let track = Track::new("Silverstone", 0.6, 1.0);

        let mut luck = ScriptedLuck::new([9, 0, -9]);
        let result = run_race(&roster, &track, &mut luck).unwrap();
        assert_eq!(result.winner().driver.name, "A");
        assert_eq!(result.placings[2].driver.name, "C");
    }

    #[test]
    fn test_equal_scores_keep_roster_order() {
        let roster = vec![
            Driver::new("First", 5, 5),
            Driver::new("Second", 5, 5),
            Driver::new("Third", 5, 5),
        ];
        let track = Track::new("Flat", 0.5, 0.5);

        let result = run_race(&roster, &track, &mut FixedLuck(2)).unwrap();
        let indices: Vec<usize> = result.placings.iter().map(|p| p.roster_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_positions_beyond_table_score_zero() {
        let roster: Vec<Driver> = (0..6)
            .map(|i| Driver::new(format!("D{}", i), 10 - i as u8, 5))
            .collect();
        let track = Track::new("Long", 1.0, 0.0);

        let result = run_race(&roster, &track, &mut FixedLuck(0)).unwrap();
        assert_eq!(result.placings.len(), 6);
        for placing in &result.placings[POINTS_TABLE.len()..] {
            assert_eq!(placing.points, 0);
        }
        assert_eq!(result.total_points(), max_points_per_race());
    }

    #[test]
    fn test_single_driver_wins() {
        let roster = vec![Driver::new("Solo", 3, 3)];
        let track = Track::new("T", 0.5, 0.5);

        let result = run_race(&roster, &track, &mut FixedLuck(-9)).unwrap();
        assert_eq!(result.placings.len(), 1);
        assert_eq!(result.winner().points, 25);
    }

    fn roster_strategy() -> impl Strategy<Value = Vec<Driver>> {
        prop::collection::vec((1u8..=10, 1u8..=10), 1..8).prop_map(|attrs| {
            attrs
                .into_iter()
                .enumerate()
                .map(|(i, (skill, consistency))| Driver::new(format!("D{}", i), skill, consistency))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn every_driver_ranked_once(
            roster in roster_strategy(),
            difficulty in 0.0f64..=1.0,
            speed_bias in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let track = Track::new("T", difficulty, speed_bias);
            let result = run_race(&roster, &track, &mut RandomLuck::seeded(seed)).unwrap();

            let mut indices: Vec<usize> = result.placings.iter().map(|p| p.roster_index).collect();
            indices.sort_unstable();
            prop_assert_eq!(indices, (0..roster.len()).collect::<Vec<_>>());
        }

        #[test]
        fn ranking_is_score_descending(roster in roster_strategy(), seed in any::<u64>()) {
            let track = Track::new("T", 0.7, 0.4);
            let result = run_race(&roster, &track, &mut RandomLuck::seeded(seed)).unwrap();

            for pair in result.placings.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
                if pair[0].score == pair[1].score {
                    prop_assert!(pair[0].roster_index < pair[1].roster_index);
                }
            }
        }

        #[test]
        fn points_bounded(roster in roster_strategy(), seed in any::<u64>()) {
            let track = Track::new("T", 0.5, 0.5);
            let result = run_race(&roster, &track, &mut RandomLuck::seeded(seed)).unwrap();

            prop_assert!(result.total_points() <= max_points_per_race());
            for placing in &result.placings {
                prop_assert!(placing.points <= POINTS_TABLE[0]);
            }
        }

        #[test]
        fn reproducible_for_seed(roster in roster_strategy(), seed in any::<u64>()) {
            let track = Track::new("T", 0.9, 0.1);
            let first = run_race(&roster, &track, &mut RandomLuck::seeded(seed)).unwrap();
            let second = run_race(&roster, &track, &mut RandomLuck::seeded(seed)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
