//! Random perturbation sources.
//!
//! Every score consumes exactly one draw from a [`LuckSource`]. Seeded and
//! scripted sources make whole seasons reproducible.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constants::{MAX_LUCK, MIN_LUCK};

/// Source of the bounded luck term added to each race score.
pub trait LuckSource {
    /// Produce the next luck draw. Values outside `MIN_LUCK..=MAX_LUCK` are
    /// clamped by the scorer.
    fn luck(&mut self) -> i32;
}

impl<L: LuckSource + ?Sized> LuckSource for &mut L {
    fn luck(&mut self) -> i32 {
        (**self).luck()
    }
}

/// Uniform luck drawn from a random number generator.
#[derive(Clone, Debug)]
pub struct RandomLuck<R> {
    rng: R,
}

impl<R: Rng> RandomLuck<R> {
    pub fn new(rng: R) -> Self {
        RandomLuck { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RandomLuck<ChaCha8Rng> {
    /// Reproducible luck for a given seed.
    pub fn seeded(seed: u64) -> Self {
        RandomLuck::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RandomLuck::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> LuckSource for RandomLuck<R> {
    fn luck(&mut self) -> i32 {
        self.rng.gen_range(MIN_LUCK..=MAX_LUCK)
    }
}

/// The same draw every time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedLuck(pub i32);

impl LuckSource for FixedLuck {
    fn luck(&mut self) -> i32 {
        self.0
    }
}

/// A predetermined sequence of draws, then zero once exhausted.
#[derive(Clone, Debug, Default)]
pub struct ScriptedLuck {
    draws: VecDeque<i32>,
    consumed: usize,
}

impl ScriptedLuck {
    pub fn new(draws: impl IntoIterator<Item = i32>) -> Self {
        ScriptedLuck {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of draws taken so far, including ones past the end of the script.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl LuckSource for ScriptedLuck {
    fn luck(&mut self) -> i32 {
        self.consumed += 1;
        self.draws.pop_front().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_luck_bounded() {
        let mut luck = RandomLuck::seeded(7);
        for _ in 0..1000 {
            let draw = luck.luck();
            assert!((MIN_LUCK..=MAX_LUCK).contains(&draw));
        }
    }

    #[test]
    fn test_random_luck_deterministic() {
        let mut a = RandomLuck::seeded(42);
        let mut b = RandomLuck::seeded(42);
        let draws_a: Vec<i32> = (0..20).map(|_| a.luck()).collect();
        let draws_b: Vec<i32> = (0..20).map(|_| b.luck()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_scripted_luck_falls_back_to_zero() {
        let mut luck = ScriptedLuck::new([3, -2]);
        assert_eq!(luck.luck(), 3);
        assert_eq!(luck.luck(), -2);
        assert_eq!(luck.luck(), 0);
        assert_eq!(luck.consumed(), 3);
        assert_eq!(luck.remaining(), 0);
    }
}
