use serde::{Deserialize, Serialize};

/// A competitor with fixed skill ratings.
///
/// Ratings are integers on a 1-10 scale. Cumulative points are tracked by the
/// season, not on the driver, so a `Driver` never changes once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,

    /// Raw pace, weighted by track difficulty
    pub skill: u8,

    /// Ability to hold speed, weighted by the track's speed bias
    pub consistency: u8,
}

impl Driver {
    pub fn new(name: impl Into<String>, skill: u8, consistency: u8) -> Self {
        Driver {
            name: name.into(),
            skill,
            consistency,
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (skill {}, consistency {})", self.name, self.skill, self.consistency)
    }
}
