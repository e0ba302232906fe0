use serde::{Deserialize, Serialize};

/// A race venue.
///
/// `difficulty` rewards raw skill and `speed_bias` rewards consistency. Both
/// are fractions in 0.0..=1.0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub difficulty: f64,
    pub speed_bias: f64,
}

impl Track {
    pub fn new(name: impl Into<String>, difficulty: f64, speed_bias: f64) -> Self {
        Track {
            name: name.into(),
            difficulty,
            speed_bias,
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (difficulty {:.2}, speed bias {:.2})",
            self.name, self.difficulty, self.speed_bias
        )
    }
}
