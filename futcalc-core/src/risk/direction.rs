use std::fmt;

use serde::{Deserialize, Serialize};

/// Trade direction. Stops sit on the losing side of entry, targets on the
/// winning side; the two directions mirror each other around the entry price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Long, Direction::Short];

    /// Price at which a stop `distance` points away from `entry` triggers.
    pub fn stop_price(self, entry: f64, distance: f64) -> f64 {
        match self {
            Self::Long => entry - distance,
            Self::Short => entry + distance,
        }
    }

    /// Price at which a target `distance` points away from `entry` is reached.
    pub fn target_price(self, entry: f64, distance: f64) -> f64 {
        match self {
            Self::Long => entry + distance,
            Self::Short => entry - distance,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
        }
    }
}
