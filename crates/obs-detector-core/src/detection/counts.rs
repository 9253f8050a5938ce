use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one monitor cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionCounts {
    pub orange: usize,
    pub payline: usize,
}

impl DetectionCounts {
    pub fn new(orange: usize, payline: usize) -> Self {
        Self { orange, payline }
    }

    /// Counts reported for a cycle whose capture failed.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Renders the console status line.
impl fmt::Display for DetectionCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "🍊 Orange: {} | PAYLINE: {}", self.orange, self.payline)
    }
}
