use serde::{Serialize, Serializer};
use std::fmt;

/// School-style grade derived from the percentage of correct answers.
///
/// Bands are fixed and cover the whole `[0, 100]` range with no gaps:
/// ≥95 → 5, ≥85 → 4, ≥75 → 3, ≥60 → 2, otherwise → 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    Fail,
    Poor,
    Satisfactory,
    Good,
    Excellent,
}

impl Grade {
    /// Maps a percentage to its grade band.
    ///
    /// Values outside `[0, 100]` are clamped by the band logic: anything
    /// below 60 is `Fail`, anything at or above 95 is `Excellent`.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 95.0 {
            Grade::Excellent
        } else if percentage >= 85.0 {
            Grade::Good
        } else if percentage >= 75.0 {
            Grade::Satisfactory
        } else if percentage >= 60.0 {
            Grade::Poor
        } else {
            Grade::Fail
        }
    }

    /// Numeric value of the grade (1 through 5).
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Grade::Fail => 1,
            Grade::Poor => 2,
            Grade::Satisfactory => 3,
            Grade::Good => 4,
            Grade::Excellent => 5,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

// Serialized as the bare number, matching the results payload.
impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}
