use std::time::Duration;

use rocket::serde::{Deserialize, Serialize};

/// Controls how fast the sequence is played back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn speed_multiplier(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 0.7,
            Self::Hard => 0.5,
        }
    }

    /// Scales a playback duration by the speed multiplier,
    /// rounded to whole milliseconds.
    pub fn scale(self, duration: Duration) -> Duration {
        let millis = duration.as_millis() as f64 * self.speed_multiplier();
        Duration::from_millis(millis.round() as u64)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
