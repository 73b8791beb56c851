use rand::Rng;
use rocket::serde::{Deserialize, Serialize};

/// One of the four pads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum Color {
    Yellow,
    Red,
    Purple,
    Green,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Yellow, Color::Red, Color::Purple, Color::Green];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Tone frequency in Hz (C major arpeggio).
    pub fn frequency(self) -> f32 {
        match self {
            Self::Yellow => 261.63,
            Self::Red => 329.63,
            Self::Purple => 392.0,
            Self::Green => 523.25,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Purple => "purple",
            Self::Green => "green",
        };
        write!(f, "{}", name)
    }
}
