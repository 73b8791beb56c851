use std::time::Duration;

use super::Color;
use crate::difficulty::Difficulty;

/// Pause after pressing start, before the first level.
pub const START_DELAY: Duration = Duration::from_millis(1000);
/// Pause after a correctly repeated sequence, before the next level.
pub const CORRECT_DELAY: Duration = Duration::from_millis(1000);
/// Pause before the first highlight of every playback.
pub const LEAD_IN: Duration = Duration::from_millis(800);

// Unscaled timings of a single playback step
const FLASH: Duration = Duration::from_millis(300);
const TONE: Duration = Duration::from_millis(400);
const STEP: Duration = Duration::from_millis(600);

const USER_FLASH: Duration = Duration::from_millis(200);
const GAME_OVER_FREQUENCY: f32 = 100.0;
const GAME_OVER_TONE: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration: Duration,
}

impl Tone {
    /// Feedback for a pad pressed by the player.
    pub fn press(color: Color) -> Self {
        Self {
            frequency: color.frequency(),
            duration: USER_FLASH,
        }
    }

    pub fn game_over() -> Self {
        Self {
            frequency: GAME_OVER_FREQUENCY,
            duration: GAME_OVER_TONE,
        }
    }
}

/// A single highlighted pad of a playback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub color: Color,
    /// How long the pad stays highlighted.
    pub flash: Duration,
    /// `None` when sound is off.
    pub tone: Option<Tone>,
    /// Time until the next step starts.
    pub hold: Duration,
}

/// Timed plan for replaying the whole sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    pub delay: Duration,
    pub steps: Vec<Step>,
}

impl Playback {
    pub fn new(sequence: &[Color], difficulty: Difficulty, sound: bool, delay: Duration) -> Self {
        let steps = sequence
            .iter()
            .map(|&color| Step {
                color,
                flash: difficulty.scale(FLASH),
                tone: if sound {
                    Some(Tone {
                        frequency: color.frequency(),
                        duration: difficulty.scale(TONE),
                    })
                } else {
                    None
                },
                hold: difficulty.scale(STEP),
            })
            .collect();

        Self {
            delay: delay + LEAD_IN,
            steps,
        }
    }

    /// Time from the start of the plan until input is re-enabled.
    pub fn duration(&self) -> Duration {
        self.delay + self.steps.iter().map(|step| step.hold).sum::<Duration>()
    }
}

/// Renders playback steps, e.g. by highlighting a pad and playing its tone.
pub trait Presenter {
    fn show(&mut self, step: &Step);
}

/// Sleeps through `playback`, handing every step to the presenter on time.
pub async fn present<P: Presenter + ?Sized>(playback: &Playback, presenter: &mut P) {
    tokio::time::sleep(playback.delay).await;
    for step in &playback.steps {
        presenter.show(step);
        tokio::time::sleep(step.hold).await;
    }
}
