use rand::{rngs::StdRng, SeedableRng};

use super::*;
use crate::{database::ScoreSubmission, difficulty::Difficulty};

/// Nickname used when the player leaves the field blank.
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player to pick a difficulty and start.
    Idle,
    /// The sequence is being played back; presses are ignored.
    Presenting,
    AwaitingInput,
    GameOver,
}

/// Result of comparing the player's input against the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Correct so far, more input expected.
    Pending,
    /// The whole sequence was repeated.
    Complete,
    Mismatch,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PressOutcome {
    /// Presses outside of [`Phase::AwaitingInput`] are dropped.
    Ignored,
    Accepted { feedback: Option<Tone> },
    /// The next level starts with this playback.
    LevelComplete {
        feedback: Option<Tone>,
        playback: Playback,
    },
    GameOver(GameOverSummary),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameOverSummary {
    /// The level the player failed at.
    pub score: u32,
    pub difficulty: Difficulty,
    pub high_score: u32,
    pub new_high_score: bool,
    pub tone: Option<Tone>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error("cannot {action} while the game is {phase:?}")]
    WrongPhase { action: &'static str, phase: Phase },
}

/// State of a single player's game.
pub struct GameSession<S: HighScoreStore> {
    phase: Phase,
    difficulty: Difficulty,
    sound: bool,
    sequence: Vec<Color>,
    input: Vec<Color>,
    level: u32,
    streak: u32,
    high_score: u32,
    high_scores: S,
    rng: StdRng,
}

impl<S: HighScoreStore> GameSession<S> {
    pub fn new(high_scores: S) -> Self {
        Self::with_rng(high_scores, StdRng::from_entropy())
    }

    pub fn with_rng(high_scores: S, rng: StdRng) -> Self {
        let high_score = high_scores.load().unwrap_or_else(|err| {
            log::warn!("Failed to load the high score: {}", err);
            0
        });

        Self {
            phase: Phase::Idle,
            difficulty: Difficulty::default(),
            sound: true,
            sequence: Vec::new(),
            input: Vec::new(),
            level: 0,
            streak: 0,
            high_score,
            high_scores,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound
    }

    pub fn sequence(&self) -> &[Color] {
        &self.sequence
    }

    pub fn input(&self) -> &[Color] {
        &self.input
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn high_scores(&self) -> &S {
        &self.high_scores
    }

    /// Difficulty is locked once the game has started.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        self.expect_phase(Phase::Idle, "change difficulty")?;
        self.difficulty = difficulty;
        Ok(())
    }

    /// Returns whether sound is now enabled.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        self.sound
    }

    /// Starts the first level.
    pub fn start(&mut self) -> Result<Playback, GameError> {
        self.expect_phase(Phase::Idle, "start")?;
        Ok(self.level_up(START_DELAY))
    }

    /// Re-enables input once the playback has been presented.
    pub fn finish_playback(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::Presenting, "finish playback")?;
        self.phase = Phase::AwaitingInput;
        Ok(())
    }

    /// Handles a press of the `color` pad.
    pub fn press(&mut self, color: Color) -> PressOutcome {
        if self.phase != Phase::AwaitingInput {
            return PressOutcome::Ignored;
        }

        let feedback = self.tone(Tone::press(color));
        self.input.push(color);

        match self.check_answer(self.input.len() - 1) {
            Verdict::Pending => PressOutcome::Accepted { feedback },
            Verdict::Complete => PressOutcome::LevelComplete {
                feedback,
                playback: self.level_up(CORRECT_DELAY),
            },
            Verdict::Mismatch => PressOutcome::GameOver(self.game_over()),
        }
    }

    /// Compares the input against the sequence at `index`.
    pub fn check_answer(&self, index: usize) -> Verdict {
        match (self.input.get(index), self.sequence.get(index)) {
            (Some(pressed), Some(expected)) if pressed == expected => {
                if self.input.len() == self.sequence.len() {
                    Verdict::Complete
                } else {
                    Verdict::Pending
                }
            }
            _ => Verdict::Mismatch,
        }
    }

    /// Builds the leaderboard entry for a finished game.
    pub fn submission(&self, nickname: &str) -> Result<ScoreSubmission, GameError> {
        self.expect_phase(Phase::GameOver, "submit a score")?;

        let nickname = match nickname.trim() {
            "" => ANONYMOUS,
            nickname => nickname,
        };
        Ok(ScoreSubmission::new(nickname, self.level, self.difficulty))
    }

    /// Returns to [`Phase::Idle`], keeping difficulty, sound and high score.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.sequence.clear();
        self.input.clear();
        self.level = 0;
        self.streak = 0;
    }

    fn level_up(&mut self, delay: std::time::Duration) -> Playback {
        self.input.clear();
        self.level += 1;
        self.streak += 1;
        self.sequence.push(Color::random(&mut self.rng));
        self.phase = Phase::Presenting;

        Playback::new(&self.sequence, self.difficulty, self.sound, delay)
    }

    fn game_over(&mut self) -> GameOverSummary {
        self.phase = Phase::GameOver;

        let new_high_score = self.level > self.high_score;
        if new_high_score {
            self.high_score = self.level;
            if let Err(err) = self.high_scores.save(self.high_score) {
                log::warn!("Failed to save the high score: {}", err);
            }
        }

        GameOverSummary {
            score: self.level,
            difficulty: self.difficulty,
            high_score: self.high_score,
            new_high_score,
            tone: self.tone(Tone::game_over()),
        }
    }

    fn tone(&self, tone: Tone) -> Option<Tone> {
        if self.sound {
            Some(tone)
        } else {
            None
        }
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }
}
