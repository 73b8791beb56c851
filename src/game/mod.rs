//! Client side of the game: the session state machine, timed playback
//! plans and local high score storage.

mod color;
mod high_score;
mod playback;
mod session;
mod view;

pub use color::Color;
pub use high_score::{
    FileHighScores, HighScoreError, HighScoreStore, MemoryHighScores, HIGH_SCORE_KEY,
};
pub use playback::{
    present, Playback, Presenter, Step, Tone, CORRECT_DELAY, LEAD_IN, START_DELAY,
};
pub use session::{
    GameError, GameOverSummary, GameSession, Phase, PressOutcome, Verdict, ANONYMOUS,
};
pub use view::{LeaderboardRow, LeaderboardView, EMPTY_PLACEHOLDER, OFFLINE_PLACEHOLDER};
