// Game core for a guess-the-number puzzle: the player has to find four
// distinct digits, getting per-position feedback after every guess.
// Rendering, sound and localisation live in whatever front end drives this.
pub mod app_dirs;
pub mod code;
pub mod config;
pub mod difficulty;
pub mod digits;
pub mod feedback;
pub mod session;
pub mod stats;
pub mod store;
pub mod util;

pub use code::{check_input, validate_guess, Code, GuessError, InputCheck, CODE_LENGTH};
pub use config::{GameConfig, Language, Preferences, Theme, TimerStart};
pub use difficulty::Difficulty;
pub use digits::{generate_secret, DigitSource, FixedDigits, RandomDigits};
pub use feedback::{evaluate_guess, DigitFeedback, Feedback};
pub use session::{
    GameSession, GameStatus, GameSummary, GuessRecord, SessionState, SubmitError, SubmitOutcome,
};
pub use stats::{AggregateStats, StatsKeeper};
pub use store::{FileStore, KeyValueStore, MemoryStore, SqliteStore, StoreError};
