use thiserror::Error;

use crate::code::{Code, GuessError};
use crate::config::{GameConfig, TimerStart};
use crate::difficulty::Difficulty;
use crate::digits::{generate_secret, DigitSource, RandomDigits};
use crate::feedback::{evaluate_guess, Feedback};
use crate::stats::{AggregateStats, StatsKeeper};
use crate::store::{KeyValueStore, StoreError};
use crate::util::percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Active)
    }
}

/// One evaluated guess. Never modified after it is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessRecord {
    guess: Code,
    feedback: Feedback,
}

impl GuessRecord {
    pub fn guess(&self) -> Code {
        self.guess
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn is_win(&self) -> bool {
        self.feedback.is_win()
    }
}

/// Why a submission was rejected. A rejected submission changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("invalid guess: {0}")]
    InvalidInput(#[from] GuessError),

    #[error("game is over ({0:?}); start a new game first")]
    InactiveSession(GameStatus),
}

/// Result of an accepted guess.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub record: GuessRecord,
    pub status: GameStatus,
    /// Set when this guess ended the game and the statistics could not be saved.
    /// The in-memory statistics are still up to date.
    pub save_error: Option<StoreError>,
}

/// Final numbers for a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub status: GameStatus,
    pub secret: Code,
    pub elapsed_seconds: u64,
    pub attempts_used: u32,
    /// Share of guesses that were perfect, in percent.
    pub accuracy: u32,
}

/// Everything about the game in progress. Replaced wholesale on reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    secret: Code,
    difficulty: Difficulty,
    // oldest first
    history: Vec<GuessRecord>,
    attempts_used: u32,
    attempts_remaining: Option<u32>,
    elapsed_seconds: u64,
    timer_running: bool,
    status: GameStatus,
}

impl SessionState {
    fn new(secret: Code, difficulty: Difficulty, timer_start: TimerStart) -> Self {
        Self {
            secret,
            difficulty,
            history: Vec::new(),
            attempts_used: 0,
            attempts_remaining: difficulty.max_attempts(),
            elapsed_seconds: 0,
            timer_running: timer_start == TimerStart::OnSessionStart,
            status: GameStatus::Active,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Guesses in submission order, oldest first.
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// Guesses newest first, the order the game board lists them in.
    pub fn history_newest_first(&self) -> impl Iterator<Item = &GuessRecord> {
        self.history.iter().rev()
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// `None` when attempts are unlimited.
    pub fn attempts_remaining(&self) -> Option<u32> {
        self.attempts_remaining
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// The secret, but only once the game is over.
    pub fn revealed_secret(&self) -> Option<Code> {
        self.status.is_terminal().then_some(self.secret)
    }

    /// Percentage of guesses so far that were perfect.
    pub fn accuracy(&self) -> u32 {
        let perfect = self.history.iter().filter(|r| r.is_win()).count();
        percent(perfect as u64, self.history.len() as u64)
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.timer_running = false;
    }
}

/// One player's game: the current session plus the statistics that outlive it.
pub struct GameSession {
    config: GameConfig,
    digits: Box<dyn DigitSource>,
    stats: StatsKeeper,
    state: SessionState,
}

impl GameSession {
    /// Starts a session with statistics loaded from `store`.
    pub fn new(
        config: GameConfig,
        mut digits: Box<dyn DigitSource>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let stats = StatsKeeper::load(store, config.stats_key.clone());
        let secret = generate_secret(digits.as_mut());
        let state = SessionState::new(secret, config.difficulty, config.timer_start);
        log::info!("new game on {} difficulty", config.difficulty);
        Self {
            config,
            digits,
            stats,
            state,
        }
    }

    pub fn with_random_digits(config: GameConfig, store: Box<dyn KeyValueStore>) -> Self {
        Self::new(config, Box::new(RandomDigits::new()), store)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stats(&self) -> &AggregateStats {
        self.stats.stats()
    }

    /// The backing store, e.g. for loading [`crate::config::Preferences`].
    pub fn store(&self) -> &dyn KeyValueStore {
        self.stats.store()
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.stats.store_mut()
    }

    /// Tells the session the player typed a digit. Starts the clock under
    /// [`TimerStart::OnFirstInput`].
    pub fn note_input(&mut self) {
        if self.state.is_active() && !self.state.timer_running {
            log::debug!("timer started by first input");
            self.state.timer_running = true;
        }
    }

    /// Scores `input` against the secret and advances the game.
    ///
    /// Rejected input and submissions after the game ended leave the session
    /// untouched.
    pub fn submit_guess(&mut self, input: &str) -> Result<SubmitOutcome, SubmitError> {
        if self.state.status.is_terminal() {
            return Err(SubmitError::InactiveSession(self.state.status));
        }
        let guess = Code::parse(input)?;

        // A guess implies digits were typed
        self.note_input();

        let feedback = evaluate_guess(&self.state.secret, &guess);
        let record = GuessRecord { guess, feedback };
        log::debug!("guess {guess} scored {feedback:?}");

        self.state.history.push(record);
        self.state.attempts_used += 1;
        if let Some(remaining) = self.state.attempts_remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }

        let mut save_error = None;
        if record.is_win() {
            save_error = self.end_game(GameStatus::Won);
        } else if self.state.attempts_remaining == Some(0) {
            save_error = self.end_game(GameStatus::Lost);
        }

        Ok(SubmitOutcome {
            record,
            status: self.state.status,
            save_error,
        })
    }

    fn end_game(&mut self, status: GameStatus) -> Option<StoreError> {
        self.state.finish(status);
        log::info!(
            "game {:?} after {} attempts in {}s",
            status,
            self.state.attempts_used,
            self.state.elapsed_seconds
        );
        let saved = self.stats.record(
            status == GameStatus::Won,
            self.state.elapsed_seconds,
            self.state.attempts_used,
        );
        match saved {
            Ok(()) => None,
            Err(e) => {
                log::warn!("could not save stats: {e}");
                Some(e)
            }
        }
    }

    /// Starts a fresh game at `difficulty`. Statistics are left alone, even
    /// when the abandoned game was still in progress.
    pub fn reset_session(&mut self, difficulty: Difficulty) -> &SessionState {
        if self.state.is_active() && !self.state.history.is_empty() {
            log::info!(
                "abandoning game after {} attempts",
                self.state.attempts_used
            );
        }
        self.config.difficulty = difficulty;
        let secret = generate_secret(self.digits.as_mut());
        self.state = SessionState::new(secret, difficulty, self.config.timer_start);
        log::info!("new game on {difficulty} difficulty");
        &self.state
    }

    /// Starts a fresh game at the current difficulty.
    pub fn new_game(&mut self) -> &SessionState {
        self.reset_session(self.config.difficulty)
    }

    /// Changes difficulty, which always starts a new game.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> &SessionState {
        self.reset_session(difficulty)
    }

    /// Advances the clock by one second while the game is on and the clock runs.
    pub fn tick(&mut self) -> &SessionState {
        if self.state.is_active() && self.state.timer_running {
            self.state.elapsed_seconds += 1;
        }
        &self.state
    }

    /// Final numbers, available once the game is won or lost.
    pub fn summary(&self) -> Option<GameSummary> {
        let secret = self.state.revealed_secret()?;
        Some(GameSummary {
            status: self.state.status,
            secret,
            elapsed_seconds: self.state.elapsed_seconds,
            attempts_used: self.state.attempts_used,
            accuracy: self.state.accuracy(),
        })
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("stats", &self.stats)
            .field("status", &self.state.status)
            .field("attempts_used", &self.state.attempts_used)
            .finish_non_exhaustive()
    }
}
