use assert_matches::assert_matches;
use guess_master::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scripted(secret: &str, difficulty: Difficulty) -> GameSession {
    init_logging();
    let config = GameConfig {
        difficulty,
        ..GameConfig::default()
    };
    GameSession::new(
        config,
        Box::new(FixedDigits::from_str_digits(secret)),
        Box::new(MemoryStore::new()),
    )
}

// Wrong guesses for secret 1234 that never collide with each other's validity
const MISSES: [&str; 5] = ["5678", "5679", "5670", "9876", "0987"];

#[test]
fn winning_on_first_guess() {
    let mut game = scripted("1234", Difficulty::Medium);
    let outcome = game.submit_guess("1234").unwrap();
    assert_eq!(outcome.status, GameStatus::Won);
    assert_eq!(
        outcome.record.feedback().positions(),
        &[DigitFeedback::Correct; 4]
    );
    assert_eq!(game.stats().wins, 1);
    assert_eq!(game.stats().games_played, 1);
    assert_eq!(game.stats().win_rate(), 100);
}

#[test]
fn near_miss_feedback() {
    let mut game = scripted("1234", Difficulty::Medium);
    let outcome = game.submit_guess("1243").unwrap();
    assert_eq!(outcome.status, GameStatus::Active);
    assert_eq!(outcome.record.feedback().to_string(), "++--");
    assert_eq!(game.state().attempts_remaining(), Some(4));
}

#[test]
fn hard_mode_lost_on_third_miss() {
    let mut game = scripted("1234", Difficulty::Hard);

    for (i, guess) in MISSES.iter().take(3).enumerate() {
        let outcome = game.submit_guess(guess).unwrap();
        let used = i as u32 + 1;
        assert_eq!(game.state().attempts_used(), used);
        assert_eq!(game.state().attempts_remaining(), Some(3 - used));
        let expected = if used == 3 {
            GameStatus::Lost
        } else {
            GameStatus::Active
        };
        assert_eq!(outcome.status, expected);
    }

    assert_matches!(
        game.submit_guess(MISSES[3]),
        Err(SubmitError::InactiveSession(GameStatus::Lost))
    );
    assert_eq!(game.state().attempts_remaining(), Some(0));
    assert_eq!(game.stats().games_played, 1);
    assert_eq!(game.stats().wins, 0);
    assert_eq!(game.stats().losses, 1);

    let summary = game.summary().unwrap();
    assert_eq!(summary.status, GameStatus::Lost);
    assert_eq!(summary.secret.to_string(), "1234");
    assert_eq!(summary.accuracy, 0);
}

#[test]
fn bounded_attempts_always_add_up() {
    let mut game = scripted("1234", Difficulty::Medium);
    for guess in MISSES {
        let _ = game.submit_guess(guess);
        let state = game.state();
        assert_eq!(state.attempts_used() + state.attempts_remaining().unwrap(), 5);
    }
    assert_eq!(game.status(), GameStatus::Lost);
}

#[test]
fn easy_mode_never_runs_out() {
    let mut game = scripted("1234", Difficulty::Easy);
    for i in 0..100 {
        let outcome = game.submit_guess(MISSES[i % MISSES.len()]).unwrap();
        assert_eq!(outcome.status, GameStatus::Active);
    }
    assert_eq!(game.state().attempts_used(), 100);
    assert_eq!(game.state().attempts_remaining(), None);
    assert_eq!(game.stats().games_played, 0);
}

#[test]
fn stats_accumulate_across_games() {
    let mut game = scripted("1234", Difficulty::Hard);
    game.submit_guess("1234").unwrap();
    assert_eq!((game.stats().games_played, game.stats().wins), (1, 1));

    // Fallback digits make the next secret 0123
    game.new_game();
    for guess in MISSES.iter().take(3) {
        game.submit_guess(guess).unwrap();
    }
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!((game.stats().games_played, game.stats().wins), (2, 1));
    assert_eq!(game.stats().win_rate(), 50);
    assert_eq!(game.stats().total_attempts, 4);
}

#[test]
fn reset_after_terminal_state() {
    let mut game = scripted("1234", Difficulty::Medium);
    game.submit_guess("1234").unwrap();
    let stats = *game.stats();

    let state = game.reset_session(Difficulty::Hard);
    assert_eq!(state.status(), GameStatus::Active);
    assert!(state.history().is_empty());
    assert_eq!(state.attempts_remaining(), Some(3));
    assert_eq!(state.elapsed_seconds(), 0);
    assert_eq!(game.stats(), &stats);
}

#[test]
fn random_resets_usually_change_secret() {
    init_logging();
    let mut game = GameSession::with_random_digits(
        GameConfig::default(),
        Box::new(MemoryStore::new()),
    );
    let mut changed = 0;
    for _ in 0..50 {
        // Give up to reveal the secret: unbounded mode never ends on its own
        game.set_difficulty(Difficulty::Hard);
        for guess in ["0123", "4567", "8901"] {
            if game.submit_guess(guess).is_err() {
                break;
            }
        }
        let first = game.state().revealed_secret();

        game.new_game();
        for guess in ["0123", "4567", "8901"] {
            if game.submit_guess(guess).is_err() {
                break;
            }
        }
        let second = game.state().revealed_secret();
        if first.is_some() && second.is_some() && first != second {
            changed += 1;
        }
    }
    // 5040 possible secrets; identical pairs are rare
    assert!(changed >= 45, "only {changed} of 50 resets changed the secret");
}

#[test]
fn tick_only_counts_while_active() {
    let config = GameConfig {
        difficulty: Difficulty::Hard,
        timer_start: TimerStart::OnSessionStart,
        ..GameConfig::default()
    };
    let mut game = GameSession::new(
        config,
        Box::new(FixedDigits::from_str_digits("1234")),
        Box::new(MemoryStore::new()),
    );
    for _ in 0..3 {
        game.tick();
    }
    assert_eq!(game.state().elapsed_seconds(), 3);

    game.submit_guess("1234").unwrap();
    for _ in 0..10 {
        assert_eq!(game.tick().elapsed_seconds(), 3);
    }
    assert_eq!(game.stats().total_seconds, 3);
    assert_eq!(util::format_clock(game.summary().unwrap().elapsed_seconds), "00:03");
}

#[test]
fn rejected_input_keeps_attempts() {
    let mut game = scripted("1234", Difficulty::Hard);
    for bad in ["1123", "12a3", "123", "12345", ""] {
        assert_matches!(game.submit_guess(bad), Err(SubmitError::InvalidInput(_)));
    }
    assert_eq!(game.state().attempts_used(), 0);
    assert_eq!(game.state().attempts_remaining(), Some(3));
    assert!(game.state().history().is_empty());
}
