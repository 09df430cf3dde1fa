use std::fmt;

use serde::{Deserialize, Serialize};

use crate::code::{Code, CODE_LENGTH};

/// Classification of one guessed digit against the secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitFeedback {
    /// Same digit at the same position.
    Correct,
    /// Digit is in the secret, but elsewhere.
    Misplaced,
    Incorrect,
}

impl DigitFeedback {
    /// Compact marker used by the plain-text renderers: `+`, `-` or a space.
    pub fn symbol(self) -> char {
        match self {
            DigitFeedback::Correct => '+',
            DigitFeedback::Misplaced => '-',
            DigitFeedback::Incorrect => ' ',
        }
    }
}

/// Per-position feedback for a whole guess, in guess order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Feedback([DigitFeedback; CODE_LENGTH]);

impl Feedback {
    pub fn positions(&self) -> &[DigitFeedback; CODE_LENGTH] {
        &self.0
    }

    pub fn is_win(&self) -> bool {
        self.0.iter().all(|f| *f == DigitFeedback::Correct)
    }

    pub fn count(&self, kind: DigitFeedback) -> usize {
        self.0.iter().filter(|f| **f == kind).count()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for position in self.0 {
            write!(f, "{}", position.symbol())?;
        }
        Ok(())
    }
}

/// Scores `guess` against `secret`, one position at a time.
///
/// Both codes hold distinct digits, so a secret digit can match at most one
/// guessed digit and no bookkeeping of already-matched digits is needed.
pub fn evaluate_guess(secret: &Code, guess: &Code) -> Feedback {
    let secret_digits = secret.digits();
    let mut result = [DigitFeedback::Incorrect; CODE_LENGTH];
    for (i, digit) in guess.digits().iter().enumerate() {
        result[i] = if secret_digits[i] == *digit {
            DigitFeedback::Correct
        } else if secret.contains(*digit) {
            DigitFeedback::Misplaced
        } else {
            DigitFeedback::Incorrect
        };
    }
    Feedback(result)
}
