use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of digits in a secret or a guess.
pub const CODE_LENGTH: usize = 4;

/// Why a piece of input is not a valid code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("expected 4 digits, got {len}")]
    WrongLength { len: usize },

    #[error("'{ch}' at position {position} is not a digit")]
    NotADigit { ch: char, position: usize },

    #[error("digit {digit} appears more than once")]
    RepeatedDigit { digit: u8 },
}

/// Four mutually distinct decimal digits. Used for both the secret and guesses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Code([u8; CODE_LENGTH]);

impl Code {
    /// Parses `input` as exactly four distinct decimal digits.
    pub fn parse(input: &str) -> Result<Self, GuessError> {
        let len = input.chars().count();
        if len != CODE_LENGTH {
            return Err(GuessError::WrongLength { len });
        }

        let mut digits = [0u8; CODE_LENGTH];
        for (position, ch) in input.chars().enumerate() {
            let digit = ch
                .to_digit(10)
                .ok_or(GuessError::NotADigit { ch, position })? as u8;
            if digits[..position].contains(&digit) {
                return Err(GuessError::RepeatedDigit { digit });
            }
            digits[position] = digit;
        }

        Ok(Code(digits))
    }

    /// Caller guarantees every digit is `0..=9` and no digit repeats.
    pub(crate) fn from_distinct(digits: [u8; CODE_LENGTH]) -> Self {
        debug_assert!(digits.iter().all(|d| *d < 10));
        Code(digits)
    }

    pub fn digits(&self) -> &[u8; CODE_LENGTH] {
        &self.0
    }

    pub fn contains(&self, digit: u8) -> bool {
        self.0.contains(&digit)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Code::parse(s)
    }
}

/// Live classification of partially typed input, for hinting while the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCheck {
    /// Fewer than four digits so far.
    Incomplete,
    NotDigit,
    RepeatedDigit,
    TooLong,
    /// Four distinct digits; submission is allowed.
    Ready,
}

pub fn check_input(input: &str) -> InputCheck {
    let mut seen = [false; 10];
    let mut len = 0;
    for ch in input.chars() {
        let Some(digit) = ch.to_digit(10) else {
            return InputCheck::NotDigit;
        };
        if seen[digit as usize] {
            return InputCheck::RepeatedDigit;
        }
        seen[digit as usize] = true;
        len += 1;
    }

    match len {
        n if n < CODE_LENGTH => InputCheck::Incomplete,
        CODE_LENGTH => InputCheck::Ready,
        _ => InputCheck::TooLong,
    }
}

/// True iff `input` is exactly four distinct decimal digits.
pub fn validate_guess(input: &str) -> bool {
    check_input(input) == InputCheck::Ready
}
