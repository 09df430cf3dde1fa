use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::code::{Code, CODE_LENGTH};

/// Source of decimal digits for secret generation.
pub trait DigitSource {
    /// Next digit in `0..=9`. Draws should be uniform and independent.
    fn next_digit(&mut self) -> u8;
}

/// Production digit source backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDigits<R: Rng = ThreadRng> {
    rng: R,
}

impl RandomDigits<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomDigits<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomDigits<StdRng> {
    /// Reproducible sequence, e.g. for a "daily puzzle" or replaying a bug report.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> DigitSource for RandomDigits<R> {
    fn next_digit(&mut self) -> u8 {
        self.rng.gen_range(0..10)
    }
}

/// Scripted digit source for tests.
///
/// Yields the given digits (taken mod 10) in order. Once they run out it
/// counts upward from 0, so secret generation always terminates.
#[derive(Debug, Clone, Default)]
pub struct FixedDigits {
    digits: Vec<u8>,
    pos: usize,
    fallback: u8,
}

impl FixedDigits {
    pub fn new<I: IntoIterator<Item = u8>>(digits: I) -> Self {
        Self {
            digits: digits.into_iter().collect(),
            pos: 0,
            fallback: 0,
        }
    }

    /// Digits spelled out in a string, e.g. `"1234"`. Non-digits are skipped.
    pub fn from_str_digits(s: &str) -> Self {
        Self::new(s.chars().filter_map(|c| c.to_digit(10)).map(|d| d as u8))
    }
}

impl DigitSource for FixedDigits {
    fn next_digit(&mut self) -> u8 {
        if let Some(d) = self.digits.get(self.pos) {
            self.pos += 1;
            return d % 10;
        }
        let d = self.fallback;
        self.fallback = (self.fallback + 1) % 10;
        d
    }
}

/// Draws digits until four distinct ones have been collected, skipping repeats.
pub fn generate_secret(source: &mut dyn DigitSource) -> Code {
    let mut digits = [0u8; CODE_LENGTH];
    let mut len = 0;
    let mut draws = 0usize;
    while len < CODE_LENGTH {
        let digit = source.next_digit() % 10;
        draws += 1;
        if !digits[..len].contains(&digit) {
            digits[len] = digit;
            len += 1;
        }
    }
    log::debug!("generated secret after {draws} draws");
    Code::from_distinct(digits)
}
