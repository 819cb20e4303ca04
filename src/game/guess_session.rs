use log::{debug, trace};
use rand::Rng;
use std::num::IntErrorKind;
use uuid::Uuid;

use crate::error::{GameError, Result};
use crate::model::{Difficulty, GuessOutcome, SessionState};

/// Guesses this close to the secret (inclusive) get the "close" feedback.
pub const CLOSE_DISTANCE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParsedGuess {
    Number(i64),
    // an integer, just not one that fits; never in range
    Overflow,
    Invalid,
}

fn parse_guess(raw: &str) -> ParsedGuess {
    match raw.trim().parse::<i64>() {
        Ok(n) => ParsedGuess::Number(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParsedGuess::Overflow,
            _ => ParsedGuess::Invalid,
        },
    }
}

/// State of one game: the secret, its difficulty and the attempt count.
#[derive(Debug, Clone)]
pub struct GuessSession {
    id: Uuid,
    difficulty: Difficulty,
    secret_number: u32,
    attempts: u32,
    state: SessionState,
}

impl GuessSession {
    /// Draws a secret uniformly from the difficulty's inclusive range.
    pub fn start<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Self {
        let secret_number = rng.random_range(difficulty.range());
        Self::with_secret(difficulty, secret_number)
    }

    pub(crate) fn with_secret(difficulty: Difficulty, secret_number: u32) -> Self {
        debug_assert!(difficulty.range().contains(&secret_number));
        let session = Self {
            id: Uuid::new_v4(),
            difficulty,
            secret_number,
            attempts: 0,
            state: SessionState::InProgress,
        };
        debug!(target: "guess_session", "Started session {} at {}", session.id, difficulty);
        trace!(target: "guess_session", "Secret for {}: {}", session.id, secret_number);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn secret_number(&self) -> u32 {
        self.secret_number
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state == SessionState::Won
    }

    fn out_of_range(&self) -> GuessOutcome {
        GuessOutcome::OutOfRange {
            min: self.difficulty.min(),
            max: self.difficulty.max(),
        }
    }

    fn ensure_in_progress(&self) -> Result<()> {
        match self.state {
            SessionState::InProgress => Ok(()),
            SessionState::Won => Err(GameError::NoGameInProgress),
        }
    }

    /// Parses raw guess text and evaluates it. Text that is not an integer
    /// yields `InvalidInput` without touching the session.
    pub fn evaluate_input(&mut self, raw: &str) -> Result<GuessOutcome> {
        self.ensure_in_progress()?;
        match parse_guess(raw) {
            ParsedGuess::Number(guess) => self.evaluate(guess),
            ParsedGuess::Overflow => Ok(self.out_of_range()),
            ParsedGuess::Invalid => Ok(GuessOutcome::InvalidInput),
        }
    }

    pub fn evaluate(&mut self, guess: i64) -> Result<GuessOutcome> {
        self.ensure_in_progress()?;
        if !self.difficulty.contains(guess) {
            return Ok(self.out_of_range());
        }

        self.attempts += 1;
        let secret = i64::from(self.secret_number);
        let outcome = if guess == secret {
            self.state = SessionState::Won;
            GuessOutcome::Correct {
                attempts: self.attempts,
            }
        } else if guess.abs_diff(secret) <= u64::from(CLOSE_DISTANCE) {
            if guess < secret {
                GuessOutcome::CloseLow
            } else {
                GuessOutcome::CloseHigh
            }
        } else if guess < secret {
            GuessOutcome::Low
        } else {
            GuessOutcome::High
        };

        trace!(
            target: "guess_session",
            "Guess {} -> {:?} (attempt {})",
            guess,
            outcome,
            self.attempts
        );
        Ok(outcome)
    }
}
