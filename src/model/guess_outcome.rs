use super::GameRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Won,
}

/// Feedback for a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The text was not an integer.
    InvalidInput,
    /// An integer outside the difficulty's inclusive range. Not counted.
    OutOfRange { min: u32, max: u32 },
    Low,
    High,
    /// Within 5 of the secret, below it.
    CloseLow,
    /// Within 5 of the secret, above it.
    CloseHigh,
    Correct { attempts: u32 },
}

impl GuessOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, GuessOutcome::Correct { .. })
    }

    /// Whether the guess was in range and counted as an attempt.
    pub fn counts_as_attempt(&self) -> bool {
        !matches!(
            self,
            GuessOutcome::InvalidInput | GuessOutcome::OutOfRange { .. }
        )
    }
}

/// What the controller hands back to the presentation layer after a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub outcome: GuessOutcome,
    /// Attempts counted so far in the current game.
    pub attempts: u32,
    /// Set when the win improved the profile's best score.
    pub new_record: bool,
    /// The history entry appended on a win.
    pub record: Option<GameRecord>,
    /// Set when the win was recorded in memory but writing the store failed.
    pub save_error: Option<String>,
}

impl GuessResult {
    pub fn ongoing(outcome: GuessOutcome, attempts: u32) -> Self {
        Self {
            outcome,
            attempts,
            new_record: false,
            record: None,
            save_error: None,
        }
    }
}
