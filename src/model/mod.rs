mod difficulty;
mod game_record;
mod guess_outcome;
mod profile;

pub use difficulty::{Difficulty, UnknownDifficulty};
pub use game_record::GameRecord;
pub use guess_outcome::{GuessOutcome, GuessResult, SessionState};
pub use profile::Profile;
