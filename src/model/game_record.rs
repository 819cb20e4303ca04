use serde::{Deserialize, Serialize};
use std::fmt;

use super::Difficulty;

/// One won game. Field names on disk are kept compatible with existing
/// `profiles.json` files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    #[serde(rename = "Game")]
    game_number: u32,
    #[serde(rename = "Guesses")]
    guesses: u32,
    #[serde(rename = "Number")]
    secret_number: u32,
    // older files may omit the difficulty
    #[serde(
        rename = "Difficulty",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    difficulty: Option<Difficulty>,
}

impl GameRecord {
    pub fn new(game_number: u32, guesses: u32, secret_number: u32, difficulty: Difficulty) -> Self {
        Self {
            game_number,
            guesses,
            secret_number,
            difficulty: Some(difficulty),
        }
    }

    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    pub fn guesses(&self) -> u32 {
        self.guesses
    }

    pub fn secret_number(&self) -> u32 {
        self.secret_number
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let difficulty = self.difficulty.map(|d| d.name()).unwrap_or("N/A");
        write!(
            f,
            "Game {} [{}]: {} guesses (Number was {})",
            self.game_number, difficulty, self.guesses, self.secret_number
        )
    }
}
