use serde::{Deserialize, Serialize};

use super::{Difficulty, GameRecord};

/// A named player record. The name is the key in the store and is not
/// repeated inside the serialized body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Profile {
    #[serde(skip)]
    name: String,
    #[serde(default)]
    best_score: Option<u32>,
    #[serde(default)]
    games_played: u32,
    #[serde(default)]
    game_history: Vec<GameRecord>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn best_score(&self) -> Option<u32> {
        self.best_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn game_history(&self) -> &[GameRecord] {
        &self.game_history
    }

    /// Appends a record for a won game. Returns true when `guesses` beat
    /// the previous best score (or there was none).
    pub fn record_win(&mut self, guesses: u32, secret_number: u32, difficulty: Difficulty) -> bool {
        self.games_played += 1;
        self.game_history.push(GameRecord::new(
            self.games_played,
            guesses,
            secret_number,
            difficulty,
        ));

        let new_record = self.best_score.map_or(true, |best| guesses < best);
        if new_record {
            self.best_score = Some(guesses);
        }
        new_record
    }

    pub fn reset_history(&mut self) {
        self.game_history.clear();
        self.games_played = 0;
        self.best_score = None;
    }
}
