use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::guess_session::GuessSession;
use super::profile_store::ProfileStore;
use super::settings::Settings;
use crate::error::{GameError, Result};
use crate::model::{Difficulty, GuessOutcome, GuessResult, Profile};

/// Owns the profile store and the current game, and applies game outcomes
/// to the active profile.
#[derive(Debug)]
pub struct GameController {
    store: ProfileStore,
    active_profile: Option<String>,
    difficulty: Difficulty,
    session: Option<GuessSession>,
    rng: StdRng,
}

impl GameController {
    /// Builds a controller over `store` and selects its first (oldest)
    /// profile, if any. A seed makes secret draws reproducible.
    pub fn new(store: ProfileStore, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let active_profile = store.names().next().map(str::to_string);
        if let Some(name) = &active_profile {
            debug!(target: "game_controller", "Auto-selected profile '{}'", name);
        }
        Self {
            store,
            active_profile,
            difficulty: Difficulty::default(),
            session: None,
            rng,
        }
    }

    /// Applies remembered settings: difficulty, and the last profile when
    /// it still exists.
    pub fn restore(&mut self, settings: &Settings) {
        self.difficulty = settings.difficulty;
        if let Some(name) = &settings.last_profile {
            if self.store.contains(name) {
                self.active_profile = Some(name.clone());
            }
        }
    }

    /// Writes the controller's current choices into `settings`. Returns
    /// true when something changed.
    pub fn remember(&self, settings: &mut Settings) -> bool {
        let last_profile = self.active_profile.clone();
        let changed =
            settings.difficulty != self.difficulty || settings.last_profile != last_profile;
        settings.difficulty = self.difficulty;
        settings.last_profile = last_profile;
        changed
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn session(&self) -> Option<&GuessSession> {
        self.session.as_ref()
    }

    pub fn is_game_in_progress(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.is_won())
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.active_profile
            .as_deref()
            .and_then(|name| self.store.get(name))
    }

    fn active_name(&self) -> Result<String> {
        self.active_profile
            .clone()
            .ok_or(GameError::NoProfileSelected)
    }

    /// Switches to `name`. Any game in progress for another profile is
    /// dropped without being recorded.
    pub fn select_profile(&mut self, name: &str) -> Result<&Profile> {
        if !self.store.contains(name) {
            return Err(GameError::UnknownProfile(name.to_string()));
        }
        if self.active_profile.as_deref() != Some(name) {
            if self.is_game_in_progress() {
                info!(target: "game_controller", "Abandoning unfinished game on profile switch");
            }
            self.session = None;
            self.active_profile = Some(name.to_string());
            debug!(target: "game_controller", "Selected profile '{}'", name);
        }
        self.store
            .get(name)
            .ok_or_else(|| GameError::UnknownProfile(name.to_string()))
    }

    /// Creates a profile and makes it the active one.
    pub fn create_profile(&mut self, name: &str) -> Result<&Profile> {
        self.store.create_profile(name)?;
        self.select_profile(name)
    }

    /// Changes the difficulty for the next game. Not allowed mid-game.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        if self.is_game_in_progress() {
            return Err(GameError::GameInProgress);
        }
        self.difficulty = difficulty;
        Ok(())
    }

    /// Starts a fresh game at the selected difficulty, replacing any
    /// previous one.
    pub fn start_game(&mut self) -> Result<&GuessSession> {
        let name = self.active_name()?;
        if self.is_game_in_progress() {
            info!(target: "game_controller", "Abandoning unfinished game for a new one");
        }
        let session = GuessSession::start(self.difficulty, &mut self.rng);
        info!(target: "game_controller", "'{}' started a {} game", name, self.difficulty);
        Ok(&*self.session.insert(session))
    }

    /// Evaluates raw guess text against the current game. A win is recorded
    /// on the active profile and the store is saved; a failed save is
    /// reported in the result rather than hiding the win.
    pub fn submit_guess(&mut self, raw_input: &str) -> Result<GuessResult> {
        let name = self.active_name()?;
        let session = self.session.as_mut().ok_or(GameError::NoGameInProgress)?;
        let outcome = session.evaluate_input(raw_input)?;
        let attempts = session.attempts();

        let GuessOutcome::Correct { attempts } = outcome else {
            return Ok(GuessResult::ongoing(outcome, attempts));
        };
        let secret_number = session.secret_number();
        let difficulty = session.difficulty();

        let profile = self
            .store
            .get_mut(&name)
            .ok_or_else(|| GameError::UnknownProfile(name.clone()))?;
        let new_record = profile.record_win(attempts, secret_number, difficulty);
        let record = profile.game_history().last().cloned();
        info!(
            target: "game_controller",
            "'{}' won in {} attempts{}",
            name,
            attempts,
            if new_record { " (new best)" } else { "" }
        );
        let save_error = match self.store.save() {
            Ok(()) => None,
            Err(e) => {
                error!(target: "game_controller", "Failed to save profiles after win: {}", e);
                Some(e.to_string())
            }
        };

        Ok(GuessResult {
            outcome,
            attempts,
            new_record,
            record,
            save_error,
        })
    }

    /// Clears the active profile's history, game count and best score, and
    /// saves. Callers are expected to have confirmed with the user.
    pub fn reset_history(&mut self) -> Result<&Profile> {
        let name = self.active_name()?;
        let profile = self
            .store
            .get_mut(&name)
            .ok_or_else(|| GameError::UnknownProfile(name.clone()))?;
        profile.reset_history();
        self.store.save()?;
        info!(target: "game_controller", "Reset history for '{}'", name);
        self.store
            .get(&name)
            .ok_or(GameError::UnknownProfile(name))
    }
}
