use crate::model::Difficulty;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";
const APP_DIR_NAME: &str = "numguess";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub last_profile: Option<String>,
}

fn default_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            difficulty: Difficulty::default(),
            last_profile: None,
        }
    }
}

impl Settings {
    pub fn new(difficulty: Difficulty, last_profile: Option<String>) -> Self {
        Settings {
            difficulty,
            last_profile,
            ..Default::default()
        }
    }

    /// Loads settings from `data_dir`, falling back to (and writing out)
    /// the defaults when the file is missing or unreadable.
    pub fn load(data_dir: &Path) -> Self {
        let path = Self::settings_path(data_dir);
        if let Ok(contents) = fs::read_to_string(&path) {
            match serde_json::from_str::<Settings>(&contents) {
                Ok(mut settings) => {
                    settings.migrate();
                    return settings;
                }
                Err(e) => {
                    warn!(target: "settings", "Ignoring bad settings at {}: {}", path.display(), e)
                }
            }
        }
        let default = Settings::default();
        if let Err(e) = default.save(data_dir) {
            warn!(target: "settings", "Failed to write default settings: {}", e);
        }
        default
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), std::io::Error> {
        let path = Self::settings_path(data_dir);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string(self)?;
        fs::write(&path, contents)?;
        debug!(target: "settings", "Saved settings to {}", path.display());
        Ok(())
    }

    pub fn settings_path(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE_NAME)
    }

    /// Per-user data directory, or the working directory when the platform
    /// has none.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
    }
}
