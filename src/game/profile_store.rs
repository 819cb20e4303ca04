use indexmap::IndexMap;
use log::{debug, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};
use crate::model::Profile;

pub const PROFILES_FILE_NAME: &str = "profiles.json";

/// Profiles keyed by name, in the order they were created.
pub type Profiles = IndexMap<String, Profile>;

/// How the last load went. Anything other than `Loaded`/`Missing` means
/// the file's content was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Missing,
    Loaded,
    Corrupt,
    Unreadable,
}

impl LoadStatus {
    pub fn discarded_data(&self) -> bool {
        matches!(self, LoadStatus::Corrupt | LoadStatus::Unreadable)
    }
}

#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: Profiles,
    load_status: LoadStatus,
}

impl ProfileStore {
    pub fn default_path(data_dir: &Path) -> PathBuf {
        data_dir.join(PROFILES_FILE_NAME)
    }

    /// Opens the store backed by `path`, loading whatever is there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (profiles, load_status) = Self::load(&path);
        Self {
            path,
            profiles,
            load_status,
        }
    }

    /// Reads the profile mapping from `path`. A missing file gives an empty
    /// mapping; so does one that can't be read or parsed.
    pub fn load(path: &Path) -> (Profiles, LoadStatus) {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(target: "profile_store", "No profiles at {}", path.display());
                return (Profiles::new(), LoadStatus::Missing);
            }
            Err(e) => {
                warn!(target: "profile_store", "Could not read {}: {}; starting empty", path.display(), e);
                return (Profiles::new(), LoadStatus::Unreadable);
            }
        };

        match serde_json::from_str::<Profiles>(&contents) {
            Ok(mut profiles) => {
                for (name, profile) in profiles.iter_mut() {
                    profile.set_name(name.clone());
                }
                debug!(target: "profile_store", "Loaded {} profiles from {}", profiles.len(), path.display());
                (profiles, LoadStatus::Loaded)
            }
            Err(e) => {
                warn!(target: "profile_store", "Discarding corrupt {}: {}", path.display(), e);
                (Profiles::new(), LoadStatus::Corrupt)
            }
        }
    }

    /// Writes the whole mapping to `path`, replacing previous content. The
    /// data goes to a sibling temp file first and is renamed into place.
    pub fn save_to(path: &Path, profiles: &Profiles) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let contents = serde_json::to_string_pretty(profiles)?;

        let mut tmp_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| PROFILES_FILE_NAME.into());
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, path)?;
        debug!(target: "profile_store", "Saved {} profiles to {}", profiles.len(), path.display());
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        Self::save_to(&self.path, &self.profiles)
    }

    /// Adds an empty profile and persists the store. Names are compared
    /// exactly, case included.
    pub fn create_profile(&mut self, name: &str) -> Result<&Profile> {
        if name.trim().is_empty() {
            return Err(GameError::InvalidProfileName);
        }
        if self.profiles.contains_key(name) {
            return Err(GameError::DuplicateProfile(name.to_string()));
        }

        self.profiles
            .insert(name.to_string(), Profile::new(name.to_string()));
        if let Err(e) = self.save() {
            self.profiles.shift_remove(name);
            return Err(e);
        }
        info!(target: "profile_store", "Created profile '{}'", name);
        self.profiles
            .get(name)
            .ok_or_else(|| GameError::UnknownProfile(name.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    pub fn profiles(&self) -> &Profiles {
        &self.profiles
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Profile> {
        self.profiles.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
