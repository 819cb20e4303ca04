/// Errors surfaced by the profile store and game controller.
///
/// Bad guess text and out-of-range numbers are not errors; they come back
/// as [`crate::model::GuessOutcome`] values.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("profile '{0}' already exists")]
    DuplicateProfile(String),

    #[error("no profile selected")]
    NoProfileSelected,

    #[error("no profile named '{0}'")]
    UnknownProfile(String),

    #[error("profile name must not be empty")]
    InvalidProfileName,

    #[error("no game in progress")]
    NoGameInProgress,

    #[error("a game is already in progress")]
    GameInProgress,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
