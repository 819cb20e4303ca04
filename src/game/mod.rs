pub mod game_controller;
pub mod guess_session;
pub mod profile_store;
pub mod settings;

pub use game_controller::GameController;
pub use guess_session::GuessSession;
pub use profile_store::{LoadStatus, ProfileStore, Profiles};
pub use settings::Settings;
