//! Line-oriented terminal front end. Everything here is presentation: it
//! turns typed lines into controller calls and controller results into text.

use itertools::Itertools;
use log::{trace, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::game::{GameController, Settings};
use crate::model::{Difficulty, GuessOutcome, GuessResult, Profile};

pub const HELP: &str = "\
Commands:
  profiles               list profiles
  profile add <name>     create a profile and switch to it
  profile <name>         switch profile
  difficulty <level>     easy, medium or hard
  start                  start a new game
  history                show the scoreboard
  reset                  clear the scoreboard for this profile
  help                   show this text
  quit                   exit
Anything else is taken as a guess.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    ListProfiles,
    AddProfile(String),
    SelectProfile(String),
    SetDifficulty(Difficulty),
    Start,
    History,
    Reset,
    Guess(String),
}

impl Command {
    /// Parses one input line. Returns a usage message when a known command
    /// is missing its argument or has a bad one.
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "profiles" => Ok(Command::ListProfiles),
            "start" | "new" => Ok(Command::Start),
            "history" | "scores" => Ok(Command::History),
            "reset" => Ok(Command::Reset),
            "profile" => match rest.split_once(char::is_whitespace) {
                Some(("add", name)) if !name.trim().is_empty() => {
                    Ok(Command::AddProfile(name.trim().to_string()))
                }
                _ if rest == "add" || rest.is_empty() => {
                    Err("usage: profile <name> | profile add <name>".to_string())
                }
                _ => Ok(Command::SelectProfile(rest.to_string())),
            },
            "difficulty" => rest
                .parse::<Difficulty>()
                .map(Command::SetDifficulty)
                .map_err(|e| format!("{e}; choose easy, medium or hard")),
            _ => Ok(Command::Guess(line.to_string())),
        }
    }
}

pub fn outcome_message(result: &GuessResult) -> String {
    match result.outcome {
        GuessOutcome::InvalidInput => "Please enter a valid number.".to_string(),
        GuessOutcome::OutOfRange { min, max } => {
            format!("Please enter a number between {min} and {max}.")
        }
        GuessOutcome::Low => "Too low.".to_string(),
        GuessOutcome::High => "Too high.".to_string(),
        GuessOutcome::CloseLow => "Very close! Too low!".to_string(),
        GuessOutcome::CloseHigh => "Very close! Too high!".to_string(),
        GuessOutcome::Correct { attempts } => {
            let mut message = format!("Correct! You guessed it in {attempts} attempts.");
            if result.new_record {
                message.push_str("\nNew best score!");
            }
            message
        }
    }
}

pub fn best_score_line(profile: Option<&Profile>) -> String {
    match profile.and_then(Profile::best_score) {
        Some(best) => format!("Best Score: {best}"),
        None => "Best Score: N/A".to_string(),
    }
}

pub fn scoreboard(profile: Option<&Profile>) -> String {
    match profile {
        None => "No profile selected.".to_string(),
        Some(profile) if profile.game_history().is_empty() => "No games played yet.".to_string(),
        Some(profile) => profile.game_history().iter().join("\n"),
    }
}

/// Drives a [`GameController`] from lines read on `input`.
pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
    data_dir: PathBuf,
    settings: Settings,
    debug_mode: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, data_dir: PathBuf, settings: Settings) -> Self {
        Self {
            input,
            output,
            data_dir,
            settings,
            debug_mode: Settings::is_debug_mode(),
        }
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn greet(&mut self, controller: &GameController) -> io::Result<()> {
        let store = controller.store();
        if store.load_status().discarded_data() {
            writeln!(
                self.output,
                "Warning: saved profiles at {} could not be read and were reset.",
                store.path().display()
            )?;
        }
        match controller.active_profile() {
            Some(profile) => {
                writeln!(self.output, "Profile: {}", profile.name())?;
                writeln!(self.output, "{}", best_score_line(Some(profile)))?;
                writeln!(self.output, "{}", controller.difficulty().description())?;
            }
            None => writeln!(self.output, "Create a profile to start! (profile add <name>)")?,
        }
        writeln!(self.output, "Type 'help' for commands.")
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self, controller: &mut GameController) -> io::Result<()> {
        self.greet(controller)?;
        while let Some(line) = self.read_line()? {
            if line.trim().is_empty() {
                continue;
            }
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(usage) => {
                    writeln!(self.output, "{usage}")?;
                    continue;
                }
            };
            trace!(target: "console", "Command: {:?}", command);
            if command == Command::Quit {
                break;
            }
            self.execute(controller, command)?;
            self.persist_settings(controller);
        }
        self.output.flush()
    }

    fn persist_settings(&mut self, controller: &GameController) {
        if controller.remember(&mut self.settings) {
            if let Err(e) = self.settings.save(&self.data_dir) {
                warn!(target: "console", "Failed to save settings: {}", e);
            }
        }
    }

    fn execute(&mut self, controller: &mut GameController, command: Command) -> io::Result<()> {
        match command {
            Command::Help => writeln!(self.output, "{HELP}"),
            Command::Quit => Ok(()),
            Command::ListProfiles => {
                let active = controller.active_profile().map(Profile::name);
                if controller.store().is_empty() {
                    return writeln!(self.output, "No profiles yet.");
                }
                for name in controller.store().names() {
                    let marker = if Some(name) == active { "*" } else { " " };
                    writeln!(self.output, "{marker} {name}")?;
                }
                Ok(())
            }
            Command::AddProfile(name) => match controller.create_profile(&name) {
                Ok(profile) => writeln!(self.output, "Created and switched to '{}'.", profile.name()),
                Err(e) => writeln!(self.output, "Error: {e}"),
            },
            Command::SelectProfile(name) => match controller.select_profile(&name) {
                Ok(profile) => {
                    let summary = best_score_line(Some(profile));
                    let history = scoreboard(Some(profile));
                    writeln!(self.output, "Switched to '{name}'. {summary}")?;
                    writeln!(self.output, "{history}")
                }
                Err(e) => writeln!(self.output, "Error: {e}"),
            },
            Command::SetDifficulty(difficulty) => match controller.set_difficulty(difficulty) {
                Ok(()) => writeln!(self.output, "{}", difficulty.description()),
                Err(e) => writeln!(self.output, "Error: {e}"),
            },
            Command::Start => match controller.start_game() {
                Ok(session) => {
                    let prompt = session.difficulty().prompt();
                    let secret = session.secret_number();
                    writeln!(self.output, "Game started! {prompt}")?;
                    if self.debug_mode {
                        writeln!(self.output, "[debug] secret is {secret}")?;
                    }
                    Ok(())
                }
                Err(e) => writeln!(self.output, "Error: {e}"),
            },
            Command::History => {
                let profile = controller.active_profile();
                writeln!(self.output, "{}", best_score_line(profile))?;
                writeln!(self.output, "{}", scoreboard(profile))
            }
            Command::Reset => {
                if controller.active_profile().is_none() {
                    return writeln!(self.output, "No profile selected to reset scoreboard.");
                }
                write!(
                    self.output,
                    "Are you sure you want to reset the scoreboard for this profile? [y/N] "
                )?;
                self.output.flush()?;
                let answer = self.read_line()?.unwrap_or_default();
                if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                    return writeln!(self.output, "Reset cancelled.");
                }
                match controller.reset_history() {
                    Ok(_) => writeln!(self.output, "Scoreboard reset."),
                    Err(e) => writeln!(self.output, "Error: {e}"),
                }
            }
            Command::Guess(raw) => match controller.submit_guess(&raw) {
                Ok(result) => {
                    writeln!(self.output, "{}", outcome_message(&result))?;
                    if let Some(e) = &result.save_error {
                        writeln!(self.output, "Warning: progress was not saved: {e}")?;
                    }
                    if result.outcome.counts_as_attempt() {
                        writeln!(self.output, "Guesses this game: {}", result.attempts)?;
                    }
                    if result.outcome.is_correct() {
                        let best = best_score_line(controller.active_profile());
                        writeln!(self.output, "{best}")?;
                        writeln!(self.output, "Type 'start' to play again.")?;
                    }
                    Ok(())
                }
                Err(e) => writeln!(self.output, "Error: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::profile_store::PROFILES_FILE_NAME;
    use crate::game::ProfileStore;
    use crate::model::GameRecord;
    use crate::tests::ScratchDir;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use test_context::test_context;

    fn run_script(dir: &Path, script: &str, seed: u64) -> (String, GameController) {
        let store = ProfileStore::open(dir.join(PROFILES_FILE_NAME));
        let mut controller = GameController::new(store, Some(seed));
        let settings = Settings::load(dir);
        controller.restore(&settings);
        let mut console = Console::new(
            Cursor::new(script.to_string()),
            Vec::new(),
            dir.to_path_buf(),
            settings,
        )
        .with_debug_mode(false);
        console.run(&mut controller).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        (output, controller)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("start"), Ok(Command::Start));
        assert_eq!(Command::parse("  QUIT "), Ok(Command::Quit));
        assert_eq!(
            Command::parse("profile add Mary Ann"),
            Ok(Command::AddProfile("Mary Ann".to_string()))
        );
        assert_eq!(
            Command::parse("profile Bob"),
            Ok(Command::SelectProfile("Bob".to_string()))
        );
        assert_eq!(
            Command::parse("difficulty medium"),
            Ok(Command::SetDifficulty(Difficulty::Medium))
        );
        assert_eq!(Command::parse("42"), Ok(Command::Guess("42".to_string())));
        assert_eq!(Command::parse("abc"), Ok(Command::Guess("abc".to_string())));
        assert!(Command::parse("difficulty insane").is_err());
        assert!(Command::parse("profile add").is_err());
        assert!(Command::parse("profile").is_err());
    }

    #[test]
    fn test_outcome_messages() {
        let result = GuessResult::ongoing(GuessOutcome::OutOfRange { min: 1, max: 50 }, 0);
        assert_eq!(
            outcome_message(&result),
            "Please enter a number between 1 and 50."
        );
        let result = GuessResult {
            outcome: GuessOutcome::Correct { attempts: 4 },
            attempts: 4,
            new_record: true,
            record: None,
            save_error: None,
        };
        assert_eq!(
            outcome_message(&result),
            "Correct! You guessed it in 4 attempts.\nNew best score!"
        );
    }

    #[test]
    fn test_scoreboard() {
        assert_eq!(scoreboard(None), "No profile selected.");
        let mut profile = Profile::new("Alice");
        assert_eq!(scoreboard(Some(&profile)), "No games played yet.");
        assert_eq!(best_score_line(Some(&profile)), "Best Score: N/A");

        profile.record_win(5, 7, Difficulty::Easy);
        profile.record_win(3, 20, Difficulty::Medium);
        assert_eq!(
            scoreboard(Some(&profile)),
            "Game 1 [Easy]: 5 guesses (Number was 7)\nGame 2 [Medium]: 3 guesses (Number was 20)"
        );
        assert_eq!(best_score_line(Some(&profile)), "Best Score: 3");
    }

    #[test_context(ScratchDir)]
    #[test]
    fn test_full_game_through_console(scratch: &mut ScratchDir) {
        let dir = scratch.path();
        let secret = {
            let store = ProfileStore::open(dir.join("draw.json"));
            let mut twin = GameController::new(store, Some(5));
            twin.create_profile("Twin").unwrap();
            twin.start_game().unwrap().secret_number()
        };

        let script = format!("profile add Alice\nstart\nabc\n0\n{secret}\nhistory\nquit\n");
        let (output, controller) = run_script(dir, &script, 5);

        assert!(output.contains("Created and switched to 'Alice'."));
        assert!(output.contains("Please enter a valid number."));
        assert!(output.contains("Please enter a number between 1 and 10."));
        assert!(output.contains("Correct! You guessed it in 1 attempts.\nNew best score!"));
        assert!(output.contains(&GameRecord::new(1, 1, secret, Difficulty::Easy).to_string()));

        let alice = controller.active_profile().unwrap();
        assert_eq!(alice.games_played(), 1);
        assert_eq!(alice.best_score(), Some(1));
        assert_eq!(
            Settings::load(dir).last_profile,
            Some("Alice".to_string())
        );
    }

    #[test_context(ScratchDir)]
    #[test]
    fn test_reset_needs_confirmation(scratch: &mut ScratchDir) {
        let dir = scratch.path();
        let mut store = ProfileStore::open(dir.join(PROFILES_FILE_NAME));
        store.create_profile("Alice").unwrap();
        let mut controller = GameController::new(store, Some(1));
        controller.start_game().unwrap();
        let secret = controller.session().unwrap().secret_number();
        controller.submit_guess(&secret.to_string()).unwrap();
        drop(controller);

        let (output, controller) = run_script(dir, "reset\nn\n", 1);
        assert!(output.contains("Reset cancelled."));
        assert_eq!(controller.active_profile().unwrap().games_played(), 1);

        let (output, controller) = run_script(dir, "reset\ny\n", 1);
        assert!(output.contains("Scoreboard reset."));
        assert_eq!(controller.active_profile().unwrap().games_played(), 0);
        let (saved, _) = ProfileStore::load(&dir.join(PROFILES_FILE_NAME));
        assert_eq!(saved["Alice"].best_score(), None);
    }

    #[test_context(ScratchDir)]
    #[test]
    fn test_errors_are_reported(scratch: &mut ScratchDir) {
        let dir = scratch.path();
        let (output, _) = run_script(dir, "start\n5\nreset\nprofile Ghost\n", 3);
        assert!(output.contains("Create a profile to start!"));
        assert!(output.contains("Error: no profile selected"));
        assert!(output.contains("No profile selected to reset scoreboard."));
        assert!(output.contains("Error: no profile named 'Ghost'"));
    }

    #[test_context(ScratchDir)]
    #[test]
    fn test_corrupt_store_warns(scratch: &mut ScratchDir) {
        let dir = scratch.path();
        fs::write(dir.join(PROFILES_FILE_NAME), "garbage").unwrap();
        let (output, controller) = run_script(dir, "", 3);
        assert!(output.starts_with("Warning: saved profiles at"));
        assert!(controller.store().is_empty());
    }

    #[test_context(ScratchDir)]
    #[test]
    fn test_unsaved_win_is_reported(scratch: &mut ScratchDir) {
        let dir = scratch.path();
        let mut store = ProfileStore::open(dir.join(PROFILES_FILE_NAME));
        store.create_profile("Alice").unwrap();
        drop(store);
        fs::create_dir(dir.join("profiles.json.tmp")).unwrap();

        let secret = {
            let store = ProfileStore::open(dir.join("draw.json"));
            let mut twin = GameController::new(store, Some(8));
            twin.create_profile("Twin").unwrap();
            twin.start_game().unwrap().secret_number()
        };
        let (output, controller) = run_script(dir, &format!("start\n{secret}\n"), 8);

        assert!(output.contains("Correct! You guessed it in 1 attempts."));
        assert!(output.contains("Warning: progress was not saved:"));
        assert_eq!(controller.active_profile().unwrap().games_played(), 1);
    }
}
