use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use numguess::console::Console;
use numguess::game::{GameController, ProfileStore, Settings};
use numguess::model::Difficulty;

/// Number guessing game with per-profile scoreboards.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding profiles.json and settings.json
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Seed for secret numbers (overrides the SEED environment variable)
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty to start with: easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = cli.data_dir.unwrap_or_else(Settings::default_data_dir);
    info!("Using data directory {}", data_dir.display());

    let mut settings = Settings::load(&data_dir);
    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }

    let store = ProfileStore::open(ProfileStore::default_path(&data_dir));
    let seed = cli.seed.or_else(Settings::seed_from_env);
    let mut controller = GameController::new(store, seed);
    controller.restore(&settings);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), data_dir, settings);
    if let Err(e) = console.run(&mut controller) {
        error!("Console failed: {}", e);
        std::process::exit(1);
    }
}
