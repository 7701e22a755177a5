mod config;
mod console_ui;

use std::io;

use clap::{Parser, ValueEnum};
use tictactoe_engine::tictactoe::{BotDifficulty, SessionSettings, TicTacToeSession};
use tictactoe_engine::{log, logger};

use config::{Config, ConfigStore, Validate, get_config_store};
use console_ui::{ConsoleExit, ConsoleGame};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for BotDifficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => BotDifficulty::Easy,
            DifficultyArg::Normal => BotDifficulty::Normal,
            DifficultyArg::Hard => BotDifficulty::Hard,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe_console")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Do not print log lines
    #[arg(long)]
    quiet: bool,

    /// Path to the YAML config file
    #[arg(long)]
    config: Option<String>,

    /// Rounds per series; skips the prompt
    #[arg(long)]
    rounds: Option<u32>,

    /// Seed for the computer's corner and side choices
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(rounds) = self.rounds {
            config.default_rounds = Some(rounds);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty.into();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if !args.quiet {
        let prefix = if args.use_log_prefix {
            Some("Console".to_string())
        } else {
            None
        };
        logger::init_logger(prefix);
    }

    let config_store = match args.config {
        Some(ref path) => ConfigStore::from_yaml_file(path),
        None => get_config_store(),
    };
    let mut config: Config = config_store.get_or_init_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    log!("Starting session with seed {} ({:?})", seed, config.difficulty);

    let settings = SessionSettings {
        human_mark: config.human_mark,
        difficulty: config.difficulty,
    };
    let mut session = TicTacToeSession::with_seed(settings, seed)?;

    let exit = ConsoleGame::new(&mut session, &config, io::stdin().lock(), io::stdout().lock()).run()?;
    match exit {
        ConsoleExit::Finished => log!("Player finished"),
        ConsoleExit::Quit => log!("Player quit in {:?}", session.phase()),
        ConsoleExit::EndOfInput => log!("Input closed in {:?}", session.phase()),
    }

    Ok(())
}
