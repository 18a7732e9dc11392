use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{GameSettings, THEME};
use grid_snake::error::AppError;
use grid_snake::game::GameState;
use grid_snake::game_loop::{GameSession, SessionEvent};
use grid_snake::input::{InputHandler, Polled};
use grid_snake::renderer;
use grid_snake::score::{HighScoreStore, JsonScoreFile, MemoryScoreStore};
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use log::{LevelFilter, error, info};
use simplelog::{Config, WriteLogger};

/// How long to wait for input while no tick is pending.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(version, about = "Steer the snake, eat the food, avoid the walls")]
struct Cli {
    /// Read and write the high score at this path instead of the data directory.
    #[arg(long = "scores-file", value_name = "PATH")]
    scores_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long = "no-save", conflicts_with = "scores_file")]
    no_save: bool,

    /// Write the log to this file.
    #[arg(long = "log-file", value_name = "PATH", default_value = "grid-snake.log")]
    log_file: PathBuf,

    /// Minimum level written to the log file.
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    install_panic_hook();

    let result = if cli.no_save {
        run(&cli, MemoryScoreStore::default())
    } else {
        let store = cli
            .scores_file
            .clone()
            .map_or_else(JsonScoreFile::default_location, JsonScoreFile::new);
        info!("high score file: {}", store.path().display());
        run(&cli, store)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) -> Result<(), AppError> {
    let file = File::create(&cli.log_file).map_err(|source| AppError::LogFile {
        path: cli.log_file.display().to_string(),
        source,
    })?;
    WriteLogger::init(cli.log_level, Config::default(), file)?;
    Ok(())
}

fn run<S: HighScoreStore>(cli: &Cli, store: S) -> Result<(), AppError> {
    let settings = GameSettings::default();
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(settings, seed),
        None => GameState::new(settings),
    };
    let mut session = GameSession::new(state, store);
    info!(
        "session started on a {0}x{0} grid, high score {1}",
        settings.grid.count(),
        session.state().high_score
    );

    let mut terminal = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|frame| renderer::render(frame, session.state(), &THEME))?;
            needs_redraw = false;
        }

        let timeout = session
            .next_wakeup(Instant::now())
            .unwrap_or(IDLE_POLL_INTERVAL);

        match input.poll_input(timeout)? {
            Polled::Input(game_input) => match session.handle_input(game_input, Instant::now()) {
                SessionEvent::Quit => break,
                SessionEvent::Redraw => needs_redraw = true,
                SessionEvent::Ignored => {}
            },
            Polled::Resize => needs_redraw = true,
            Polled::Nothing => {}
        }

        if session.poll_tick(Instant::now()) {
            needs_redraw = true;
        }
    }

    info!("session ended, high score {}", session.state().high_score);
    Ok(())
}
