mod config;
mod console;
mod domain;
mod history;
mod repository;
mod seed;
mod service;

use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::{error, info, Level};

use config::{ConfigError, Settings, DEFAULT_CONFIG_FILE};
use console::Console;
use history::UndoRedo;
use repository::{Repository, RepositoryError};
use service::Catalog;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

struct Args {
    config: PathBuf,
    no_seed: bool,
    no_color: bool,
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config: PathBuf::from(DEFAULT_CONFIG_FILE),
        no_seed: false,
        no_color: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    parsed.config = PathBuf::from(&args[i + 1]);
                    i += 2;
                } else {
                    eprintln!("Error: --config requires an argument");
                    std::process::exit(1);
                }
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--no-seed" => {
                parsed.no_seed = true;
                i += 1;
            }
            "--no-color" => {
                parsed.no_color = true;
                i += 1;
            }
            arg => {
                eprintln!("Unknown option: {}", arg);
                std::process::exit(1);
            }
        }
    }

    parsed
}

fn print_help() {
    eprintln!("movie-rental - A console movie rental store with undo/redo");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    movie-rental [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <FILE>  Settings file (default: {})", DEFAULT_CONFIG_FILE);
    eprintln!("    --no-seed            Do not generate random data at start-up");
    eprintln!("    --no-color           Print errors without color");
    eprintln!("    -h, --help           Print this help message");
}

/// Log panics before the default hook prints them
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        if let Some(location) = info.location() {
            error!(file = location.file(), line = location.line(), "panic occured");
        } else {
            error!("panic occured");
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            error!(message = %s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            error!(message = %s);
        }

        default_hook(info);
    }));
}

fn init_logging(level: Level, log_file: Option<&PathBuf>) -> io::Result<()> {
    let builder = tracing_subscriber::fmt().with_max_level(level);
    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn run(args: Args) -> Result<(), StartupError> {
    let settings = Settings::load(&args.config)?;
    init_logging(settings.log_level()?, settings.log_file.as_ref())?;
    install_panic_hook();
    info!(config = %args.config.display(), repository = ?settings.repository, "Movie rental started");

    let (clients, movies, rentals) = settings.storages();
    let mut catalog = Catalog::new(
        Repository::open(clients)?,
        Repository::open(movies)?,
        Repository::open(rentals)?,
    );
    let mut history = UndoRedo::new();

    if settings.should_seed() && !args.no_seed {
        seed::seed(&mut catalog, &mut history, &mut rand::thread_rng(), seed::DEFAULT_COUNT);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console =
        Console::new(catalog, history, stdin.lock(), stdout.lock()).with_color(settings.color && !args.no_color);
    console.run()?;

    info!("Movie rental stopped");
    Ok(())
}

fn main() {
    let args = parse_args();
    if let Err(e) = run(args) {
        error!(error = %e, "Movie rental failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
