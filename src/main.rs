mod app;
mod command;
mod config;
mod model;
mod playlist;
mod store;
mod transaction;
mod view;

use std::io;
use std::panic;
use std::path::PathBuf;
use tracing::{info, error};

use app::App;
use config::AppConfig;
use model::PlaylistModel;
use store::PlaylistStore;
use view::TextView;

const DEFAULT_STORE: &str = "playlister.json";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config_path: Option<PathBuf>,
    store_path: Option<PathBuf>,
    memory: bool,
    help: bool,
}

/// Parse the arguments after the program name
fn parse_arg_list(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" | "-s" | "--store" => {
                let path = args
                    .get(i + 1)
                    .map(PathBuf::from)
                    .ok_or_else(|| format!("{} requires an argument", args[i]))?;
                if args[i] == "-c" || args[i] == "--config" {
                    parsed.config_path = Some(path);
                } else {
                    parsed.store_path = Some(path);
                }
                i += 2;
            }
            "--memory" => {
                parsed.memory = true;
                i += 1;
            }
            "-h" | "--help" => {
                parsed.help = true;
                i += 1;
            }
            arg => return Err(format!("Unknown option: {}", arg)),
        }
    }

    if parsed.memory && parsed.store_path.is_some() {
        return Err("--memory cannot be combined with --store".to_string());
    }
    Ok(parsed)
}

/// Parse command line arguments, exiting on errors or --help
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_arg_list(&args) {
        Ok(parsed) if parsed.help => {
            print_help();
            std::process::exit(0);
        }
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Log panics through tracing before the default hook runs
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occured"
            );
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

fn print_help() {
    eprintln!("playlister - edit playlists with undo/redo from the terminal");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    playlister [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <FILE>  Read settings from a TOML file");
    eprintln!("    -s, --store <FILE>   Save playlists to FILE (default: {})", DEFAULT_STORE);
    eprintln!("    --memory             Keep playlists in memory only (not with --store)");
    eprintln!("    -h, --help           Print this help message");
    eprintln!();
    eprintln!("Type 'help' at the prompt for the list of commands.");
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    install_panic_hook();

    let args = parse_args();

    let config = match &args.config_path {
        Some(path) => AppConfig::from_file(path).unwrap_or_else(|e| {
            error!(error = %e, "failed to load config");
            std::process::exit(1);
        }),
        None => AppConfig::new(),
    };

    let store = if args.memory {
        PlaylistStore::in_memory()
    } else {
        let path = args
            .store_path
            .or_else(|| config.store_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE));
        PlaylistStore::new(Some(path))
    };

    let view = TextView::new(io::stdout());
    let mut model = PlaylistModel::new(store, Box::new(view), config.history_limit);
    model.load_lists().map_err(|e| {error!(error = %e, "Failed to load playlists"); e})?;
    info!("Playlister started");

    let mut app = App::new(model, config.aliases);
    let stdin = io::stdin();
    app.run(stdin.lock(), io::stdout())
}
