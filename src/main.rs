use std::process::ExitCode;

use brutal_notes::{App, Cli, Config, DocumentRepository, FileStore};
use clap::Parser;
use log::{error, info, warn};

pub fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let store = FileStore::new(&config.data_dir);
    info!("Application starting up with data dir {}", store.data_dir().display());
    let (repository, summary) = DocumentRepository::load(store);
    if !summary.failures.is_empty() {
        eprintln!("COULD NOT LOAD SAVED DOCUMENTS");
    }

    let mut app = App::new(repository, config, cli.verbose);
    let result = app.run(cli.command);

    info!("Application shutting down");
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_rejection() {
                warn!("Operation rejected: {}", e);
            } else {
                error!("{}", e);
            }
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
