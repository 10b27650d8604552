use chatadmin::cli::Cli;
use chatadmin::commands::{self, TerminalPasswordSource};
use chatadmin::config::{AppConfig, load_config};
use chatadmin::logger::setup_logger;
use chatadmin::presenter::TerminalAlertPresenter;
use chatadmin::{AppError, AppResult};
use chatadmin_client::SessionGateway;
use chatadmin_client::storage::{FileStore, KeyValueStore};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    if let Err(e) = setup_logger(config.logging(), cli.verbose) {
        eprintln!("Failed to initialize logger: {e}");
    }
    log::debug!("Starting chatadmin {}", env!("CARGO_PKG_VERSION"));

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already shown through the alert presenter
        Err(AppError::Rejected(_)) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &AppConfig) -> AppResult<()> {
    let settings = config.gateway();
    let store: Arc<dyn KeyValueStore> = match settings.storage_dir() {
        Some(dir) => Arc::new(FileStore::new(dir)),
        None => Arc::new(FileStore::in_default_location()?),
    };

    let gateway = SessionGateway::new(settings, store, Arc::new(TerminalAlertPresenter))?;
    let mut stdout = std::io::stdout().lock();
    commands::run(
        cli.command,
        config,
        &gateway,
        &TerminalPasswordSource,
        &mut stdout,
    )
    .await
}
