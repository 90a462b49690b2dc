//! local-ip: show the primary local IP address
//!
//! Entry point for the local-ip application.

use local_ip::config::{Cli, Command, ValidatedConfig, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, exit_code_for, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_application(&cli.action(), config)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs the selected command with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(command: &Command, config: ValidatedConfig) -> ExitCode {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    let result = runtime.block_on(async {
        match command {
            Command::Show { json } => run::show(&config, *json).await,
            Command::Copy => run::copy(&config).await,
            // Init has already returned from main.
            Command::Watch | Command::Init { .. } => run::watch(config).await,
        }
    });

    // A pending stdin read holds a blocking thread; do not wait for it.
    runtime.shutdown_background();

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            if e.is_failure() {
                tracing::error!("{e}");
            } else {
                tracing::info!("{e}");
            }
            exit_code_for(&e)
        }
    }
}
