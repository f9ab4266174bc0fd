mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod tui;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\nError: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    let interactive = cli.command.is_interactive();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone(), interactive)?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        tui::restore_terminal();
        let report = panic_hook.panic_report(pi);
        error!("{}", report);
        eprintln!("{}", report);
    }));

    info!("MolPrisma v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = config::load(&cli)?;

    let command_result = match cli.command {
        Commands::View(args) => {
            info!("Dispatching to 'view' command.");
            commands::view::run(args, config)
        }
        Commands::Fields(args) => {
            info!("Dispatching to 'fields' command.");
            commands::fields::run(args, config)
        }
        Commands::Values(args) => {
            info!("Dispatching to 'values' command.");
            commands::values::run(args, config)
        }
    };

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    command_result
}
