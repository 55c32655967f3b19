pub mod types;
pub mod commands;
pub mod logging;

use clap::Parser;
use std::path::PathBuf;

use crate::cli::types::Commands;

/// Run the command-line interface, returning the process exit code
pub async fn run() -> i32 {
    let cli = types::Cli::parse();

    let verbose = matches!(
        cli.command,
        Some(Commands::Build { verbose: true, .. }) | Some(Commands::Check { verbose: true, .. })
    );

    // Initialize logging system
    logging::init_logging(logging::level_for(cli.debug || verbose, cli.quiet));

    // Configure backtrace
    logging::configure_backtrace(cli.trace);

    let source = cli.source.clone().unwrap_or_else(|| PathBuf::from("."));

    let ok = match &cli.command {
        Some(command @ Commands::Build { .. }) => commands::handle_build_command(command, &source),
        Some(command @ Commands::Serve { .. }) => commands::handle_serve_command(command, &source).await,
        Some(command @ Commands::Check { .. }) => commands::handle_check_command(command, &source),
        Some(Commands::Clean {}) => commands::handle_clean_command(&source),
        Some(command @ Commands::New { .. }) => commands::handle_new_command(command),
        None => {
            // Default to build command if none provided
            let command = Commands::Build {
                config: None,
                base_url: None,
                destination: None,
                watch: false,
                verbose: false,
            };
            commands::handle_build_command(&command, &source)
        }
    };

    if ok { 0 } else { 1 }
}
