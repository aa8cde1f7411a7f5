//! Zipvault CLI - password-based file and folder encryption on the
//! command line.

mod cli;
mod commands;
mod error;
mod output;
mod progress;
mod prompt;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Encrypt(args) => commands::encrypt::execute(args, &*formatter, cli.quiet),
        cli::Commands::Decrypt(args) => commands::decrypt::execute(args, &*formatter),
        cli::Commands::Verify(args) => commands::verify::execute(args, &*formatter),
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    }
}

/// Installs the tracing subscriber; events go to stderr so stdout stays
/// clean for results and JSON output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "zipvault_core=debug,zipvault=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
