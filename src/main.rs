//! Resbundle - inspect path-addressed resource bundles
//!
//! Resolves portable resource paths against a search path of directories
//! and zip archives and prints what a program using the library would see.

use clap::{CommandFactory, FromArgMatches};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Environment variable holding the log filter
const LOG_ENV: &str = "RESBUNDLE_LOG";

/// Install the stderr log subscriber.
///
/// `-v` forces debug output; otherwise `RESBUNDLE_LOG` is used, falling back
/// to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, sources: Vec<resbundle::SearchPathEntry>) -> resbundle::Result<()> {
    let bundle = commands::helpers::open_search_path(cli.config.as_deref(), sources)?;
    tracing::debug!(members = bundle.len(), "opened search path");

    match &cli.command {
        Commands::List(args) => commands::list::run(&bundle, args),
        Commands::Glob(args) => commands::glob::run(&bundle, args),
        Commands::Cat(args) => commands::cat::run(&bundle, args),
        Commands::Stat(args) => commands::stat::run(&bundle, args),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let sources = cli::explicit_sources(&matches);

    init_logging(cli.verbose);

    if let Err(e) = run(cli, sources) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
