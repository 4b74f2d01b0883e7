//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgMatches, Parser, Subcommand};
use std::path::PathBuf;

use resbundle::SearchPathEntry;

/// Resbundle - inspect resource bundles
///
/// Look up resources the way a program using resbundle would see them.
#[derive(Parser, Debug)]
#[command(
    name = "resbundle",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Inspect path-addressed resource bundles",
    long_about = "Resbundle resolves portable resource paths against a search path of \
                  directories and zip archives, first match wins. Without --fs, --zip or \
                  --config the search path is the working directory, the executable's \
                  directory and an archive appended to the executable.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  resbundle --fs assets list\n    \
                  resbundle --zip data.zip --fs overrides glob 'images/*.png'\n    \
                  resbundle -c resbundle.yaml cat templates/index.html\n    \
                  resbundle stat logo.ico"
)]
pub struct Cli {
    /// Search path configuration file (YAML)
    #[arg(long, short = 'c', global = true, env = "RESBUNDLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Search a directory (repeatable, in priority order)
    #[arg(long = "fs", value_name = "DIR")]
    pub fs_dirs: Vec<PathBuf>,

    /// Search a zip archive (repeatable, in priority order)
    #[arg(long = "zip", value_name = "FILE")]
    pub zip_files: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every known resource
    List(ListArgs),

    /// List resources matching a glob pattern
    Glob(GlobArgs),

    /// Write a resource's contents to stdout
    Cat(CatArgs),

    /// Show resource metadata
    Stat(StatArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List resources in a directory:\n    resbundle --fs assets list\n\n\
                  List as JSON:\n    resbundle --zip data.zip list --json")]
pub struct ListArgs {
    /// Print a JSON array of paths
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the glob command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Top-level resources:\n    resbundle glob '*'\n\n\
                  One level down:\n    resbundle glob '*/*'\n\n\
                  By extension:\n    resbundle glob 'images/*.png' --json")]
pub struct GlobArgs {
    /// Portable glob pattern ('*', '?', '[a-z]'; '*' never crosses '/')
    pub pattern: String,

    /// Print a JSON array of paths
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the cat command
#[derive(Parser, Debug)]
pub struct CatArgs {
    /// Portable resource path, e.g. images/logo.png
    pub path: String,
}

/// Arguments for the stat command
#[derive(Parser, Debug)]
pub struct StatArgs {
    /// Portable resource path, e.g. images/logo.png
    pub path: String,
}

/// Search path entries given with `--fs` and `--zip`, in command line order
pub fn explicit_sources(matches: &ArgMatches) -> Vec<SearchPathEntry> {
    let mut indexed = Vec::new();

    if let (Some(values), Some(indices)) = (
        matches.get_many::<PathBuf>("fs_dirs"),
        matches.indices_of("fs_dirs"),
    ) {
        indexed.extend(indices.zip(values).map(|(index, path)| {
            (
                index,
                SearchPathEntry::Fs {
                    path: path.clone(),
                    optional: false,
                },
            )
        }));
    }
    if let (Some(values), Some(indices)) = (
        matches.get_many::<PathBuf>("zip_files"),
        matches.indices_of("zip_files"),
    ) {
        indexed.extend(indices.zip(values).map(|(index, path)| {
            (
                index,
                SearchPathEntry::Zip {
                    path: path.clone(),
                    optional: false,
                },
            )
        }));
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, entry)| entry).collect()
}
