//! Command helper utilities

use std::io::{self, Write};
use std::path::Path;

use resbundle::error::io_error;
use resbundle::{
    BundleSequence, Lister, Resource, Result, ResourceRef, SearchPathConfig, SearchPathEntry,
};

/// Build the search path the commands resolve against.
///
/// Entries from `--fs` and `--zip` come first, followed by the search path
/// of the configuration file as one nested member. Without either, the
/// default search path is used.
pub fn open_search_path(config: Option<&Path>, sources: Vec<SearchPathEntry>) -> Result<BundleSequence> {
    if config.is_none() && sources.is_empty() {
        return SearchPathConfig::default().build();
    }

    let mut sequence = SearchPathConfig::from_entries(sources).build()?;
    if let Some(path) = config {
        sequence.push(SearchPathConfig::load(path)?.build()?.into_bundle());
    }
    Ok(sequence)
}

/// Print resource paths, one per line or as a JSON array
pub fn print_paths(resources: &[ResourceRef], json: bool) -> Result<()> {
    let paths: Vec<&str> = resources.iter().map(|r| r.path()).collect();
    let mut out = io::stdout().lock();

    if json {
        let rendered = serde_json::to_string_pretty(&paths).map_err(|e| io_error("<stdout>", e.into()))?;
        writeln!(out, "{rendered}").map_err(|e| io_error("<stdout>", e))?;
    } else {
        for path in paths {
            writeln!(out, "{path}").map_err(|e| io_error("<stdout>", e))?;
        }
    }
    Ok(())
}
