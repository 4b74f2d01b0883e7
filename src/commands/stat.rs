//! Stat command implementation

use chrono::{DateTime, SecondsFormat, Utc};
use resbundle::{Bundle, Resource, Result};

use crate::cli::StatArgs;

/// Run stat command
pub fn run(bundle: &dyn Bundle, args: &StatArgs) -> Result<()> {
    let resource = bundle.get(&args.path)?;
    let info = resource.stat()?;

    let modified = info.modified.map_or_else(
        || "unknown".to_string(),
        |time| DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true),
    );

    println!("path:     {}", resource.path());
    println!("name:     {}", info.name);
    println!("size:     {}", info.size);
    println!("modified: {modified}");

    Ok(())
}
