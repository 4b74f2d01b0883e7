//! Cat command implementation
//!
//! Streams the bytes of the highest-priority match to stdout.

use std::io::{self, Write};

use resbundle::error::io_error;
use resbundle::{Bundle, Resource, Result};

use crate::cli::CatArgs;

/// Run cat command
pub fn run(bundle: &dyn Bundle, args: &CatArgs) -> Result<()> {
    let resource = bundle.get(&args.path)?;
    let mut reader = resource.open()?;

    let mut out = io::stdout().lock();
    io::copy(&mut reader, &mut out).map_err(|e| io_error(args.path.as_str(), e))?;
    out.flush().map_err(|e| io_error("<stdout>", e))
}
