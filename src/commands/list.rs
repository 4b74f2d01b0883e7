//! List command implementation
//!
//! Prints every resource the search path knows about, in priority order.

use resbundle::{Bundle, Lister, Result};

use super::helpers::print_paths;
use crate::cli::ListArgs;

/// Run list command
pub fn run(bundle: &dyn Bundle, args: &ListArgs) -> Result<()> {
    let resources = bundle.list()?;
    tracing::debug!(count = resources.len(), "listed resources");
    print_paths(&resources, args.json)
}
