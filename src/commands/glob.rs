//! Glob command implementation

use resbundle::{Bundle, Result};

use super::helpers::print_paths;
use crate::cli::GlobArgs;

/// Run glob command
pub fn run(bundle: &dyn Bundle, args: &GlobArgs) -> Result<()> {
    let resources = bundle.glob(&args.pattern)?;
    print_paths(&resources, args.json)
}
