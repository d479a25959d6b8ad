//! Paths command implementation
//!
//! Read-only introspection: prints the resolved layout and the artifact
//! search roots without creating or modifying anything.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use modelink::paths::{self, Layout};

/// Arguments for the paths command
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Consolidation root directory
    #[arg(long, value_name = "PATH", env = "MODELINK_ROOT")]
    pub root: Option<PathBuf>,

    /// Additional directory to include in the search roots (repeatable)
    #[arg(long = "search-path", value_name = "PATH")]
    pub search_path: Vec<PathBuf>,
}

/// Execute the paths command
pub fn execute(args: PathsArgs) -> Result<()> {
    let layout = Layout::resolve(args.root.as_deref());

    let mut extra = args.search_path.clone();
    if let Ok(raw) = std::env::var(paths::SEARCH_PATHS_ENV) {
        extra.extend(paths::split_search_paths(&raw));
    }

    println!("{layout}");
    println!();
    println!("search_roots:");
    let roots = layout.search_roots(&extra);
    if roots.is_empty() {
        println!("  (none exist yet)");
    } else {
        for root in roots {
            println!("  {}", root.display());
        }
    }
    Ok(())
}
