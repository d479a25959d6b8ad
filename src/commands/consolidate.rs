//! Consolidate command implementation
//!
//! The consolidate command executes one full run:
//! 1. Resolve the root and materialize the alias areas
//! 2. Alias every loadable cached repository bundle
//! 3. Alias every loose artifact found across the search roots
//! 4. Write the manifest
//!
//! Everything after step 1 degrades per item; the command only fails when
//! the layout cannot be created or the manifest cannot be written.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use modelink::output::{emoji, OutputConfig};

/// Arguments for the consolidate command
#[derive(Args, Debug)]
pub struct ConsolidateArgs {
    /// Consolidation root directory
    #[arg(long, value_name = "PATH", env = "MODELINK_ROOT")]
    pub root: Option<PathBuf>,

    /// Additional directory to scan for loose artifacts (repeatable)
    #[arg(long = "search-path", value_name = "PATH")]
    pub search_path: Vec<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the consolidate command
pub fn execute(args: ConsolidateArgs, output: &OutputConfig) -> Result<()> {
    use modelink::alias::AliasTable;
    use modelink::consolidate::{execute_consolidation, ConsolidateOptions};
    use modelink::linkfs::RealLinkFs;
    use modelink::paths;

    let mut extra_search_paths = args.search_path.clone();
    if let Ok(raw) = std::env::var(paths::SEARCH_PATHS_ENV) {
        extra_search_paths.extend(paths::split_search_paths(&raw));
    }

    let options = ConsolidateOptions {
        root: args.root.clone(),
        extra_search_paths,
        aliases: AliasTable::builtin(),
    };

    let report = execute_consolidation(&RealLinkFs, &options)?;

    if !args.quiet {
        println!(
            "{} Consolidated models under {}",
            emoji(output, "🔗", "[LINK]"),
            report.layout.root.display()
        );
        println!();
        println!(
            "Manifest written: {}",
            report.layout.manifest_path.display()
        );
        let bundles = if report.linked_bundles.is_empty() {
            "(none)".to_string()
        } else {
            report.linked_bundles.join(", ")
        };
        println!("vLLM aliases: {bundles}");
        println!("GGUF files: {}", report.manifest.gguf_files.len());

        let failures: Vec<&str> = report
            .manifest
            .vllm_aliases
            .iter()
            .chain(report.manifest.gguf_files.iter())
            .filter(|r| r.error.is_some())
            .map(|r| r.alias.as_str())
            .collect();
        if !failures.is_empty() {
            println!(
                "{} Skipped (see manifest): {}",
                emoji(output, "⚠️", "[WARN]"),
                failures.join(", ")
            );
        }
    }

    Ok(())
}
