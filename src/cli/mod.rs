//! The echotest Command-Line Interface.
//!
//! This module is the entry point for the binary and orchestrates the core
//! library functions: bind config, discover the package index, build the
//! default module registry, assemble the header, print it.

use clap::Parser;

use crate::cli::args::EchoArgs;
use crate::registry::build_default_registry;
use crate::report;
use crate::version::PackageIndex;

pub mod args;
pub mod config;
pub mod output;

/// The main entry point for the CLI.
pub fn run() -> miette::Result<()> {
    let args = EchoArgs::parse();
    let echo = config::bind(&args)?;

    // The index is only read when a version was actually requested.
    let index = if echo.versions.is_empty() {
        PackageIndex::default()
    } else {
        let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
        PackageIndex::discover(&cwd)?
    };
    let mut registry = build_default_registry();

    let header = report::build_header(&echo, &index, &mut registry);
    output::print_header(&header);
    Ok(())
}
