//! Defines the command-line arguments for the echotest CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure. All three echo
//! flags are repeatable and append to their list.

use clap::Parser;
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "echotest",
    version,
    about = "Echo environment variables, package versions, and inspected attributes into a test run's report header."
)]
pub struct EchoArgs {
    /// Environment variable name or glob to print.
    #[arg(long = "echo-env", value_name = "NAME")]
    pub echo_envs: Vec<String>,

    /// Package name or glob whose version to print.
    #[arg(long = "echo-version", value_name = "PACKAGE")]
    pub echo_versions: Vec<String>,

    /// Dotted attribute path to print (full path).
    #[arg(long = "echo-attr", value_name = "PATH")]
    pub echo_attributes: Vec<String>,

    /// Config file to merge before the flags (defaults to ./echotest.toml
    /// when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
