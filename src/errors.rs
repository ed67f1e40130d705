//! Unified, miette-based diagnostics for the echotest crate.
//!
//! Lookup failures never surface through this type: a missing attribute, an
//! out-of-range index, or an unloadable package is reported *inline* in the
//! header as a substitute value (see `resolve::Resolution` and the sentinels
//! in `version`). `EchoError` covers the failures that can abort a run before
//! any header is produced: an unreadable or malformed config file, an
//! unparsable package index, and module-loading faults that the resolution
//! layer converts back into display text at its boundary.

use miette::Diagnostic;
use thiserror::Error;

/// Crate-level failure modes.
#[derive(Debug, Error)]
pub enum EchoError {
    #[error("Config error in {path}: {message}")]
    Config { path: String, message: String },

    #[error("Package index error: {message}")]
    PackageIndex { message: String },

    /// No loader is registered under this module name. The analogue of a
    /// failed import; the registry treats it as "try the attribute branch".
    #[error("no module named `{name}`")]
    ModuleNotFound { name: String },

    /// A registered loader ran and failed. Loaders execute arbitrary code,
    /// so this carries whatever text the loader produced.
    #[error("module `{name}` failed to load: {message}")]
    ModuleLoad { name: String, message: String },
}

impl Diagnostic for EchoError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self {
            EchoError::Config { .. } => "echotest::config",
            EchoError::PackageIndex { .. } => "echotest::package_index",
            EchoError::ModuleNotFound { .. } => "echotest::module_not_found",
            EchoError::ModuleLoad { .. } => "echotest::module_load",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            EchoError::Config { .. } => Some(Box::new(
                "expected a TOML file with an [echo] table holding `envs`, `attributes`, and `versions` arrays",
            )),
            EchoError::PackageIndex { .. } => Some(Box::new(
                "the package index is read from the nearest Cargo.lock above the working directory",
            )),
            EchoError::ModuleNotFound { .. } | EchoError::ModuleLoad { .. } => None,
        }
    }
}
