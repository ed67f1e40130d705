//! Config-file binding — the in-crate stand-in for a host test framework's
//! option/ini layer.
//!
//! The file is TOML with an `[echo]` table. Its entries are merged before
//! the command-line flags, envs first, then attributes, then versions; flags
//! append after the file within each list.
//!
//! ```toml
//! [echo]
//! envs = ["HOME", "CI_*"]
//! attributes = ["host.os"]
//! versions = ["serde"]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::cli::args::EchoArgs;
use crate::errors::EchoError;
use crate::report::EchoConfig;

/// File looked for in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "echotest.toml";

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub echo: EchoTable,
}

#[derive(Debug, Default, Deserialize)]
pub struct EchoTable {
    #[serde(default)]
    pub envs: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub versions: Vec<String>,
}

/// Reads and parses one config file.
pub fn load(path: &Path) -> Result<ConfigFile, EchoError> {
    let raw = fs::read_to_string(path).map_err(|e| EchoError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    toml::from_str(&raw).map_err(|e| EchoError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Binds file entries and flags into the three ordered key lists.
///
/// An explicitly passed `--config` must exist; the default file is optional.
pub fn bind(args: &EchoArgs) -> Result<EchoConfig, EchoError> {
    let file = match &args.config {
        Some(path) => Some(load(path)?),
        None => {
            let default = Path::new(DEFAULT_CONFIG);
            if default.is_file() {
                Some(load(default)?)
            } else {
                None
            }
        }
    };

    let mut config = EchoConfig::default();
    if let Some(file) = file {
        config.envs.extend(file.echo.envs);
        config.attributes.extend(file.echo.attributes);
        config.versions.extend(file.echo.versions);
    }
    config.envs.extend(args.echo_envs.iter().cloned());
    config.attributes.extend(args.echo_attributes.iter().cloned());
    config.versions.extend(args.echo_versions.iter().cloned());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_echo_table() {
        let parsed: ConfigFile = toml::from_str(
            "[echo]\nenvs = [\"ENV1\", \"ENV2\"]\nversions = [\"serde\"]\n",
        )
        .unwrap();
        assert_eq!(parsed.echo.envs, ["ENV1", "ENV2"]);
        assert_eq!(parsed.echo.versions, ["serde"]);
        assert!(parsed.echo.attributes.is_empty());
    }

    #[test]
    fn missing_tables_default_to_empty_lists() {
        let parsed: ConfigFile = toml::from_str("").unwrap();
        assert!(parsed.echo.envs.is_empty());
    }
}
