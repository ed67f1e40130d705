//! Assembles the report header from the three configured key lists.
//!
//! Sections appear in fixed order (Environment, Package version,
//! Inspections); a section is omitted when its key list is empty.
//! Environment and version lines are sorted lexicographically; inspection
//! lines keep configuration order. Every line is `    name: value`.

use crate::env::echo_env;
use crate::registry::ModuleRegistry;
use crate::version::{echo_version, PackageIndex};

/// The fixed line emitted when nothing at all was requested.
pub const NOTHING_TO_ECHO: &str = "echotest: nothing to echo";

/// The three ordered key lists the config binder produces.
#[derive(Debug, Clone, Default)]
pub struct EchoConfig {
    pub envs: Vec<String>,
    pub versions: Vec<String>,
    pub attributes: Vec<String>,
}

impl EchoConfig {
    pub fn is_empty(&self) -> bool {
        self.envs.is_empty() && self.versions.is_empty() && self.attributes.is_empty()
    }
}

/// Builds the full header text. Never fails: every lookup error is already a
/// substitute value by the time it reaches a line.
pub fn build_header(
    config: &EchoConfig,
    index: &PackageIndex,
    registry: &mut ModuleRegistry,
) -> String {
    let mut sections = Vec::new();

    if !config.envs.is_empty() {
        let mut data: Vec<(String, String)> =
            config.envs.iter().flat_map(|k| echo_env(k)).collect();
        data.sort();
        sections.push(section("Environment:", &data));
    }

    if !config.versions.is_empty() {
        let mut data: Vec<(String, String)> = config
            .versions
            .iter()
            .flat_map(|k| echo_version(k, index, registry))
            .collect();
        data.sort();
        sections.push(section("Package version:", &data));
    }

    if !config.attributes.is_empty() {
        let data: Vec<(String, String)> = config
            .attributes
            .iter()
            .map(|k| (k.clone(), registry.resolve_attribute(k)))
            .collect();
        sections.push(section("Inspections:", &data));
    }

    if sections.is_empty() {
        return NOTHING_TO_ECHO.to_string();
    }
    sections.join("\n")
}

fn section(title: &str, pairs: &[(String, String)]) -> String {
    let mut lines = vec![title.to_string()];
    lines.extend(pairs.iter().map(|(k, v)| format!("    {}: {}", k, v)));
    lines.join("\n")
}
