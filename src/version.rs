//! Package-version lookup for the report header.
//!
//! The package metadata index is the nearest `Cargo.lock`, read without
//! executing any package code. Exact lookups that miss the index fall back to
//! loading the name as a module and probing the conventional version
//! attributes; glob lookups filter the index only.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::EchoError;
use crate::glob;
use crate::registry::ModuleRegistry;
use crate::value::Value;

/// Substitute value for a package that cannot be loaded at all.
pub const UNABLE_LOAD: &str = "<unable to load package>";
/// Substitute value for a loadable package without a version indicator.
pub const UNABLE_VERSION: &str = "<unable get package version>";

/// Conventional version attributes, probed in order. A callable is invoked
/// with no arguments; a literal attribute is used directly.
const VERSION_ATTRS: [&str; 3] = ["get_version", "version", "VERSION"];

#[derive(Debug, Deserialize)]
struct Lockfile {
    #[serde(default)]
    package: Vec<LockedPackage>,
}

#[derive(Debug, Deserialize)]
struct LockedPackage {
    name: String,
    version: String,
}

/// The installed-package metadata index.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    entries: Vec<(String, String)>,
}

impl PackageIndex {
    /// Builds an index from explicit entries. Used by embedders and tests.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Discovers the index by walking up from `start` to the nearest
    /// `Cargo.lock`. An absent lockfile yields an empty index; an unreadable
    /// or malformed one is an error.
    pub fn discover(start: &Path) -> Result<Self, EchoError> {
        let Some(lockfile) = find_lockfile(start) else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(&lockfile).map_err(|e| EchoError::PackageIndex {
            message: format!("{}: {}", lockfile.display(), e),
        })?;
        let parsed: Lockfile = toml::from_str(&raw).map_err(|e| EchoError::PackageIndex {
            message: format!("{}: {}", lockfile.display(), e),
        })?;
        Ok(Self::from_entries(
            parsed.package.into_iter().map(|p| (p.name, p.version)),
        ))
    }

    /// Exact version lookup.
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All (name, version) pairs whose name matches the glob.
    pub fn matching(&self, pattern: &str) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(name, _)| glob::matches(pattern, name))
            .cloned()
            .collect()
    }
}

fn find_lockfile(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        let candidate = d.join("Cargo.lock");
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = d.parent();
    }
    None
}

/// Resolves one config key to (name, version) pairs.
pub fn echo_version(
    key: &str,
    index: &PackageIndex,
    registry: &mut ModuleRegistry,
) -> Vec<(String, String)> {
    if glob::is_pattern(key) {
        index.matching(key)
    } else {
        vec![(key.to_string(), version_of(key, index, registry))]
    }
}

/// Index first, then the module probe, then the sentinels.
fn version_of(name: &str, index: &PackageIndex, registry: &mut ModuleRegistry) -> String {
    if let Some(version) = index.version_of(name) {
        return version.to_string();
    }
    let module = match registry.load(name) {
        Ok(module) => module.clone(),
        Err(_) => return UNABLE_LOAD.to_string(),
    };
    for attr_name in VERSION_ATTRS {
        if let Some(attr) = module.attr(attr_name) {
            return match attr {
                Value::Callable(c) => (c.call)().to_string(),
                literal => literal.to_string(),
            };
        }
    }
    UNABLE_VERSION.to_string()
}
