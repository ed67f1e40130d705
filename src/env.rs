//! Environment-variable lookup for the report header.

use crate::glob;

/// Substitute value for an absent environment variable.
pub const NOT_SET: &str = "<not set>";

/// Resolves one config key to (name, value) pairs from the live environment.
///
/// A glob key returns every matching variable; a literal key returns exactly
/// one pair, with [`NOT_SET`] standing in for an absent variable. This lookup
/// never fails.
pub fn echo_env(key: &str) -> Vec<(String, String)> {
    if glob::is_pattern(key) {
        std::env::vars()
            .filter(|(name, _)| glob::matches(key, name))
            .collect()
    } else {
        let value = std::env::var(key).unwrap_or_else(|_| NOT_SET.to_string());
        vec![(key.to_string(), value)]
    }
}
