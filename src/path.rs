//! A canonical, type-safe representation of a dotted attribute path.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrPath(pub Vec<String>);

impl AttrPath {
    /// Splits a raw config key on `.` into ordered segments.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
