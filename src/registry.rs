//! # Canonical Module Registry
//!
//! Provides the single registry of loadable modules and the canonical builder
//! that populates it with the built-in diagnostic modules. Production and
//! test code share the same registration path so every consumer sees the same
//! module universe.
//!
//! **Warning:** loading a module runs its registered loader, which may
//! execute arbitrary code with uncontrolled side effects. Loading is kept
//! behind a single primitive (`ModuleRegistry::load`) so everything around it
//! stays pure; callers must treat any path resolution that touches the
//! registry as side-effecting.

use std::collections::HashMap;

use im::HashMap as ValueMap;

use crate::errors::EchoError;
use crate::path::AttrPath;
use crate::resolve::{self, UNKNOWN_ATTR};
use crate::value::Value;

/// Builds a module's value graph. Runs at most once per module name; the
/// result is cached for the life of the registry.
pub type ModuleLoader = fn() -> Result<Value, EchoError>;

/// Registry of loadable modules, keyed by dotted module name.
///
/// Nested modules are registered under their full dotted name (`"os"` and
/// `"os.path"` are two entries); the attribute resolver discovers the
/// boundary between module name and attribute path by progressively loading
/// longer prefixes.
#[derive(Default)]
pub struct ModuleRegistry {
    loaders: HashMap<String, ModuleLoader>,
    loaded: HashMap<String, Value>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a loader under a dotted module name. Later registrations
    /// replace earlier ones.
    pub fn register(&mut self, name: &str, loader: ModuleLoader) {
        self.loaders.insert(name.to_string(), loader);
    }

    /// Loads a module by name, running its loader on first use.
    ///
    /// This is the one side-effecting primitive in the resolution path.
    pub fn load(&mut self, name: &str) -> Result<&Value, EchoError> {
        if !self.loaded.contains_key(name) {
            let loader = *self
                .loaders
                .get(name)
                .ok_or_else(|| EchoError::ModuleNotFound {
                    name: name.to_string(),
                })?;
            let module = loader().map_err(|e| EchoError::ModuleLoad {
                name: name.to_string(),
                message: e.to_string(),
            })?;
            self.loaded.insert(name.to_string(), module);
        }
        Ok(&self.loaded[name])
    }

    /// Resolves a full inspection path: module-name prefix, then attribute
    /// path. Always returns display text.
    ///
    /// Segments are consumed left to right, loading ever-longer dotted
    /// prefixes as module names. The first segment that is not a loadable
    /// module starts the attribute path: if the last loaded module carries it
    /// as an attribute, the remaining suffix is resolved against that module
    /// and pretty-printed. A path that is loadable end to end names a module
    /// rather than an attribute and reports `unknown attribute`, as does a
    /// path whose first segment loads nothing.
    pub fn resolve_attribute(&mut self, raw: &str) -> String {
        let segments = AttrPath::parse(raw).0;
        let mut parent: Option<String> = None;
        for (i, segment) in segments.iter().enumerate() {
            let module_name = match &parent {
                Some(p) => format!("{}.{}", p, segment),
                None => segment.clone(),
            };
            match self.load(&module_name).err() {
                None => {
                    parent = Some(module_name);
                }
                Some(EchoError::ModuleNotFound { .. }) => {
                    if let Some(name) = &parent {
                        let module = self.loaded[name].clone();
                        if module.attr(segment).is_some() {
                            let rest = AttrPath(segments[i..].to_vec());
                            return resolve::resolve(&module, &rest).render();
                        }
                    }
                }
                // a loader ran and failed; report its text in place
                Some(e) => return e.to_string(),
            }
        }
        UNKNOWN_ATTR.to_string()
    }
}

/// Builds the registry populated with the built-in diagnostic modules.
///
/// # Example
/// ```
/// use echotest::registry::build_default_registry;
/// let registry = build_default_registry();
/// ```
pub fn build_default_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register("host", load_host);
    registry.register("process", load_process);
    registry.register("build", load_build);
    registry
}

fn load_host() -> Result<Value, EchoError> {
    let mut fields = ValueMap::new();
    fields.insert("os".to_string(), Value::from(std::env::consts::OS));
    fields.insert("arch".to_string(), Value::from(std::env::consts::ARCH));
    fields.insert("family".to_string(), Value::from(std::env::consts::FAMILY));
    Ok(Value::Record(fields))
}

fn load_process() -> Result<Value, EchoError> {
    let mut fields = ValueMap::new();
    fields.insert("pid".to_string(), Value::from(std::process::id() as i64));
    let cwd = std::env::current_dir()
        .map(|p| Value::from(p.display().to_string()))
        .unwrap_or(Value::Nil);
    fields.insert("cwd".to_string(), cwd);
    fields.insert(
        "argv".to_string(),
        Value::List(std::env::args().map(Value::from).collect()),
    );
    Ok(Value::Record(fields))
}

fn load_build() -> Result<Value, EchoError> {
    let mut fields = ValueMap::new();
    fields.insert("name".to_string(), Value::from(env!("CARGO_PKG_NAME")));
    fields.insert("version".to_string(), Value::from(env!("CARGO_PKG_VERSION")));
    Ok(Value::Record(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> Result<Value, EchoError> {
        let mut inner = ValueMap::new();
        inner.insert("attr".to_string(), Value::from(1));
        let mut fields = ValueMap::new();
        fields.insert("ATTR_INT".to_string(), Value::from(111));
        fields.insert("dummy".to_string(), Value::Record(inner));
        Ok(Value::Record(fields))
    }

    fn broken() -> Result<Value, EchoError> {
        Err(EchoError::PackageIndex {
            message: "boom".to_string(),
        })
    }

    fn test_registry() -> ModuleRegistry {
        let mut registry = build_default_registry();
        registry.register("fixtures", fixtures);
        registry.register("broken", broken);
        registry
    }

    #[test]
    fn loads_are_cached_per_name() {
        let mut registry = test_registry();
        let first = registry.load("fixtures").unwrap().clone();
        let second = registry.load("fixtures").unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn module_attribute_paths_resolve_through_the_graph() {
        let mut registry = test_registry();
        assert_eq!(registry.resolve_attribute("fixtures.ATTR_INT"), "111");
        assert_eq!(registry.resolve_attribute("fixtures.dummy.attr"), "1");
    }

    #[test]
    fn unknown_module_reports_unknown_attribute() {
        let mut registry = test_registry();
        assert_eq!(registry.resolve_attribute("wrong"), UNKNOWN_ATTR);
        assert_eq!(registry.resolve_attribute("wrong.path"), UNKNOWN_ATTR);
    }

    #[test]
    fn fully_loadable_path_with_no_attribute_reports_unknown_attribute() {
        let mut registry = test_registry();
        assert_eq!(registry.resolve_attribute("fixtures"), UNKNOWN_ATTR);
    }

    #[test]
    fn loader_failures_report_their_text_in_place() {
        let mut registry = test_registry();
        let rendered = registry.resolve_attribute("broken.anything");
        assert!(rendered.contains("failed to load"), "got: {rendered}");
    }

    #[test]
    fn builtin_host_module_exposes_os() {
        let mut registry = build_default_registry();
        let rendered = registry.resolve_attribute("host.os");
        assert_eq!(rendered, format!("'{}'", std::env::consts::OS));
    }
}
