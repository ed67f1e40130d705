//! Dotted-path resolution over the `Value` graph.
//!
//! Resolution walks a cursor left to right over the path segments,
//! dispatching on the current value's capability at each step: named
//! attributes first, then positional indexing for ordered and frozen
//! unordered sequences, then keyed mapping lookup. The first segment that
//! cannot be applied stops the walk.
//!
//! Outcomes are a small discriminated type rather than sentinel strings so
//! that "not found", "found", and "faulted during access" stay
//! distinguishable from a legitimately string-valued success. The sentinel
//! text appears only when a `Resolution` is rendered for the header.

use crate::path::AttrPath;
use crate::value::{Capability, Value};

/// Substitute text for attributes that cannot be found.
pub const UNKNOWN_ATTR: &str = "unknown attribute";

/// Outcome of resolving a path or a single segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Value),
    /// The segment names nothing at the current value.
    NotFound,
    /// Access was attempted and failed; carries the failure text.
    Fault(String),
}

impl Resolution {
    /// Renders the outcome the way the header reports it: the pretty form of
    /// the value on success, substitute text otherwise.
    pub fn render(&self) -> String {
        match self {
            Resolution::Found(v) => v.pretty(),
            Resolution::NotFound => UNKNOWN_ATTR.to_string(),
            Resolution::Fault(text) => text.clone(),
        }
    }
}

/// Resolves a dotted path against a root value.
///
/// The walk is iterative; depth equals the segment count. Resolution is
/// associative over path splitting: `resolve(v, "a.b.c")` equals resolving
/// `"a"` first and `"b.c"` against the result.
pub fn resolve(root: &Value, path: &AttrPath) -> Resolution {
    let mut current = root.clone();
    for segment in path.segments() {
        match step(&current, segment) {
            Resolution::Found(next) => current = next,
            stopped => return stopped,
        }
    }
    Resolution::Found(current)
}

/// Applies one path segment to one value.
pub fn step(value: &Value, segment: &str) -> Resolution {
    match value.capability() {
        Capability::Attrs => match value.attr(segment) {
            Some(v) => Resolution::Found(v.clone()),
            None => Resolution::NotFound,
        },
        Capability::OrderedIndex | Capability::UnorderedIndex => match value {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                index(items, segment)
            }
            _ => Resolution::NotFound,
        },
        Capability::Keyed => match value {
            Value::Map(map) => match map.get(segment) {
                Some(v) => Resolution::Found(v.clone()),
                None => Resolution::Fault(format!("key not found: '{}'", segment)),
            },
            _ => Resolution::NotFound,
        },
        Capability::Opaque => Resolution::NotFound,
    }
}

fn index(items: &[Value], segment: &str) -> Resolution {
    let i: usize = match segment.parse() {
        Ok(i) => i,
        Err(_) => return Resolution::Fault(format!("invalid index: '{}'", segment)),
    };
    match items.get(i) {
        Some(v) => Resolution::Found(v.clone()),
        None => Resolution::Fault(format!("index out of range: {}", i)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use im::HashMap;

    fn attr_list() -> Value {
        Value::List(vec![
            Value::from(11),
            Value::from(12),
            Value::from(13),
            Value::Tuple(vec![Value::from(21), Value::from(22)]),
        ])
    }

    #[test]
    fn indexes_into_lists_and_nested_tuples() {
        let list = attr_list();
        assert_eq!(
            resolve(&list, &AttrPath::parse("2")),
            Resolution::Found(Value::from(13))
        );
        assert_eq!(
            resolve(&list, &AttrPath::parse("3.1")),
            Resolution::Found(Value::from(22))
        );
    }

    #[test]
    fn sets_index_in_insertion_order() {
        let set = Value::Set(vec![Value::from("a"), Value::from("b")]);
        assert_eq!(
            resolve(&set, &AttrPath::parse("1")),
            Resolution::Found(Value::from("b"))
        );
    }

    #[test]
    fn out_of_range_index_is_a_fault() {
        assert_eq!(
            resolve(&attr_list(), &AttrPath::parse("9")),
            Resolution::Fault("index out of range: 9".to_string())
        );
    }

    #[test]
    fn malformed_index_is_a_fault() {
        assert_eq!(
            resolve(&attr_list(), &AttrPath::parse("first")),
            Resolution::Fault("invalid index: 'first'".to_string())
        );
    }

    #[test]
    fn missing_map_key_is_a_fault() {
        let mut map = HashMap::new();
        map.insert("key".to_string(), Value::from(11));
        assert_eq!(
            resolve(&Value::Map(map), &AttrPath::parse("other")),
            Resolution::Fault("key not found: 'other'".to_string())
        );
    }

    #[test]
    fn missing_record_attribute_is_not_found() {
        let record = Value::Record(HashMap::new());
        assert_eq!(resolve(&record, &AttrPath::parse("gone")), Resolution::NotFound);
        assert_eq!(resolve(&record, &AttrPath::parse("gone")).render(), UNKNOWN_ATTR);
    }

    #[test]
    fn opaque_values_stop_the_walk() {
        // once the cursor hits a scalar, remaining segments are not processed
        assert_eq!(
            resolve(&Value::from(42), &AttrPath::parse("anything.else")),
            Resolution::NotFound
        );
    }

    #[test]
    fn resolution_is_associative_over_path_splitting() {
        let mut inner = HashMap::new();
        inner.insert("c".to_string(), Value::from(4));
        let mut outer = HashMap::new();
        outer.insert("b".to_string(), Value::Map(inner));
        let mut root = HashMap::new();
        root.insert("a".to_string(), Value::Map(outer));
        let root = Value::Map(root);

        let direct = resolve(&root, &AttrPath::parse("a.b.c"));
        let first = match resolve(&root, &AttrPath::parse("a")) {
            Resolution::Found(v) => v,
            other => panic!("unexpected: {:?}", other),
        };
        let split = resolve(&first, &AttrPath::parse("b.c"));
        assert_eq!(direct, split);
        assert_eq!(direct, Resolution::Found(Value::from(4)));
    }
}
