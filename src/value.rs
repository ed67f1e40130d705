use im::HashMap;
use std::fmt;

/// A value in the inspected object graph.
///
/// Modules, their attributes, and anything reachable from them are `Value`s.
/// The variants map onto the four access capabilities the resolver dispatches
/// over: records carry named attributes, lists and tuples are ordered
/// indexables, sets are unordered indexables frozen into insertion order, and
/// maps are keyed mappings. Everything else is opaque to path resolution.
///
/// # Examples
///
/// ```rust
/// use echotest::value::Value;
/// let n = Value::Number(3.14);
/// assert_eq!(n.type_name(), "Number");
/// let s = Value::String("hello".to_string());
/// assert_eq!(s.pretty(), "'hello'");
/// let nil = Value::default();
/// assert!(nil.is_nil());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Number(f64),
    String(String),
    Bool(bool),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Insertion-ordered; positional indexing uses that stable order.
    Set(Vec<Value>),
    Map(HashMap<String, Value>),
    /// Named-attribute-bearing. Modules are records.
    Record(HashMap<String, Value>),
    Callable(Callable),
}

/// A zero-argument native function exposed as an attribute, e.g. a module's
/// `get_version` probe target.
#[derive(Clone, Copy)]
pub struct Callable {
    pub name: &'static str,
    pub call: fn() -> Value,
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.name)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && std::ptr::eq(self.call as *const (), other.call as *const ())
    }
}

/// The closed set of access capabilities path resolution dispatches over,
/// checked in this priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Attrs,
    OrderedIndex,
    UnorderedIndex,
    Keyed,
    Opaque,
}

impl Value {
    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Bool(_) => "Bool",
            Value::List(_) => "List",
            Value::Tuple(_) => "Tuple",
            Value::Set(_) => "Set",
            Value::Map(_) => "Map",
            Value::Record(_) => "Record",
            Value::Callable(_) => "Callable",
        }
    }

    /// Returns true if the value is Nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Classifies this value into the capability category the resolver
    /// dispatches over.
    pub fn capability(&self) -> Capability {
        match self {
            Value::Record(_) => Capability::Attrs,
            Value::List(_) | Value::Tuple(_) => Capability::OrderedIndex,
            Value::Set(_) => Capability::UnorderedIndex,
            Value::Map(_) => Capability::Keyed,
            _ => Capability::Opaque,
        }
    }

    /// Returns the named attribute if this value carries attributes.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Renders this value the way the Inspections section reports it:
    /// strings quoted, containers in literal notation, callables by name.
    ///
    /// Map and record entries are emitted in sorted key order so the
    /// rendering is deterministic.
    pub fn pretty(&self) -> String {
        match self {
            Value::String(s) => format!("'{}'", s),
            Value::List(items) => Self::pretty_seq(items, "[", "]"),
            Value::Tuple(items) => Self::pretty_seq(items, "(", ")"),
            Value::Set(items) => Self::pretty_seq(items, "{", "}"),
            Value::Map(map) | Value::Record(map) => Self::pretty_map(map),
            other => other.to_string(),
        }
    }

    fn pretty_seq(items: &[Value], open: &str, close: &str) -> String {
        let body: Vec<String> = items.iter().map(Value::pretty).collect();
        format!("{}{}{}", open, body.join(", "), close)
    }

    fn pretty_map(map: &HashMap<String, Value>) -> String {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        let body: Vec<String> = keys
            .iter()
            .map(|k| format!("'{}': {}", k, map[*k].pretty()))
            .collect();
        format!("{{{}}}", body.join(", "))
    }

    // ------------------------------------------------------------------------
    // Display formatting helpers
    // ------------------------------------------------------------------------

    fn fmt_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
        write!(f, "(")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, ")")
    }

    fn fmt_map(f: &mut fmt::Formatter<'_>, map: &HashMap<String, Value>) -> fmt::Result {
        write!(f, "{{")?;
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        for (i, k) in keys.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, map[*k])?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                Value::fmt_seq(f, items)
            }
            Value::Map(map) | Value::Record(map) => Value::fmt_map(f, map),
            Value::Callable(c) => write!(f, "<function {}>", c.name),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Value::Number(13.0).pretty(), "13");
        assert_eq!(Value::Number(3.5).pretty(), "3.5");
    }

    #[test]
    fn strings_are_quoted_by_pretty_but_not_display() {
        let v = Value::from("value");
        assert_eq!(v.pretty(), "'value'");
        assert_eq!(v.to_string(), "value");
    }

    #[test]
    fn tuples_and_lists_keep_their_notation() {
        let v = Value::List(vec![
            Value::from(11),
            Value::Tuple(vec![Value::from(21), Value::from(22)]),
        ]);
        assert_eq!(v.pretty(), "[11, (21, 22)]");
    }

    #[test]
    fn map_pretty_is_sorted_and_deterministic() {
        let mut fields = HashMap::new();
        fields.insert("b".to_string(), Value::from(2));
        fields.insert("a".to_string(), Value::from(1));
        assert_eq!(Value::Map(fields).pretty(), "{'a': 1, 'b': 2}");
    }

    #[test]
    fn capabilities_follow_priority_categories() {
        assert_eq!(Value::Record(HashMap::new()).capability(), Capability::Attrs);
        assert_eq!(Value::List(vec![]).capability(), Capability::OrderedIndex);
        assert_eq!(Value::Set(vec![]).capability(), Capability::UnorderedIndex);
        assert_eq!(Value::Map(HashMap::new()).capability(), Capability::Keyed);
        assert_eq!(Value::Nil.capability(), Capability::Opaque);
    }
}
