//! Shell-style glob matching for config keys.
//!
//! Config keys are either literal names or glob patterns; glob-ness is
//! detected structurally (a `*` anywhere in the key), never stored. Matching
//! supports `*` (any sequence), `?` (any single character), and bracket
//! classes including `[!...]` negation, compiled down to anchored regexes.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;

// One pattern is typically matched against every environment variable or
// every index entry, so compiled patterns are memoized for the process.
static COMPILED: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Returns true if the key should be treated as a glob pattern.
pub fn is_pattern(key: &str) -> bool {
    key.contains('*')
}

/// Matches a name against a shell-style pattern.
pub fn matches(pattern: &str, name: &str) -> bool {
    let mut cache = COMPILED.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(re) = cache.get(pattern) {
        return re.is_match(name);
    }
    match Regex::new(&translate(pattern)) {
        Ok(re) => {
            let hit = re.is_match(name);
            cache.insert(pattern.to_string(), re);
            hit
        }
        // A malformed bracket class falls back to literal comparison.
        Err(_) => pattern == name,
    }
}

/// Translates a shell-style pattern into an anchored regex.
fn translate(pattern: &str) -> String {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            '[' => {
                let mut raw = String::new();
                let mut closed = false;
                for c2 in chars.by_ref() {
                    if c2 == ']' && !raw.is_empty() {
                        closed = true;
                        break;
                    }
                    raw.push(c2);
                }
                if closed {
                    re.push('[');
                    if let Some(rest) = raw.strip_prefix('!') {
                        re.push('^');
                        re.push_str(rest);
                    } else {
                        re.push_str(&raw);
                    }
                    re.push(']');
                } else {
                    // unclosed class matches itself literally
                    re.push_str(&regex::escape("["));
                    re.push_str(&regex::escape(&raw));
                }
            }
            _ => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    re
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_any_sequence() {
        assert!(matches("ECHOVAR*", "ECHOVAR-a"));
        assert!(matches("ECHOVAR*", "ECHOVAR"));
        assert!(!matches("ECHOVAR*", "OTHER"));
    }

    #[test]
    fn question_mark_matches_one_character() {
        assert!(matches("VAR?", "VAR1"));
        assert!(!matches("VAR?", "VAR12"));
        assert!(!matches("VAR?", "VAR"));
    }

    #[test]
    fn bracket_classes_and_negation() {
        assert!(matches("VAR[12]", "VAR1"));
        assert!(!matches("VAR[12]", "VAR3"));
        assert!(matches("VAR[!12]", "VAR3"));
        assert!(!matches("VAR[!12]", "VAR1"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(matches("a.b*", "a.bc"));
        assert!(!matches("a.b*", "aXbc"));
    }

    #[test]
    fn literal_keys_are_not_patterns() {
        assert!(!is_pattern("HOME"));
        assert!(is_pattern("HOME*"));
    }
}
