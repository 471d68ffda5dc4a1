//! Engine-style command-line flag parsing
//!
//! Build hosts pass options as `-name value` pairs mixed with their own
//! switches (`-batchmode`, `-quit`, ...). Every `-`-prefixed token becomes an
//! entry in the [`OptionMap`]; a following token that is not itself a flag is
//! taken as its value.

use std::collections::HashMap;

use crate::utils::terminal::{print_banner, print_warning};

/// Marker that starts a flag token
pub const FLAG_PREFIX: char = '-';

/// Flags whose values are credentials and must never be echoed
pub const SECRET_FLAGS: &[&str] = &[
    "androidKeystorePass",
    "androidKeyaliasName",
    "androidKeyaliasPass",
];

/// Replaces secret values in log lines
pub const REDACTED: &str = "*HIDDEN*";

/// Flag name to value mapping built from the raw arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionMap {
    values: HashMap<String, String>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a flag value, if the flag was passed
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Get a flag value only when it was passed with a non-empty value
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Insert a flag, returning the previous value if it was already present
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OptionMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Check whether a flag carries a credential
pub fn is_secret(flag: &str) -> bool {
    SECRET_FLAGS.contains(&flag)
}

fn is_flag(token: &str) -> bool {
    token.starts_with(FLAG_PREFIX)
}

/// Extract `(name, value)` pairs in command-line order
///
/// Flags with no following value token get an empty value.
pub fn scan_flags(args: &[String]) -> Vec<(String, String)> {
    let mut flags = Vec::new();

    for (current, token) in args.iter().enumerate() {
        if !is_flag(token) {
            continue;
        }
        let name = token.trim_start_matches(FLAG_PREFIX).to_string();

        let value = args
            .get(current + 1)
            .filter(|next| !is_flag(next))
            .cloned()
            .unwrap_or_default();

        flags.push((name, value));
    }

    flags
}

/// Log line for a parsed flag, with secrets redacted
pub fn flag_log_line(name: &str, value: &str) -> String {
    let display_value = if is_secret(name) {
        REDACTED.to_string()
    } else {
        format!("\"{}\"", value)
    };
    format!("Found flag \"{}\" with value {}.", name, display_value)
}

/// Parse raw arguments into an [`OptionMap`], logging each flag
///
/// A flag passed more than once keeps its last value.
pub fn parse_arguments(args: &[String]) -> OptionMap {
    print_banner("Parsing settings");

    let mut options = OptionMap::new();
    for (name, value) in scan_flags(args) {
        println!("{}", flag_log_line(&name, &value));
        if options.insert(name.clone(), value).is_some() {
            print_warning(&format!(
                "flag \"{}\" given more than once, using the last value",
                name
            ));
        }
    }

    options
}
