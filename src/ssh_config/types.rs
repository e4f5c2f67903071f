// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Core data structures for SSH configuration

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use super::error::{ConfigError, Result};
use super::parser::parse_yes_no;
use super::pattern::matches_pattern;
use super::policy::{merge_strategy, MergeStrategy};

/// Default SSH port, used when no `Port` directive applies
pub const DEFAULT_SSH_PORT: u16 = 22;

/// A single host pattern token from a `Host` line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostPattern {
    /// Pattern text with any `!` prefix and quoting removed
    pub pattern: String,
    /// Whether the pattern was prefixed with `!`
    pub negated: bool,
}

impl HostPattern {
    pub fn new(pattern: impl Into<String>, negated: bool) -> Self {
        Self {
            pattern: pattern.into(),
            negated,
        }
    }

    /// Check the pattern text against a hostname, ignoring negation
    pub fn matches(&self, hostname: &str) -> bool {
        matches_pattern(hostname, &self.pattern)
    }
}

impl fmt::Display for HostPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        let needs_quotes = self.pattern.is_empty()
            || self.pattern.starts_with(['#', '!'])
            || self.pattern.contains(char::is_whitespace);
        if needs_quotes {
            write!(f, "\"{}\"", self.pattern)
        } else {
            f.write_str(&self.pattern)
        }
    }
}

/// Value of a directive: a single string or an accumulated list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveValue {
    Scalar(String),
    List(Vec<String>),
}

impl DirectiveValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            DirectiveValue::Scalar(value) => Some(value),
            DirectiveValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            DirectiveValue::Scalar(_) => None,
            DirectiveValue::List(values) => Some(values),
        }
    }
}

impl fmt::Display for DirectiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveValue::Scalar(value) => f.write_str(value),
            DirectiveValue::List(values) => f.write_str(&values.join(" ")),
        }
    }
}

impl From<&str> for DirectiveValue {
    fn from(value: &str) -> Self {
        DirectiveValue::Scalar(value.to_string())
    }
}

impl From<String> for DirectiveValue {
    fn from(value: String) -> Self {
        DirectiveValue::Scalar(value)
    }
}

impl From<Vec<String>> for DirectiveValue {
    fn from(values: Vec<String>) -> Self {
        DirectiveValue::List(values)
    }
}

/// One `Host` stanza: its patterns and the directives written under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBlock {
    pub patterns: Vec<HostPattern>,
    pub directives: BTreeMap<String, DirectiveValue>,
    implicit: bool,
}

impl HostBlock {
    /// Create an explicit block for the given `Host` patterns
    pub fn new(patterns: Vec<HostPattern>) -> Self {
        Self {
            patterns,
            directives: BTreeMap::new(),
            implicit: false,
        }
    }

    /// The block holding directives that appear before the first `Host` line
    pub fn implicit() -> Self {
        Self {
            patterns: vec![HostPattern::new("*", false)],
            directives: BTreeMap::new(),
            implicit: true,
        }
    }

    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Get a directive value (case-insensitive)
    pub fn get(&self, directive: &str) -> Option<&DirectiveValue> {
        self.directives.get(&directive.to_lowercase())
    }

    /// Record a directive, honoring the merge policy within the block
    ///
    /// Accumulating directives append; for all others the first value in the
    /// block is kept, mirroring how OpenSSH reads a single stanza.
    pub fn insert(&mut self, directive: &str, value: impl Into<String>) {
        let key = directive.to_lowercase();
        let value = value.into();
        match merge_strategy(&key) {
            MergeStrategy::Append => match self.directives.get_mut(&key) {
                Some(DirectiveValue::List(values)) => values.push(value),
                _ => {
                    self.directives.insert(key, DirectiveValue::List(vec![value]));
                }
            },
            MergeStrategy::FirstWins => {
                self.directives
                    .entry(key)
                    .or_insert(DirectiveValue::Scalar(value));
            }
        }
    }
}

impl fmt::Display for HostBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = if self.implicit {
            ""
        } else {
            let patterns: Vec<String> = self.patterns.iter().map(|p| p.to_string()).collect();
            writeln!(f, "Host {}", patterns.join(" "))?;
            "    "
        };
        for (key, value) in &self.directives {
            match value {
                DirectiveValue::Scalar(value) => write_directive(f, indent, key, value)?,
                DirectiveValue::List(values) => {
                    for value in values {
                        write_directive(f, indent, key, value)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Write one `key value` line, quoting values that would not survive re-parsing
fn write_directive(f: &mut fmt::Formatter<'_>, indent: &str, key: &str, value: &str) -> fmt::Result {
    let needs_quotes =
        !value.contains('"') && (value.contains('#') || value.trim() != value);
    if needs_quotes {
        writeln!(f, "{indent}{key} \"{value}\"")
    } else {
        writeln!(f, "{indent}{key} {value}")
    }
}

/// Effective configuration for a single host, produced by a lookup
///
/// Keys are lowercase directive names. A lookup always populates `hostname`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SshHostConfig {
    options: BTreeMap<String, DirectiveValue>,
}

impl SshHostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a directive value (case-insensitive)
    pub fn get(&self, directive: &str) -> Option<&DirectiveValue> {
        self.options.get(&directive.to_lowercase())
    }

    /// Get a scalar directive value
    pub fn get_str(&self, directive: &str) -> Option<&str> {
        self.get(directive).and_then(DirectiveValue::as_scalar)
    }

    /// Get a list directive value
    pub fn get_list(&self, directive: &str) -> Option<&[String]> {
        self.get(directive).and_then(DirectiveValue::as_list)
    }

    pub fn contains_key(&self, directive: &str) -> bool {
        self.options.contains_key(&directive.to_lowercase())
    }

    /// The effective hostname to connect to
    pub fn hostname(&self) -> &str {
        self.get_str("hostname").unwrap_or_default()
    }

    pub fn user(&self) -> Option<&str> {
        self.get_str("user")
    }

    pub fn proxy_command(&self) -> Option<&str> {
        self.get_str("proxycommand")
    }

    pub fn proxy_jump(&self) -> Option<&str> {
        self.get_str("proxyjump")
    }

    /// Identity files in match order (empty when none apply)
    pub fn identity_files(&self) -> &[String] {
        self.get_list("identityfile").unwrap_or_default()
    }

    /// The effective port, defaulting to 22 when unset
    pub fn port(&self) -> Result<u16> {
        match self.get_str("port") {
            None => Ok(DEFAULT_SSH_PORT),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "port".to_string(),
                    value: value.to_string(),
                    expected: "a port number",
                }),
        }
    }

    /// Interpret a directive as a yes/no flag
    pub fn as_bool(&self, directive: &str) -> Result<bool> {
        let value = self.require_scalar(directive)?;
        parse_yes_no(directive, value)
    }

    /// Interpret a directive as an integer
    pub fn as_int(&self, directive: &str) -> Result<i64> {
        let value = self.require_scalar(directive)?;
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: directive.to_lowercase(),
                value: value.to_string(),
                expected: "an integer",
            })
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, DirectiveValue> {
        self.options.iter()
    }

    pub fn insert(&mut self, directive: &str, value: impl Into<DirectiveValue>) {
        self.options.insert(directive.to_lowercase(), value.into());
    }

    pub fn remove(&mut self, directive: &str) -> Option<DirectiveValue> {
        self.options.remove(&directive.to_lowercase())
    }

    pub(crate) fn options_mut(&mut self) -> &mut BTreeMap<String, DirectiveValue> {
        &mut self.options
    }

    fn require_scalar(&self, directive: &str) -> Result<&str> {
        match self.get(directive) {
            Some(DirectiveValue::Scalar(value)) => Ok(value),
            Some(DirectiveValue::List(values)) => Err(ConfigError::InvalidValue {
                key: directive.to_lowercase(),
                value: values.join(" "),
                expected: "a single value",
            }),
            None => Err(ConfigError::MissingDirective {
                key: directive.to_lowercase(),
            }),
        }
    }
}

impl<'a> IntoIterator for &'a SshHostConfig {
    type Item = (&'a String, &'a DirectiveValue);
    type IntoIter = btree_map::Iter<'a, String, DirectiveValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

impl fmt::Display for SshHostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.options {
            match value {
                DirectiveValue::Scalar(value) => writeln!(f, "{key} {value}")?,
                DirectiveValue::List(values) => {
                    for value in values {
                        writeln!(f, "{key} {value}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(entries: &[(&str, &str)]) -> SshHostConfig {
        let mut config = SshHostConfig::new();
        for (key, value) in entries {
            config.insert(key, *value);
        }
        config
    }

    #[test]
    fn test_block_insert_respects_policy() {
        let mut block = HostBlock::new(vec![HostPattern::new("example.com", false)]);
        block.insert("User", "first");
        block.insert("user", "second");
        block.insert("IdentityFile", "id_a");
        block.insert("identityfile", "id_b");

        assert_eq!(block.get("USER"), Some(&DirectiveValue::from("first")));
        assert_eq!(
            block.get("identityfile"),
            Some(&DirectiveValue::List(vec![
                "id_a".to_string(),
                "id_b".to_string()
            ]))
        );
    }

    #[test]
    fn test_block_display() {
        let mut block = HostBlock::new(vec![
            HostPattern::new("p a r", false),
            HostPattern::new("www13.*", true),
        ]);
        block.insert("Port", "22");
        block.insert("IdentityFile", "a");
        block.insert("IdentityFile", "b");
        assert_eq!(
            block.to_string(),
            "Host \"p a r\" !www13.*\n    identityfile a\n    identityfile b\n    port 22\n"
        );

        let hashed = HostBlock::new(vec![HostPattern::new("#foo", false)]);
        assert!(hashed.to_string().starts_with("Host \"#foo\"\n"));

        let mut implicit = HostBlock::implicit();
        implicit.insert("User", "foo");
        assert_eq!(implicit.to_string(), "user foo\n");

        let mut quoted = HostBlock::implicit();
        quoted.insert("IdentityFile", "key # not a comment");
        assert_eq!(quoted.to_string(), "identityfile \"key # not a comment\"\n");
    }

    #[test]
    fn test_as_bool() {
        for value in ["yes", "YES", "Yes", "true", "1"] {
            assert!(config_with(&[("key", value)]).as_bool("key").unwrap());
        }
        for value in ["no", "NO", "No", "false", "0"] {
            assert!(!config_with(&[("key", value)]).as_bool("key").unwrap());
        }
        assert!(matches!(
            config_with(&[("key", "maybe")]).as_bool("key"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_as_int() {
        let config = config_with(&[("port", "42"), ("bogus", "not an int")]);
        assert_eq!(config.as_int("port").unwrap(), 42);
        assert_eq!(config.as_int("Port").unwrap(), 42);
        assert!(matches!(
            config.as_int("bogus"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(
            config.as_int("missing"),
            Err(ConfigError::MissingDirective {
                key: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_port_defaults_to_22() {
        assert_eq!(SshHostConfig::new().port().unwrap(), 22);
        assert_eq!(config_with(&[("port", "2222")]).port().unwrap(), 2222);
        assert!(config_with(&[("port", "ssh")]).port().is_err());
    }

    #[test]
    fn test_list_accessors() {
        let mut config = SshHostConfig::new();
        assert!(config.identity_files().is_empty());
        config.insert("identityfile", vec!["a".to_string(), "b".to_string()]);
        assert_eq!(config.identity_files(), ["a", "b"]);
        assert_eq!(config.get_str("identityfile"), None);
        assert!(config.as_int("identityfile").is_err());
    }
}
