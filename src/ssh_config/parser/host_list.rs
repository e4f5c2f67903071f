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

//! Parser for the argument of a `Host` directive
//!
//! Splits the argument into patterns on unquoted whitespace. Double quotes
//! group whitespace into a single pattern and a leading '!' negates a pattern.

use crate::ssh_config::error::{ConfigError, Result};
use crate::ssh_config::types::HostPattern;

/// Parse a `Host` argument into an ordered list of patterns
///
/// # Examples
///
/// ```rust
/// use sshcfg::ssh_config::parse_host_list;
///
/// let patterns = parse_host_list(r#"param "p a r" !www13.*"#).unwrap();
/// assert_eq!(patterns.len(), 3);
/// assert_eq!(patterns[1].pattern, "p a r");
/// assert!(patterns[2].negated);
/// ```
pub fn parse_host_list(raw: &str) -> Result<Vec<HostPattern>> {
    let mut patterns = Vec::new();
    let mut current = String::new();
    let mut negated = false;
    let mut in_token = false;
    let mut in_quotes = false;

    for c in raw.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            '!' if !in_token => {
                negated = true;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    patterns.push(finish_pattern(raw, &mut current, &mut negated)?);
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(ConfigError::malformed_host_pattern(
            raw,
            "unterminated quote",
        ));
    }
    if in_token {
        patterns.push(finish_pattern(raw, &mut current, &mut negated)?);
    }
    if patterns.is_empty() {
        return Err(ConfigError::malformed_host_pattern(
            raw,
            "at least one pattern is required",
        ));
    }

    Ok(patterns)
}

fn finish_pattern(raw: &str, current: &mut String, negated: &mut bool) -> Result<HostPattern> {
    let pattern = std::mem::take(current);
    let negated = std::mem::take(negated);
    if negated && pattern.is_empty() {
        return Err(ConfigError::malformed_host_pattern(
            raw,
            "'!' must be followed by a pattern",
        ));
    }
    Ok(HostPattern::new(pattern, negated))
}
