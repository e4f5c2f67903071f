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

//! Helper functions for SSH configuration parsing

use crate::ssh_config::error::{ConfigError, Result};

/// Parse yes/no boolean values from SSH configuration
pub fn parse_yes_no(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_lowercase(),
            value: value.to_string(),
            expected: "yes/no",
        }),
    }
}

/// Cut a line at the first comment marker
///
/// A '#' opens a comment only outside double quotes and at the start of a word,
/// so values such as `ProxyCommand nc host#1` keep their '#'.
pub(super) fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    let mut word_start = true;

    for (idx, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes && word_start => return &line[..idx],
            _ => {}
        }
        word_start = c.is_whitespace();
    }

    line
}

/// Split a trimmed line into its lowercase keyword and raw value
///
/// Accepts `Key value`, `Key=value` and `Key = value`. Only the first '=' acts
/// as a separator; any later '=' belongs to the value.
pub(super) fn split_directive(line: &str, line_number: usize) -> Result<(String, &str)> {
    let key_end = line
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or(line.len());
    let keyword = &line[..key_end];
    if keyword.is_empty() {
        return Err(ConfigError::malformed_directive(
            line_number,
            "missing directive name",
        ));
    }

    let rest = line[key_end..].trim_start();
    let value = rest.strip_prefix('=').unwrap_or(rest).trim();
    if value.is_empty() {
        return Err(ConfigError::malformed_directive(
            line_number,
            format!("{keyword} requires a value"),
        ));
    }

    Ok((keyword.to_lowercase(), value))
}

/// Validate quoting in a directive value and drop one enclosing pair of quotes
pub(super) fn unquote_value(value: &str, line_number: usize) -> Result<String> {
    let quotes = value.matches('"').count();
    if quotes % 2 != 0 {
        return Err(ConfigError::malformed_directive(
            line_number,
            format!("unterminated quoted value '{value}'"),
        ));
    }

    if quotes == 2 && value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return Ok(value[1..value.len() - 1].to_string());
    }

    Ok(value.to_string())
}
