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

//! Core SSH configuration parsing functionality
//!
//! Turns configuration lines into an ordered list of [`HostBlock`]s. Directives
//! that precede the first `Host` line land in an implicit `Host *` block at
//! index 0, so lookup never needs to special-case global options.

use crate::ssh_config::error::{ConfigError, Result};
use crate::ssh_config::types::HostBlock;

use super::helpers::{split_directive, strip_comment, unquote_value};
use super::host_list::parse_host_list;

// Security: maximum accepted length of a single configuration line
const MAX_LINE_LENGTH: usize = 8192;

/// Parse SSH configuration lines into host blocks, in file order
pub fn parse<I, S>(lines: I) -> Result<Vec<HostBlock>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut blocks = Vec::new();
    let mut current = HostBlock::implicit();
    let mut in_match_block = false;

    for (index, raw_line) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        let raw_line = raw_line.as_ref();

        if raw_line.len() > MAX_LINE_LENGTH {
            return Err(ConfigError::malformed_directive(
                line_number,
                format!("line exceeds maximum length of {MAX_LINE_LENGTH} bytes"),
            ));
        }

        // trim() also drops the '\r' of CRLF line endings
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let (keyword, value) = split_directive(line, line_number)?;

        match keyword.as_str() {
            "host" => {
                let patterns = parse_host_list(value)?;
                let finished = std::mem::replace(&mut current, HostBlock::new(patterns));
                close_block(&mut blocks, finished);
                in_match_block = false;
            }
            "match" => {
                tracing::warn!(
                    "Match block at line {} is not supported; ignoring its directives",
                    line_number
                );
                in_match_block = true;
            }
            "include" => {
                tracing::debug!("Skipping Include directive at line {}", line_number);
            }
            _ if in_match_block => {
                tracing::debug!(
                    "Ignoring '{}' inside unsupported Match block at line {}",
                    keyword,
                    line_number
                );
            }
            _ => {
                let value = unquote_value(value, line_number)?;
                current.insert(&keyword, value);
            }
        }
    }

    close_block(&mut blocks, current);

    Ok(blocks)
}

/// Keep a finished block unless it is an explicit block without directives
fn close_block(blocks: &mut Vec<HostBlock>, block: HostBlock) {
    if block.is_implicit() || !block.is_empty() {
        blocks.push(block);
    } else {
        let patterns: Vec<String> = block.patterns.iter().map(|p| p.to_string()).collect();
        tracing::debug!("Dropping empty Host block '{}'", patterns.join(" "));
    }
}
