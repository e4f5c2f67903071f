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

//! Pattern matching utilities for SSH configuration
//!
//! This module provides wildcard pattern matching for SSH host patterns,
//! supporting '*' and '?', and the block-level evaluation of negated patterns.

use super::types::HostPattern;

/// Check if a block's pattern list selects the hostname
///
/// Any matching negated pattern rejects the block outright. Otherwise at least one
/// positive pattern has to match; a list made only of negated patterns matches
/// every hostname none of them exclude.
pub(super) fn matches_host_patterns(hostname: &str, patterns: &[HostPattern]) -> bool {
    let mut has_positive = false;
    let mut matched = false;

    for pattern in patterns {
        if pattern.negated {
            if pattern.matches(hostname) {
                return false;
            }
        } else {
            has_positive = true;
            if !matched && pattern.matches(hostname) {
                matched = true;
            }
        }
    }

    matched || !has_positive
}

/// Check if a hostname matches a single pattern (supports wildcards)
pub fn matches_pattern(hostname: &str, pattern: &str) -> bool {
    if pattern.contains('*') || pattern.contains('?') {
        wildcard_match(hostname, pattern)
    } else {
        // Exact match (case insensitive)
        hostname.eq_ignore_ascii_case(pattern)
    }
}

/// Glob matching where '*' spans any run of characters and '?' exactly one
///
/// Backtracks only to the most recent '*', which keeps the match linear in
/// memory and avoids exponential blowup on patterns like `*a*a*a*b`.
pub(super) fn wildcard_match(text: &str, pattern: &str) -> bool {
    let text_chars: Vec<char> = text.chars().collect();
    let pattern_chars: Vec<char> = pattern.chars().collect();

    let mut text_idx = 0;
    let mut pattern_idx = 0;
    // Position of the last '*' seen and the text index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while text_idx < text_chars.len() {
        match pattern_chars.get(pattern_idx) {
            Some('*') => {
                backtrack = Some((pattern_idx, text_idx));
                pattern_idx += 1;
            }
            Some('?') => {
                text_idx += 1;
                pattern_idx += 1;
            }
            Some(c) if c.eq_ignore_ascii_case(&text_chars[text_idx]) => {
                text_idx += 1;
                pattern_idx += 1;
            }
            _ => match backtrack {
                Some((star_idx, star_text_idx)) => {
                    // Let the star swallow one more character and retry
                    backtrack = Some((star_idx, star_text_idx + 1));
                    pattern_idx = star_idx + 1;
                    text_idx = star_text_idx + 1;
                }
                None => return false,
            },
        }
    }

    pattern_chars[pattern_idx..].iter().all(|&c| c == '*')
}
