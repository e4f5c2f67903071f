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

//! Error types for SSH configuration parsing and lookup

use thiserror::Error;

/// Errors that can occur while parsing or resolving an SSH configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Unbalanced quoting or an empty pattern in a `Host` argument
    #[error("malformed host pattern list '{value}': {reason}")]
    MalformedHostPattern { value: String, reason: String },

    /// Directive line that cannot be split into a keyword and a value
    #[error("malformed directive at line {line}: {reason}")]
    MalformedDirective { line: usize, reason: String },

    /// No `CanonicalDomains` entry resolved and local fallback is disabled
    #[error("could not canonicalize hostname '{hostname}' using domains [{}]", .domains.join(", "))]
    CanonicalizationFailed {
        hostname: String,
        domains: Vec<String>,
    },

    /// A coercion was requested for a directive the lookup did not produce
    #[error("directive '{key}' is not set")]
    MissingDirective { key: String },

    /// A directive value could not be coerced to the requested type
    #[error("invalid value '{value}' for '{key}' (expected {expected})")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn malformed_directive(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedDirective {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_host_pattern(value: &str, reason: impl Into<String>) -> Self {
        Self::MalformedHostPattern {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for SSH configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::malformed_host_pattern("param \"pam", "unterminated quote");
        assert_eq!(
            err.to_string(),
            "malformed host pattern list 'param \"pam': unterminated quote"
        );

        let err = ConfigError::malformed_directive(7, "User requires a value");
        assert_eq!(
            err.to_string(),
            "malformed directive at line 7: User requires a value"
        );

        let err = ConfigError::CanonicalizationFailed {
            hostname: "www".to_string(),
            domains: vec!["example.com".to_string(), "example.org".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "could not canonicalize hostname 'www' using domains [example.com, example.org]"
        );
    }
}
