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

//! Token interpolation and tilde expansion for resolved configurations
//!
//! Expansion is a single left-to-right scan: substituted text is never
//! re-scanned, so a `%` produced by `%%` or found inside a hostname stays
//! literal. Each directive only honours the tokens listed in its rule.

use super::context::LocalContext;
use super::types::{DirectiveValue, SshHostConfig, DEFAULT_SSH_PORT};

const CONNECTION_TOKENS: &[char] = &['h', 'p', 'r', 'n', 'l', 'L', 'u', 'd'];

const HOSTNAME_RULE: ExpansionRule = ExpansionRule {
    tokens: &['h'],
    tilde: false,
};

/// Which tokens a directive expands
#[derive(Debug, Clone, Copy)]
struct ExpansionRule {
    tokens: &'static [char],
    tilde: bool,
}

fn expansion_rule(directive: &str) -> Option<ExpansionRule> {
    let rule = match directive {
        "hostname" => HOSTNAME_RULE,
        "proxycommand" | "identityfile" | "certificatefile" | "userknownhostsfile"
        | "controlpath" => ExpansionRule {
            tokens: CONNECTION_TOKENS,
            tilde: true,
        },
        "localcommand" | "remotecommand" => ExpansionRule {
            tokens: CONNECTION_TOKENS,
            tilde: false,
        },
        _ => return None,
    };
    Some(rule)
}

/// `none` disables a command-valued directive
pub(super) fn is_none_value(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("none")
}

/// Expand `%h` (the queried host) in a `HostName` value
pub(super) fn expand_hostname(value: &str, target: &str) -> String {
    let values = TokenValues {
        hostname: target.to_string(),
        original_host: target,
        ..TokenValues::default()
    };
    values.expand(value, HOSTNAME_RULE)
}

/// Apply post-processing to a fully merged configuration
///
/// Removes `ProxyCommand none`, expands `HostName` against the queried host,
/// then expands every other directive that has an expansion rule using the
/// merged values.
pub(super) fn finalize(config: &mut SshHostConfig, target: &str, context: &LocalContext) {
    if config.proxy_command().is_some_and(is_none_value) {
        tracing::debug!("ProxyCommand disabled for '{}'", target);
        config.remove("proxycommand");
    }

    if let Some(hostname) = config.get_str("hostname") {
        let hostname = expand_hostname(hostname, target);
        config.insert("hostname", hostname);
    }

    let values = TokenValues::from_config(config, target, context);

    for (directive, value) in config.options_mut().iter_mut() {
        if directive == "hostname" {
            continue;
        }
        let Some(rule) = expansion_rule(directive) else {
            continue;
        };
        match value {
            DirectiveValue::Scalar(value) => *value = values.expand(value, rule),
            DirectiveValue::List(entries) => {
                for entry in entries.iter_mut() {
                    *entry = values.expand(entry, rule);
                }
            }
        }
    }
}

#[derive(Debug, Default)]
struct TokenValues<'a> {
    hostname: String,
    port: String,
    remote_user: String,
    original_host: &'a str,
    local_hostname: &'a str,
    short_local_hostname: &'a str,
    local_user: &'a str,
    home_dir: Option<String>,
}

impl<'a> TokenValues<'a> {
    fn from_config(config: &SshHostConfig, target: &'a str, context: &'a LocalContext) -> Self {
        Self {
            hostname: config.get_str("hostname").unwrap_or(target).to_string(),
            port: config
                .get_str("port")
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_SSH_PORT.to_string()),
            remote_user: config
                .user()
                .unwrap_or(context.local_user.as_str())
                .to_string(),
            original_host: target,
            local_hostname: &context.local_hostname,
            short_local_hostname: context.short_hostname(),
            local_user: &context.local_user,
            home_dir: context
                .home_dir()
                .map(|home| home.to_string_lossy().into_owned()),
        }
    }

    fn lookup(&self, token: char) -> Option<&str> {
        match token {
            'h' => Some(&self.hostname),
            'p' => Some(&self.port),
            'r' => Some(&self.remote_user),
            'n' => Some(self.original_host),
            'l' => Some(self.local_hostname),
            'L' => Some(self.short_local_hostname),
            'u' => Some(self.local_user),
            'd' => self.home_dir.as_deref(),
            _ => None,
        }
    }

    fn expand(&self, value: &str, rule: ExpansionRule) -> String {
        let mut expanded = String::with_capacity(value.len());
        let mut chars = value.chars().peekable();
        let mut word_start = true;

        while let Some(c) = chars.next() {
            match c {
                '%' => match chars.peek().copied() {
                    Some('%') => {
                        chars.next();
                        expanded.push('%');
                    }
                    Some(token) if rule.tokens.contains(&token) => match self.lookup(token) {
                        Some(replacement) => {
                            chars.next();
                            expanded.push_str(replacement);
                        }
                        None => expanded.push('%'),
                    },
                    _ => expanded.push('%'),
                },
                '~' if rule.tilde && word_start => {
                    let ends_word = chars
                        .peek()
                        .map_or(true, |next| *next == '/' || next.is_whitespace());
                    match (&self.home_dir, ends_word) {
                        (Some(home), true) => expanded.push_str(home),
                        _ => expanded.push('~'),
                    }
                }
                _ => expanded.push(c),
            }
            word_start = c.is_whitespace();
        }

        expanded
    }
}
