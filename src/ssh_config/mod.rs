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

//! SSH configuration parsing and lookup
//!
//! This module parses OpenSSH client configuration files into ordered host
//! blocks and resolves the effective options for a hostname: first match wins
//! for ordinary directives, accumulating directives collect every match, and
//! `%` tokens are expanded once the merge is complete. Lookups can optionally
//! canonicalize short hostnames through DNS.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::io::BufRead;
use std::path::Path;

// Internal modules
mod canonical;
mod context;
mod error;
mod parser;
mod pattern;
mod policy;
mod resolver;
mod tokens;
mod types;


// Re-export public types
pub use canonical::{AddressFamily, CanonicalizeMode, HostResolver, SystemResolver};
pub use context::LocalContext;
pub use error::ConfigError;
pub use parser::{parse, parse_host_list};
pub use pattern::matches_pattern;
pub use policy::{merge_strategy, MergeStrategy};
pub use types::{DirectiveValue, HostBlock, HostPattern, SshHostConfig, DEFAULT_SSH_PORT};

use resolver::MergePass;

/// Parsed SSH configuration: host blocks in file order
///
/// Index 0 always holds the implicit `Host *` block for directives written
/// before the first `Host` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshConfig {
    blocks: Vec<HostBlock>,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            blocks: vec![HostBlock::implicit()],
        }
    }
}

impl SshConfig {
    /// Create a new empty SSH configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse SSH configuration from a string
    pub fn parse(content: &str) -> error::Result<Self> {
        Self::from_lines(content.lines())
    }

    /// Parse SSH configuration from individual lines
    pub fn from_lines<I, S>(lines: I) -> error::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let blocks = parser::parse(lines)?;
        Ok(Self { blocks })
    }

    /// Parse SSH configuration from a buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .context("Failed to read SSH config")?;
        Ok(Self::from_lines(lines)?)
    }

    /// Load SSH configuration from a file, blocking
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read SSH config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse SSH config file: {}", path.display()))
    }

    /// Load SSH configuration from a file
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read SSH config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse SSH config file: {}", path.display()))
    }

    /// Load SSH configuration from the default locations
    pub async fn load_default() -> Result<Self> {
        // Try user-specific SSH config first
        if let Some(home_dir) = dirs::home_dir() {
            let user_config = home_dir.join(".ssh").join("config");
            if tokio::fs::try_exists(&user_config).await.unwrap_or(false) {
                return Self::load_from_file(&user_config).await;
            }
        }

        // Try system-wide SSH config
        let system_config = Path::new("/etc/ssh/ssh_config");
        if tokio::fs::try_exists(system_config).await.unwrap_or(false) {
            return Self::load_from_file(system_config).await;
        }

        tracing::debug!("No SSH config file found; using an empty configuration");
        Ok(Self::new())
    }

    /// Resolve a hostname without canonicalization
    pub fn find_host_config(&self, hostname: &str, context: &LocalContext) -> SshHostConfig {
        let mut config = resolver::find_host_config(&self.blocks, hostname);
        tokens::finalize(&mut config, hostname, context);
        config
    }

    /// Resolve a hostname using the running system's context and resolver
    pub fn lookup(&self, hostname: &str) -> error::Result<SshHostConfig> {
        self.lookup_with(hostname, &LocalContext::detect(), &SystemResolver)
    }

    /// Resolve a hostname, canonicalizing it first when the configuration asks for it
    pub fn lookup_with(
        &self,
        hostname: &str,
        context: &LocalContext,
        host_resolver: &dyn HostResolver,
    ) -> error::Result<SshHostConfig> {
        let mut config = resolver::find_host_config(&self.blocks, hostname);

        if let Some(canonical) = canonical::canonicalize(&config, hostname, host_resolver)? {
            config.insert("hostname", canonical.as_str());
            resolver::merge_matching(&self.blocks, &canonical, &mut config, MergePass::Canonical);
        }

        tokens::finalize(&mut config, hostname, context);
        Ok(config)
    }

    /// Every pattern token used on a `Host` line, negated ones prefixed with `!`
    pub fn get_hostnames(&self) -> BTreeSet<String> {
        self.blocks
            .iter()
            .filter(|block| !block.is_implicit())
            .flat_map(|block| block.patterns.iter())
            .map(|p| format!("{}{}", if p.negated { "!" } else { "" }, p.pattern))
            .collect()
    }

    /// Host blocks in file order
    pub fn blocks(&self) -> &[HostBlock] {
        &self.blocks
    }
}

impl fmt::Display for SshConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for block in self.blocks.iter().filter(|b| !(b.is_implicit() && b.is_empty())) {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{block}")?;
            first = false;
        }
        Ok(())
    }
}
