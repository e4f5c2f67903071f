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

//! Configuration resolution and merging logic for SSH configuration
//!
//! This module walks host blocks in file order and merges every block whose
//! patterns select the hostname, according to the per-directive merge policy.

use super::pattern::matches_host_patterns;
use super::policy::{merge_strategy, MergeStrategy};
use super::types::{DirectiveValue, HostBlock, SshHostConfig};

/// Which lookup pass a merge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MergePass {
    /// Lookup against the hostname as given
    Initial,
    /// Re-lookup against the canonicalized hostname, on top of the initial result
    Canonical,
}

/// Merge every block matching the hostname into `merged`, in file order
pub(super) fn merge_matching(
    blocks: &[HostBlock],
    hostname: &str,
    merged: &mut SshHostConfig,
    pass: MergePass,
) {
    for (index, block) in blocks.iter().enumerate() {
        if matches_host_patterns(hostname, &block.patterns) {
            tracing::trace!("Host block #{} matches '{}' ({:?} pass)", index, hostname, pass);
            merge_block(merged, block, pass);
        }
    }
}

/// Merge a single block into the result
///
/// A first-wins directive already present is left alone. Accumulating
/// directives are extended; during the canonical pass entries collected by the
/// initial pass are not added a second time.
pub(super) fn merge_block(base: &mut SshHostConfig, overlay: &HostBlock, pass: MergePass) {
    let options = base.options_mut();

    for (key, value) in &overlay.directives {
        let Some(existing) = options.get_mut(key) else {
            options.insert(key.clone(), value.clone());
            continue;
        };

        if merge_strategy(key) != MergeStrategy::Append {
            continue;
        }

        if let (DirectiveValue::List(existing), DirectiveValue::List(values)) = (existing, value) {
            for entry in values {
                if pass == MergePass::Canonical && existing.contains(entry) {
                    continue;
                }
                existing.push(entry.clone());
            }
        }
    }
}

/// Default `hostname` to the queried name when no block set `HostName`
pub(super) fn ensure_hostname(config: &mut SshHostConfig, hostname: &str) {
    if !config.contains_key("hostname") {
        config.insert("hostname", hostname);
    }
}

/// Find the merged, unexpanded configuration for a hostname
pub(super) fn find_host_config(blocks: &[HostBlock], hostname: &str) -> SshHostConfig {
    let mut merged = SshHostConfig::new();
    merge_matching(blocks, hostname, &mut merged, MergePass::Initial);
    ensure_hostname(&mut merged, hostname);
    merged
}
