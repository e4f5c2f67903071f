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

//! Per-directive merge policy
//!
//! Most directives follow OpenSSH's "first obtained value wins" rule. A handful
//! of directives accumulate every value from every matching block instead.

/// How values for a directive are combined across blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// The earliest value seen is authoritative; later ones are ignored
    FirstWins,
    /// Every value is appended, in match order
    Append,
}

/// Directives whose values accumulate instead of being overwritten
const APPEND_DIRECTIVES: &[&str] = &[
    "identityfile",
    "certificatefile",
    "localforward",
    "remoteforward",
    "dynamicforward",
    "sendenv",
];

/// Look up the merge strategy for a lowercase directive name
pub fn merge_strategy(directive: &str) -> MergeStrategy {
    if APPEND_DIRECTIVES.contains(&directive) {
        MergeStrategy::Append
    } else {
        MergeStrategy::FirstWins
    }
}
