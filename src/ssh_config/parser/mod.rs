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

//! SSH configuration parsing module
//!
//! This module is organized into submodules:
//! - `core`: Line-by-line parsing into host blocks
//! - `host_list`: Tokenizing the argument of a `Host` line
//! - `helpers`: Comment stripping, keyword/value splitting and value coercion
//! - `tests`: Parser test suite

mod core;
mod helpers;
mod host_list;

#[cfg(test)]
mod tests;

pub use self::core::parse;
pub use self::host_list::parse_host_list;

pub(crate) use self::helpers::parse_yes_no;
