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

//! Facts about the local machine used during token expansion
//!
//! Lookups never query the environment themselves; callers pass a
//! [`LocalContext`], either detected from the running system or built by hand
//! (which is what tests do).

use std::path::{Path, PathBuf};

/// Home directory, local hostname and local user for `~`, `%d`, `%l`, `%L` and `%u`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalContext {
    pub home_dir: Option<PathBuf>,
    pub local_hostname: String,
    pub local_user: String,
}

impl LocalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect the context of the current process
    pub fn detect() -> Self {
        let local_hostname = match hostname::get() {
            Ok(name) => name.to_string_lossy().into_owned(),
            Err(e) => {
                tracing::debug!("Failed to determine local hostname: {}", e);
                String::new()
            }
        };

        Self {
            home_dir: dirs::home_dir(),
            local_hostname,
            local_user: whoami::username(),
        }
    }

    pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    pub fn with_local_hostname(mut self, local_hostname: impl Into<String>) -> Self {
        self.local_hostname = local_hostname.into();
        self
    }

    pub fn with_local_user(mut self, local_user: impl Into<String>) -> Self {
        self.local_user = local_user.into();
        self
    }

    pub fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }

    /// Local hostname up to the first dot
    pub fn short_hostname(&self) -> &str {
        self.local_hostname
            .split('.')
            .next()
            .unwrap_or_default()
    }
}
