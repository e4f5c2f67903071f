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

//! Hostname canonicalization
//!
//! Implements the `CanonicalizeHostname` family of directives: a short name is
//! tried against each of `CanonicalDomains` through an injected
//! [`HostResolver`], and the first candidate that resolves becomes the new
//! hostname for a second lookup pass.

use std::fmt;
use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use std::str::FromStr;

use super::error::{ConfigError, Result};
use super::parser::parse_yes_no;
use super::tokens::{expand_hostname, is_none_value};
use super::types::SshHostConfig;

/// Default for `CanonicalizeMaxDots`
const DEFAULT_CANONICALIZE_MAX_DOTS: usize = 1;

/// Value of the `AddressFamily` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFamily {
    #[default]
    Any,
    Inet,
    Inet6,
}

impl AddressFamily {
    /// Whether an address belongs to this family
    pub fn accepts(self, addr: &IpAddr) -> bool {
        match self {
            AddressFamily::Any => true,
            AddressFamily::Inet => addr.is_ipv4(),
            AddressFamily::Inet6 => addr.is_ipv6(),
        }
    }
}

impl FromStr for AddressFamily {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "any" => Ok(AddressFamily::Any),
            "inet" => Ok(AddressFamily::Inet),
            "inet6" => Ok(AddressFamily::Inet6),
            _ => Err(ConfigError::InvalidValue {
                key: "addressfamily".to_string(),
                value: value.to_string(),
                expected: "any, inet or inet6",
            }),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AddressFamily::Any => "any",
            AddressFamily::Inet => "inet",
            AddressFamily::Inet6 => "inet6",
        })
    }
}

/// Name resolution used while canonicalizing
///
/// Implementations are called at most once per candidate name.
pub trait HostResolver {
    /// Resolve a name using the platform's default family selection
    fn resolve(&self, name: &str) -> io::Result<IpAddr>;

    /// Resolve a name, accepting only addresses of the given family
    fn resolve_family(&self, name: &str, family: AddressFamily) -> io::Result<IpAddr>;
}

/// Resolver backed by the operating system (`getaddrinfo`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn resolve(&self, name: &str) -> io::Result<IpAddr> {
        self.resolve_family(name, AddressFamily::Any)
    }

    fn resolve_family(&self, name: &str, family: AddressFamily) -> io::Result<IpAddr> {
        (name, 0u16)
            .to_socket_addrs()?
            .map(|addr| addr.ip())
            .find(|ip| family.accepts(ip))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no {family} address found for {name}"),
                )
            })
    }
}

/// Value of the `CanonicalizeHostname` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalizeMode {
    Off,
    /// Canonicalize unless a proxy is configured
    Yes,
    /// Canonicalize even when connecting through a proxy
    Always,
}

impl CanonicalizeMode {
    pub fn from_directive(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            None | Some("no") | Some("false") => CanonicalizeMode::Off,
            Some("always") => CanonicalizeMode::Always,
            Some(_) => CanonicalizeMode::Yes,
        }
    }
}

fn has_proxy(config: &SshHostConfig) -> bool {
    let enabled = |value: Option<&str>| value.is_some_and(|v| !is_none_value(v));
    enabled(config.proxy_command()) || enabled(config.proxy_jump())
}

/// Work out the canonical hostname for a first-pass result
///
/// Returns `Ok(None)` when the first-pass result should stand, either because
/// canonicalization does not apply or because every candidate failed and
/// `CanonicalizeFallbackLocal` allows falling back.
pub(super) fn canonicalize(
    first_pass: &SshHostConfig,
    target: &str,
    resolver: &dyn HostResolver,
) -> Result<Option<String>> {
    let mode = CanonicalizeMode::from_directive(first_pass.get_str("canonicalizehostname"));
    match mode {
        CanonicalizeMode::Off => return Ok(None),
        CanonicalizeMode::Yes if has_proxy(first_pass) => {
            tracing::debug!("Not canonicalizing '{}': a proxy is configured", target);
            return Ok(None);
        }
        _ => {}
    }

    let expanded = expand_hostname(first_pass.hostname(), target);
    let name = expanded.trim_end_matches('.');

    if name.parse::<IpAddr>().is_ok() {
        tracing::debug!("Not canonicalizing IP address '{}'", name);
        return Ok(None);
    }

    let max_dots = match first_pass.get_str("canonicalizemaxdots") {
        None => DEFAULT_CANONICALIZE_MAX_DOTS,
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "canonicalizemaxdots".to_string(),
                value: value.to_string(),
                expected: "a non-negative integer",
            })?,
    };
    let dots = name.matches('.').count();
    if dots > max_dots {
        tracing::debug!(
            "Not canonicalizing '{}': {} dots exceeds CanonicalizeMaxDots {}",
            name,
            dots,
            max_dots
        );
        return Ok(None);
    }

    let domains: Vec<&str> = first_pass
        .get_str("canonicaldomains")
        .map(|value| value.split_whitespace().collect())
        .unwrap_or_default();
    if domains.is_empty() {
        tracing::debug!("Not canonicalizing '{}': no CanonicalDomains", name);
        return Ok(None);
    }

    let family = first_pass
        .get_str("addressfamily")
        .map(str::parse::<AddressFamily>)
        .transpose()?
        .unwrap_or_default();

    for domain in &domains {
        let candidate = format!("{}.{}", name, domain.trim_matches('.'));
        let outcome = match family {
            AddressFamily::Any => resolver.resolve(&candidate),
            family => resolver.resolve_family(&candidate, family),
        };
        match outcome {
            Ok(addr) => {
                tracing::debug!("Canonicalized '{}' to '{}' ({})", name, candidate, addr);
                return Ok(Some(candidate));
            }
            Err(e) => tracing::debug!("Canonical candidate '{}' failed: {}", candidate, e),
        }
    }

    let fallback_local = match first_pass.get_str("canonicalizefallbacklocal") {
        None => true,
        Some(value) => parse_yes_no("canonicalizefallbacklocal", value)?,
    };
    if fallback_local {
        tracing::debug!("Canonicalization of '{}' failed; using it as-is", name);
        Ok(None)
    } else {
        Err(ConfigError::CanonicalizationFailed {
            hostname: name.to_string(),
            domains: domains.iter().map(|d| d.to_string()).collect(),
        })
    }
}
