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

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sshcfg",
    version,
    about = "Resolve OpenSSH client configuration for a host",
    long_about = "sshcfg reads an OpenSSH client configuration file and prints the effective options for a host,\nin the same first-match-wins order ssh(1) applies them. Tokens such as %h, %p and ~ are expanded,\nand CanonicalizeHostname is honoured using the system resolver.",
    after_help = "EXAMPLES:\n  Resolve a host:              sshcfg web1.example.com\n  Use another config file:     sshcfg -F ./ssh_config bastion\n  List Host patterns:          sshcfg --list-hosts\n  Debug block matching:        sshcfg -vv web1"
)]
pub struct Cli {
    #[arg(
        short = 'F',
        long = "config",
        value_name = "ssh_configfile",
        help = "Use an alternative SSH configuration file\nDefaults to ~/.ssh/config, then /etc/ssh/ssh_config"
    )]
    pub ssh_config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[arg(
        long,
        conflicts_with = "host",
        help = "Print every pattern used on a Host line instead of resolving a host"
    )]
    pub list_hosts: bool,

    #[arg(
        required_unless_present = "list_hosts",
        help = "Hostname to resolve"
    )]
    pub host: Option<String>,
}
