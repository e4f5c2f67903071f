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

use anyhow::{Context, Result};
use clap::Parser;

use sshcfg::{cli::Cli, ssh_config::SshConfig, utils::init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let ssh_config = if let Some(ref ssh_config_path) = cli.ssh_config {
        SshConfig::load_from_file(ssh_config_path)
            .await
            .with_context(|| format!("Failed to load SSH config from {ssh_config_path:?}"))?
    } else {
        SshConfig::load_default().await?
    };

    if cli.list_hosts {
        for pattern in ssh_config.get_hostnames() {
            println!("{pattern}");
        }
        return Ok(());
    }

    let Some(host) = cli.host.as_deref() else {
        anyhow::bail!("No host given");
    };

    tracing::debug!("Resolving configuration for '{}'", host);
    let resolved = ssh_config
        .lookup(host)
        .with_context(|| format!("Failed to resolve SSH config for {host}"))?;
    print!("{resolved}");

    Ok(())
}
