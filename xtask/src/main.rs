// Copyright 2025 eraflo
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

// Asset build tasks for the Waterlily renderer
// Run with: cargo xtask <command>

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use helpers::*;
use std::path::PathBuf;
use waterlily_assets::AssetConfig;

#[derive(Parser)]
#[command(author, version, about = "Asset build tasks for Waterlily", long_about = None)]
struct Cli {
    /// Asset manifest to read roots and tool names from.
    #[arg(long, global = true, default_value = "Assets.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compiles every vertex and fragment shader source to SPIR-V.
    Shaders,
    /// Checks that the external tools used by the asset pipeline are installed.
    CheckTools,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    println!("{}", BANNER);

    let config = AssetConfig::load(&cli.config)?.install()?;
    log::debug!(
        "{} Asset root '{}', system root '{}'.",
        GEAR,
        config.asset_root.display(),
        config.system_root.display()
    );

    match cli.command {
        Commands::Shaders => commands::shaders::compile_all(config),
        Commands::CheckTools => commands::tools::check(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flag_defaults_to_the_manifest_name() {
        let cli = Cli::parse_from(["xtask", "check-tools"]);
        assert_eq!(cli.config, PathBuf::from("Assets.toml"));
        assert!(matches!(cli.command, Commands::CheckTools));

        let cli = Cli::parse_from(["xtask", "shaders", "--config", "custom.toml"]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
    }
}
