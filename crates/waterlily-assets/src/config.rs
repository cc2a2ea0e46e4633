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

//! Process-wide asset configuration: roots, path bound and compiler tool.
//!
//! The configuration is usually read from an `Assets.toml` manifest at startup
//! and installed once with [`AssetConfig::install`]. Every operation in this
//! crate takes the configuration by reference, so tests and tools may also
//! build their own values without touching the global one.

use crate::error::{AssetError, Result};
use crate::file_type::RootKind;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// The default asset root, relative to the working directory.
pub const DEFAULT_ASSET_ROOT: &str = "./Resources";
/// The default directory searched for external tools.
pub const DEFAULT_SYSTEM_ROOT: &str = "/usr/bin";
/// The default bound on synthesized path lengths, terminator byte included.
pub const DEFAULT_MAX_PATH_LENGTH: usize = 512;
/// The default external shader compiler.
pub const DEFAULT_SHADER_COMPILER: &str = "glslang";

static GLOBAL: OnceLock<AssetConfig> = OnceLock::new();

/// Represents the structure of the `Assets.toml` manifest file.
///
/// Missing keys fall back to their defaults, so an empty manifest is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// The base directory under which all non-system files are resolved.
    pub asset_root: PathBuf,
    /// The base directory under which external tool executables are resolved.
    pub system_root: PathBuf,
    /// The maximum length of a synthesized path, including one reserved byte.
    pub max_path_length: usize,
    /// The basename of the shader compiler executable inside `system_root`.
    pub shader_compiler: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            system_root: PathBuf::from(DEFAULT_SYSTEM_ROOT),
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            shader_compiler: DEFAULT_SHADER_COMPILER.to_string(),
        }
    }
}

impl AssetConfig {
    /// Creates a configuration with the given roots and default limits.
    pub fn with_roots(asset_root: impl Into<PathBuf>, system_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            system_root: system_root.into(),
            ..Self::default()
        }
    }

    /// Returns the root directory for a [`RootKind`].
    pub fn root(&self, kind: RootKind) -> &Path {
        match kind {
            RootKind::Asset => &self.asset_root,
            RootKind::System => &self.system_root,
        }
    }

    /// Checks the invariants the path synthesizer relies on.
    pub fn validate(&self) -> Result<()> {
        if self.max_path_length < 2 {
            return Err(AssetError::Config(format!(
                "max_path_length must be at least 2, got {}",
                self.max_path_length
            )));
        }
        if self.shader_compiler.is_empty() {
            return Err(AssetError::Config(
                "shader_compiler must not be empty".to_string(),
            ));
        }
        // An empty system root would leave a bare tool name, which `Command`
        // looks up on PATH rather than under the root.
        if self.asset_root.as_os_str().is_empty() || self.system_root.as_os_str().is_empty() {
            return Err(AssetError::Config(
                "asset_root and system_root must not be empty".to_string(),
            ));
        }
        if self.asset_root.to_str().is_none() || self.system_root.to_str().is_none() {
            return Err(AssetError::Config(
                "asset_root and system_root must be valid UTF-8".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(manifest: &str) -> Result<Self> {
        let config: AssetConfig =
            toml::from_str(manifest).map_err(|source| AssetError::ConfigParse {
                origin: "<string>".to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the manifest at `path`.
    /// If the file does not exist, it returns the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!(
                "No asset manifest at '{}'. Using default configuration.",
                path.display()
            );
            return Ok(Self::default());
        }

        let manifest = fs::read_to_string(path).map_err(|source| AssetError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let config: AssetConfig =
            toml::from_str(&manifest).map_err(|source| AssetError::ConfigParse {
                origin: path.display().to_string(),
                source,
            })?;
        config.validate()?;

        log::info!("Loaded asset manifest from '{}'.", path.display());
        Ok(config)
    }

    /// Installs this configuration as the process-wide one.
    ///
    /// Installation happens at most once. It fails if a configuration was
    /// already installed, or if [`AssetConfig::global`] was called before and
    /// fixed the default in place.
    pub fn install(self) -> Result<&'static AssetConfig> {
        self.validate()?;
        let mut slot = Some(self);
        let installed = GLOBAL.get_or_init(|| slot.take().unwrap_or_default());
        match slot {
            None => Ok(installed),
            Some(_) => Err(AssetError::Config(
                "an asset configuration is already installed".to_string(),
            )),
        }
    }

    /// Returns the installed configuration, installing the default if none was.
    pub fn global() -> &'static AssetConfig {
        GLOBAL.get_or_init(AssetConfig::default)
    }
}
