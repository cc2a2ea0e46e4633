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

//! # Waterlily Assets
//!
//! Typed asset files for the Waterlily renderer: where they live on disk, how
//! they are read and written, and how shader sources become SPIR-V.
//!
//! The key components are:
//! - [`FileType`]: the type registry mapping each logical type to a root,
//!   subdirectory and suffix.
//! - [`synthesize`]: deterministic, length-checked path construction.
//! - [`AssetFile`]: an OS file handle with an explicit open/close lifecycle.
//! - [`execute`]: synchronous spawn-and-wait of external tools.
//! - [`compile_shader`]: GLSL to SPIR-V through an external compiler.
//!
//! ```no_run
//! use waterlily_assets::{compile_shader, AssetConfig, AssetFile, FileType, Permissions};
//!
//! # fn main() -> waterlily_assets::Result<()> {
//! let config = AssetConfig::load("Assets.toml")?.install()?;
//!
//! let source = AssetFile::new("triangle", FileType::ShaderVertexSource);
//! let mut binary = compile_shader(config, &source)?;
//!
//! binary.open(config, Permissions::Read)?;
//! let spirv = binary.load()?;
//! binary.close()?;
//! # let _ = spirv;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod file;
pub mod file_type;
pub mod path;
pub mod process;
pub mod shader;

pub use config::AssetConfig;
pub use error::{AssetError, Result};
pub use file::{read_asset, write_asset, AssetFile, Permissions};
pub use file_type::{FileType, FileTypeDescriptor, RootKind, ShaderStage};
pub use path::{synthesize, truncate_to_bound, ResolvedPath};
pub use process::{execute, is_executable};
pub use shader::{compile_shader, compiler_arguments};
