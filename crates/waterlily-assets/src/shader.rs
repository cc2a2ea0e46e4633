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

//! GLSL to SPIR-V compilation through an external compiler process.
//!
//! The compiler is looked up in the system root under
//! [`AssetConfig::shader_compiler`] and always receives the argument vector
//! built by [`compiler_arguments`]. That vector is a compatibility surface
//! with `glslang` and must not change shape.

use crate::config::AssetConfig;
use crate::error::{AssetError, Result};
use crate::file::AssetFile;
use crate::file_type::FileType;
use crate::path::ResolvedPath;
use crate::process::execute;

/// The Vulkan environment the SPIR-V output targets.
pub const TARGET_ENV: &str = "vulkan1.3";
/// The entry point every shader must define.
pub const ENTRY_POINT: &str = "main";
/// The GLSL version sources are compiled as.
pub const GLSL_VERSION: &str = "460";

/// Builds the compiler's argument vector, excluding `argv[0]`.
pub fn compiler_arguments(output: &ResolvedPath, input: &ResolvedPath) -> Vec<String> {
    vec![
        "--target-env".to_string(),
        TARGET_ENV.to_string(),
        "-e".to_string(),
        ENTRY_POINT.to_string(),
        // No debug info, optimize for size.
        "-g0".to_string(),
        "-Os".to_string(),
        "--glsl-version".to_string(),
        GLSL_VERSION.to_string(),
        "--spirv-val".to_string(),
        "--lto".to_string(),
        "--quiet".to_string(),
        "-o".to_string(),
        output.to_string(),
        input.to_string(),
    ]
}

/// Compiles a shader source asset into its SPIR-V counterpart.
///
/// `source` may be Open or Closed; only its path is used. On success the
/// returned [`AssetFile`] describes the compiled binary (same basename,
/// [`FileType::ShaderVertexBinary`] or [`FileType::ShaderFragmentBinary`]) and
/// is Closed.
///
/// # Errors
/// - [`AssetError::WrongFileType`] if `source` is not a shader source.
/// - [`AssetError::CompilationFailed`] if the compiler exits nonzero. The
///   output file may have been left behind; removing it is up to the caller.
/// - Any error of [`execute`] when the compiler cannot be run at all.
pub fn compile_shader(config: &AssetConfig, source: &AssetFile) -> Result<AssetFile> {
    let Some(output_type) = source.file_type().compiled_counterpart() else {
        log::error!(
            "Cannot compile '{}': {:?} is not a shader source.",
            source.basename(),
            source.file_type()
        );
        return Err(AssetError::WrongFileType {
            basename: source.basename().to_string(),
            expected: "ShaderVertexSource or ShaderFragmentSource",
            found: source.file_type(),
        });
    };

    let output = AssetFile::new(source.basename(), output_type);
    let input_path = source.resolve(config)?;
    let output_path = output.resolve(config)?;
    let compiler = AssetFile::new(config.shader_compiler.as_str(), FileType::SystemExecutable);

    let status = execute(
        config,
        &compiler,
        compiler_arguments(&output_path, &input_path),
    )?;

    if status != 0 {
        log::error!("Shader compilation of '{input_path}' failed with exit status {status}.");
        if output_path.as_path().exists() {
            log::warn!("'{output_path}' exists after a failed compilation and may be stale or partial.");
        }
        return Err(AssetError::CompilationFailed {
            path: input_path.into(),
            status,
        });
    }

    log::debug!("Compiled '{input_path}' into '{output_path}'.");
    Ok(output)
}
