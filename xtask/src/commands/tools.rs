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

use crate::helpers::*;
use anyhow::{bail, Result};
use waterlily_assets::{is_executable, AssetConfig, AssetFile, FileType};

/// Verifies that the configured shader compiler can be executed.
pub fn check(config: &AssetConfig) -> Result<()> {
    print_task_start("Checking External Tools", MAGNIFIER, CYAN);

    let compiler = AssetFile::new(config.shader_compiler.as_str(), FileType::SystemExecutable);
    let path = compiler.resolve(config)?;
    print_info(&format!("Shader compiler resolves to '{path}'."));

    if !is_executable(&path) {
        print_error(&format!("'{path}' is missing or not executable."));
        bail!(
            "shader compiler '{}' not found in '{}'",
            config.shader_compiler,
            config.system_root.display()
        );
    }

    print_success("Shader compiler is available.");
    Ok(())
}
