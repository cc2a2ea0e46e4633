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
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use walkdir::WalkDir;
use waterlily_assets::{compile_shader, AssetConfig, AssetFile, FileType};

/// Compiles every shader source under `<asset_root>/Shaders/Source`.
pub fn compile_all(config: &AssetConfig) -> Result<()> {
    print_task_start("Compiling Shaders", BRUSH, MAGENTA);

    let source_dir = config
        .asset_root
        .join(FileType::ShaderVertexSource.subdirectory());
    if !source_dir.is_dir() {
        print_error(&format!(
            "No shader source directory at '{}'. Nothing to compile.",
            source_dir.display()
        ));
        return Ok(());
    }

    let output_dir = config
        .asset_root
        .join(FileType::ShaderVertexBinary.subdirectory());
    fs::create_dir_all(&output_dir).with_context(|| {
        format!(
            "Failed to create shader output directory '{}'",
            output_dir.display()
        )
    })?;

    let sources = find_shader_sources(&source_dir);
    if sources.is_empty() {
        print_success("No shader sources found.");
        return Ok(());
    }
    print_info(&format!(
        "Found {} shader sources in '{}'.",
        sources.len(),
        source_dir.display()
    ));

    let start_time = Instant::now();
    let mut succeeded = 0;
    for source in &sources {
        match compile_shader(config, source) {
            Ok(binary) => {
                succeeded += 1;
                print_success(&format!(
                    "{} ({:?}) -> {:?}",
                    source.basename(),
                    source.file_type(),
                    binary.file_type()
                ));
            }
            Err(e) => print_error(&e.to_string()),
        }
    }
    print_summary(succeeded, sources.len(), start_time.elapsed().as_secs_f64());

    if succeeded != sources.len() {
        bail!(
            "{} of {} shaders failed to compile",
            sources.len() - succeeded,
            sources.len()
        );
    }
    Ok(())
}

/// Lists the `.vert` and `.frag` files directly inside `source_dir`, sorted
/// by basename so output is stable across runs.
fn find_shader_sources(source_dir: &Path) -> Vec<AssetFile> {
    let mut sources: Vec<AssetFile> = WalkDir::new(source_dir)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.path();
            let file_type = match path.extension()?.to_str()? {
                "vert" => FileType::ShaderVertexSource,
                "frag" => FileType::ShaderFragmentSource,
                _ => return None,
            };
            let basename = path.file_stem()?.to_str()?;
            Some(AssetFile::new(basename, file_type))
        })
        .collect();
    sources.sort_by(|a, b| a.basename().cmp(b.basename()));
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn finds_only_shader_sources() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("b.frag"), "")?;
        fs::write(dir.path().join("a.vert"), "")?;
        fs::write(dir.path().join("notes.txt"), "")?;
        fs::create_dir(dir.path().join("nested.vert"))?;

        let found: Vec<_> = find_shader_sources(dir.path())
            .iter()
            .map(|file| (file.basename().to_string(), file.file_type()))
            .collect();

        assert_eq!(
            found,
            [
                ("a".to_string(), FileType::ShaderVertexSource),
                ("b".to_string(), FileType::ShaderFragmentSource),
            ]
        );
        Ok(())
    }

    #[test]
    fn missing_source_directory_is_not_an_error() -> Result<()> {
        let dir = tempdir()?;
        let config = AssetConfig::with_roots(dir.path(), "/usr/bin");
        compile_all(&config)
    }
}
