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

//! Deterministic path synthesis from a file type and a basename.
//!
//! A path is the concatenation of the root selected by the type, the type's
//! subdirectory, the basename and the type's suffix. The result is bounded by
//! [`AssetConfig::max_path_length`]; one byte of that budget is reserved, so at
//! most `max_path_length - 1` bytes are usable. Anything longer is rejected with
//! [`AssetError::PathTooLong`], which carries the deterministic truncation for
//! diagnostics.

use crate::config::AssetConfig;
use crate::error::{AssetError, Result};
use crate::file_type::FileType;
use std::fmt;
use std::path::Path;

/// A synthesized, length-checked path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(String);

impl ResolvedPath {
    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path as a [`Path`].
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Returns the length of the path in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ResolvedPath> for String {
    fn from(path: ResolvedPath) -> Self {
        path.0
    }
}

/// Cuts `candidate` down to what fits in a buffer of `max_path_length` bytes
/// with one byte reserved: its first `max_path_length - 1` bytes.
///
/// If that cut falls inside a multi-byte character, it backs off to the
/// previous character boundary. Inputs that already fit are returned whole.
pub fn truncate_to_bound(candidate: &str, max_path_length: usize) -> &str {
    let limit = max_path_length.saturating_sub(1);
    if candidate.len() <= limit {
        return candidate;
    }
    let mut end = limit;
    while !candidate.is_char_boundary(end) {
        end -= 1;
    }
    &candidate[..end]
}

fn push_separator(path: &mut String) {
    if !path.is_empty() && !path.ends_with('/') {
        path.push('/');
    }
}

fn push_component(path: &mut String, component: &str) {
    if component.is_empty() {
        return;
    }
    push_separator(path);
    path.push_str(component);
}

/// Builds the on-disk path of a `(file_type, basename)` pair.
///
/// The root is the system root for [`FileType::SystemExecutable`] and the
/// asset root for every other type.
///
/// # Errors
/// Returns [`AssetError::PathTooLong`] when the path would exceed
/// `max_path_length - 1` bytes, and [`AssetError::Config`] when the selected
/// root is not valid UTF-8.
pub fn synthesize(config: &AssetConfig, file_type: FileType, basename: &str) -> Result<ResolvedPath> {
    let descriptor = file_type.descriptor();
    let root = config.root(descriptor.root);
    let root = root.to_str().ok_or_else(|| {
        AssetError::Config(format!("root '{}' is not valid UTF-8", root.display()))
    })?;

    let mut path = String::with_capacity(
        root.len() + descriptor.subdirectory.len() + basename.len() + descriptor.suffix.len() + 2,
    );
    path.push_str(root);
    push_component(&mut path, descriptor.subdirectory);
    // The basename slot always sits inside the type's directory, even when
    // empty, so the suffix never lands on the directory name itself.
    push_separator(&mut path);
    path.push_str(basename);
    path.push_str(descriptor.suffix);

    let truncated = truncate_to_bound(&path, config.max_path_length);
    if truncated.len() < path.len() {
        let truncated = truncated.to_string();
        log::error!(
            "Path for '{basename}' ({file_type:?}) exceeds {} bytes: '{truncated}...'",
            config.max_path_length
        );
        return Err(AssetError::PathTooLong {
            path,
            limit: config.max_path_length,
            truncated,
        });
    }

    Ok(ResolvedPath(path))
}
