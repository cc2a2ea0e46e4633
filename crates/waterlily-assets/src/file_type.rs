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

//! The type registry: every logical file type and where its files live.
//!
//! Each [`FileType`] variant owns a static [`FileTypeDescriptor`] describing the
//! root it resolves against, the subdirectory below that root and the suffix
//! appended to the basename. The table is `const` data and never changes at
//! runtime.

/// The directory a file type resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    /// The configured asset root (e.g. `./Resources`).
    Asset,
    /// The configured system tool root (e.g. `/usr/bin`).
    System,
}

/// The pipeline stage a shader file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// The vertex shader stage.
    Vertex,
    /// The fragment (or pixel) shader stage.
    Fragment,
}

/// Static metadata attached to a [`FileType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTypeDescriptor {
    /// The root directory kind.
    pub root: RootKind,
    /// The subdirectory below the root; empty for files living at the root.
    pub subdirectory: &'static str,
    /// The string appended after the basename; may encode role and extension.
    pub suffix: &'static str,
}

const TEXT: FileTypeDescriptor = FileTypeDescriptor {
    root: RootKind::Asset,
    subdirectory: "",
    suffix: ".txt",
};

const SHADER_VERTEX_SOURCE: FileTypeDescriptor = FileTypeDescriptor {
    root: RootKind::Asset,
    subdirectory: "Shaders/Source",
    suffix: ".vert",
};

const SHADER_FRAGMENT_SOURCE: FileTypeDescriptor = FileTypeDescriptor {
    root: RootKind::Asset,
    subdirectory: "Shaders/Source",
    suffix: ".frag",
};

const SHADER_VERTEX_BINARY: FileTypeDescriptor = FileTypeDescriptor {
    root: RootKind::Asset,
    subdirectory: "Shaders/Compiled",
    suffix: "-vert.spv",
};

const SHADER_FRAGMENT_BINARY: FileTypeDescriptor = FileTypeDescriptor {
    root: RootKind::Asset,
    subdirectory: "Shaders/Compiled",
    suffix: "-frag.spv",
};

const SYSTEM_EXECUTABLE: FileTypeDescriptor = FileTypeDescriptor {
    root: RootKind::System,
    subdirectory: "",
    suffix: "",
};

/// The logical type of an asset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Plain text, stored directly under the asset root.
    Text,
    /// GLSL vertex shader source.
    ShaderVertexSource,
    /// GLSL fragment shader source.
    ShaderFragmentSource,
    /// Compiled SPIR-V vertex shader.
    ShaderVertexBinary,
    /// Compiled SPIR-V fragment shader.
    ShaderFragmentBinary,
    /// An external tool, resolved against the system root and run as a process.
    SystemExecutable,
}

impl FileType {
    /// Every file type, in declaration order.
    pub const ALL: [FileType; 6] = [
        FileType::Text,
        FileType::ShaderVertexSource,
        FileType::ShaderFragmentSource,
        FileType::ShaderVertexBinary,
        FileType::ShaderFragmentBinary,
        FileType::SystemExecutable,
    ];

    /// Returns the registry entry for this type.
    pub const fn descriptor(self) -> &'static FileTypeDescriptor {
        match self {
            FileType::Text => &TEXT,
            FileType::ShaderVertexSource => &SHADER_VERTEX_SOURCE,
            FileType::ShaderFragmentSource => &SHADER_FRAGMENT_SOURCE,
            FileType::ShaderVertexBinary => &SHADER_VERTEX_BINARY,
            FileType::ShaderFragmentBinary => &SHADER_FRAGMENT_BINARY,
            FileType::SystemExecutable => &SYSTEM_EXECUTABLE,
        }
    }

    /// Shorthand for `self.descriptor().subdirectory`.
    pub const fn subdirectory(self) -> &'static str {
        self.descriptor().subdirectory
    }

    /// Shorthand for `self.descriptor().suffix`.
    pub const fn suffix(self) -> &'static str {
        self.descriptor().suffix
    }

    /// Shorthand for `self.descriptor().root`.
    pub const fn root(self) -> RootKind {
        self.descriptor().root
    }

    /// Whether loads of this type are treated as text and NUL-terminated by
    /// [`crate::AssetFile::load_into`].
    pub const fn is_text_like(self) -> bool {
        matches!(
            self,
            FileType::Text | FileType::ShaderVertexSource | FileType::ShaderFragmentSource
        )
    }

    /// The shader stage of a shader source or binary, `None` for other types.
    pub const fn shader_stage(self) -> Option<ShaderStage> {
        match self {
            FileType::ShaderVertexSource | FileType::ShaderVertexBinary => {
                Some(ShaderStage::Vertex)
            }
            FileType::ShaderFragmentSource | FileType::ShaderFragmentBinary => {
                Some(ShaderStage::Fragment)
            }
            _ => None,
        }
    }

    /// The binary type a shader source compiles to, `None` for non-sources.
    pub const fn compiled_counterpart(self) -> Option<FileType> {
        match self {
            FileType::ShaderVertexSource => Some(FileType::ShaderVertexBinary),
            FileType::ShaderFragmentSource => Some(FileType::ShaderFragmentBinary),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_text_and_executables_may_lack_a_suffix() {
        for file_type in FileType::ALL {
            match file_type {
                FileType::SystemExecutable | FileType::Text => {}
                other => assert!(
                    !other.suffix().is_empty(),
                    "{other:?} must carry a suffix"
                ),
            }
        }
    }

    #[test]
    fn only_executables_resolve_against_the_system_root() {
        for file_type in FileType::ALL {
            let expected = if file_type == FileType::SystemExecutable {
                RootKind::System
            } else {
                RootKind::Asset
            };
            assert_eq!(file_type.root(), expected);
        }
        assert!(FileType::SystemExecutable.subdirectory().is_empty());
    }

    #[test]
    fn sources_compile_to_the_binary_of_the_same_stage() {
        for source in [FileType::ShaderVertexSource, FileType::ShaderFragmentSource] {
            let binary = source.compiled_counterpart().unwrap();
            assert_eq!(source.shader_stage(), binary.shader_stage());
            assert_eq!(binary.subdirectory(), "Shaders/Compiled");
            assert!(binary.suffix().ends_with(".spv"));
        }
        assert_eq!(FileType::Text.compiled_counterpart(), None);
        assert_eq!(FileType::ShaderVertexBinary.compiled_counterpart(), None);
    }

    #[test]
    fn text_like_types_are_sources_and_text() {
        assert!(FileType::Text.is_text_like());
        assert!(FileType::ShaderFragmentSource.is_text_like());
        assert!(!FileType::ShaderVertexBinary.is_text_like());
        assert!(!FileType::SystemExecutable.is_text_like());
    }
}
