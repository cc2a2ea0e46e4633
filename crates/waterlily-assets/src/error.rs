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

//! Defines the error type shared by every asset operation.

use crate::file_type::FileType;
use std::io;
use thiserror::Error;

/// A specialized `Result` for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Every way an asset operation can fail.
///
/// Variants carry the resolved path whenever one was known at the point of
/// failure, and the underlying OS error when the OS supplied one.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The synthesized path does not fit in the configured maximum length.
    #[error("path '{truncated}...' exceeds the maximum length of {limit} bytes")]
    PathTooLong {
        /// The full, untruncated path.
        path: String,
        /// The configured maximum path length.
        limit: usize,
        /// The path cut down to the bytes that fit.
        truncated: String,
    },

    /// The OS refused to open the file.
    #[error("failed to open file '{path}': {source}")]
    OpenFailed {
        /// The resolved path.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// `open` was called on a file that is already open.
    #[error("asset '{basename}' is already open")]
    AlreadyOpen {
        /// The basename of the asset.
        basename: String,
    },

    /// An I/O operation was attempted on a closed file.
    #[error("asset '{basename}' is not open")]
    NotOpen {
        /// The basename of the asset.
        basename: String,
    },

    /// Flushing or syncing the file on close failed.
    #[error("failed to close file '{path}': {source}")]
    CloseFailed {
        /// The resolved path.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Querying the file's metadata failed.
    #[error("failed to stat file '{path}': {source}")]
    StatFailed {
        /// The resolved path.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The caller-supplied buffer cannot hold the file contents.
    #[error("buffer for '{path}' holds {provided} bytes but {needed} are required")]
    BufferTooSmall {
        /// The resolved path.
        path: String,
        /// The number of bytes required.
        needed: usize,
        /// The number of bytes the buffer holds.
        provided: usize,
    },

    /// Fewer bytes than the file size were read.
    #[error("read {read} of {expected} bytes from '{path}'")]
    ReadIncomplete {
        /// The resolved path.
        path: String,
        /// Bytes actually read.
        read: u64,
        /// Bytes expected.
        expected: u64,
        /// The OS error that stopped the read, if any.
        #[source]
        source: Option<io::Error>,
    },

    /// A text load produced bytes that are not valid UTF-8.
    #[error("file '{path}' is not valid UTF-8: {source}")]
    InvalidText {
        /// The resolved path.
        path: String,
        /// The decoding error.
        source: std::string::FromUtf8Error,
    },

    /// Fewer bytes than requested were written.
    #[error("wrote {written} of {expected} bytes to '{path}'")]
    WriteIncomplete {
        /// The resolved path.
        path: String,
        /// Bytes actually written.
        written: u64,
        /// Bytes expected.
        expected: u64,
        /// The OS error that stopped the write, if any.
        #[source]
        source: Option<io::Error>,
    },

    /// The asset's type is not valid for the requested operation.
    #[error("asset '{basename}' has type {found:?}, expected {expected}")]
    WrongFileType {
        /// The basename of the asset.
        basename: String,
        /// A description of the accepted types.
        expected: &'static str,
        /// The actual type.
        found: FileType,
    },

    /// The resolved path is not an executable file.
    #[error("'{path}' is not an executable file")]
    NotExecutable {
        /// The resolved path.
        path: String,
    },

    /// The child process could not be created.
    #[error("failed to spawn a process for '{path}': {source}")]
    SpawnFailed {
        /// The resolved path.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The child process was created but could not execute the target image.
    #[error("failed to execute '{path}': {source}")]
    ExecFailed {
        /// The resolved path.
        path: String,
        /// The error reported back from the child.
        source: io::Error,
    },

    /// Waiting for the child process failed.
    #[error("failed to wait for '{path}': {source}")]
    WaitFailed {
        /// The resolved path.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The child process ended without an exit code.
    #[error(
        "'{path}' terminated abnormally{}",
        .signal.map(|s| format!(" (signal {s})")).unwrap_or_default()
    )]
    AbnormalTermination {
        /// The resolved path.
        path: String,
        /// The terminating signal, when the platform reports one.
        signal: Option<i32>,
    },

    /// The shader compiler exited with a nonzero status.
    #[error("shader compilation of '{path}' failed with exit status {status}")]
    CompilationFailed {
        /// The resolved path of the shader source.
        path: String,
        /// The compiler's exit status.
        status: i32,
    },

    /// The configuration is invalid.
    #[error("invalid asset configuration: {0}")]
    Config(String),

    /// The configuration manifest could not be read.
    #[error("failed to read asset manifest '{path}': {source}")]
    ConfigRead {
        /// The manifest path.
        path: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The configuration manifest is not valid TOML for [`crate::AssetConfig`].
    #[error("failed to parse asset manifest '{origin}': {source}")]
    ConfigParse {
        /// Where the manifest came from.
        origin: String,
        /// The parse error.
        source: toml::de::Error,
    },
}
