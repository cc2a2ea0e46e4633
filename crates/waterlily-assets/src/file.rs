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

//! The [`AssetFile`] handle and its open/size/load/write/close lifecycle.

use crate::config::AssetConfig;
use crate::error::{AssetError, Result};
use crate::file_type::FileType;
use crate::path::{synthesize, ResolvedPath};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};

/// The access mode requested when opening an [`AssetFile`].
///
/// Each variant corresponds to one C `fopen` mode string, see
/// [`Permissions::mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permissions {
    /// Read an existing file (`"r"`).
    Read,
    /// Create or truncate, then write (`"w"`).
    Write,
    /// Create if missing, write at the end (`"a"`).
    Append,
    /// Create or truncate, then read and write (`"w+"`).
    ReadWrite,
    /// Create if missing, read anywhere, write at the end (`"a+"`).
    ReadAppend,
}

impl Permissions {
    /// The equivalent C `fopen` mode string.
    pub const fn mode(self) -> &'static str {
        match self {
            Permissions::Read => "r",
            Permissions::Write => "w",
            Permissions::Append => "a",
            Permissions::ReadWrite => "w+",
            Permissions::ReadAppend => "a+",
        }
    }

    /// Whether the mode allows writing.
    pub const fn is_writable(self) -> bool {
        !matches!(self, Permissions::Read)
    }

    fn open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            Permissions::Read => options.read(true),
            Permissions::Write => options.write(true).create(true).truncate(true),
            Permissions::Append => options.append(true).create(true),
            Permissions::ReadWrite => options.read(true).write(true).create(true).truncate(true),
            Permissions::ReadAppend => options.read(true).append(true).create(true),
        };
        options
    }
}

/// One logical file on disk, identified by its basename and [`FileType`].
///
/// An `AssetFile` is either Closed (no OS handle) or Open. It starts Closed,
/// becomes Open after a successful [`open`](AssetFile::open) and Closed again
/// after a successful [`close`](AssetFile::close). A failed operation never
/// changes the state.
///
/// The cached [`size`](AssetFile::size) is only meaningful after
/// [`get_size`](AssetFile::get_size), [`load`](AssetFile::load) or
/// [`write`](AssetFile::write) ran on the current handle.
///
/// Dropping an Open file releases the descriptor without the flush of
/// `close`; callers are expected to close explicitly.
#[derive(Debug)]
pub struct AssetFile {
    basename: String,
    file_type: FileType,
    handle: Option<File>,
    permissions: Option<Permissions>,
    size: u64,
    path: Option<ResolvedPath>,
}

impl AssetFile {
    /// Creates a Closed file description.
    pub fn new(basename: impl Into<String>, file_type: FileType) -> Self {
        Self {
            basename: basename.into(),
            file_type,
            handle: None,
            permissions: None,
            size: 0,
            path: None,
        }
    }

    /// The caller-supplied logical name.
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// The logical type.
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// The cached byte size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Overrides the cached byte size.
    pub fn set_size(&mut self, size: u64) {
        self.size = size;
    }

    /// Whether an OS handle is held.
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// The permissions of the current handle, if Open.
    pub fn permissions(&self) -> Option<Permissions> {
        self.permissions
    }

    /// The path of the last successful [`open`](AssetFile::open).
    pub fn path(&self) -> Option<&ResolvedPath> {
        self.path.as_ref()
    }

    /// Synthesizes this file's path without touching the filesystem.
    pub fn resolve(&self, config: &AssetConfig) -> Result<ResolvedPath> {
        synthesize(config, self.file_type, &self.basename)
    }

    fn path_string(&self) -> String {
        self.path
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| self.basename.clone())
    }

    fn not_open(&self) -> AssetError {
        AssetError::NotOpen {
            basename: self.basename.clone(),
        }
    }

    /// Resolves the path and opens the OS handle with `permissions`.
    ///
    /// # Errors
    /// - [`AssetError::AlreadyOpen`] if the file is Open.
    /// - [`AssetError::PathTooLong`] if the path cannot be synthesized.
    /// - [`AssetError::OpenFailed`] if the OS refuses, e.g. a missing file
    ///   under [`Permissions::Read`].
    pub fn open(&mut self, config: &AssetConfig, permissions: Permissions) -> Result<()> {
        if self.is_open() {
            log::error!("Asset '{}' is already open.", self.basename);
            return Err(AssetError::AlreadyOpen {
                basename: self.basename.clone(),
            });
        }

        let path = self.resolve(config)?;
        match permissions.open_options().open(&path) {
            Ok(handle) => {
                log::debug!("Opened '{path}' with mode \"{}\".", permissions.mode());
                self.handle = Some(handle);
                self.permissions = Some(permissions);
                self.path = Some(path);
                Ok(())
            }
            Err(source) => {
                log::error!(
                    "Failed to open '{path}' with mode \"{}\": {source}",
                    permissions.mode()
                );
                Err(AssetError::OpenFailed {
                    path: path.into(),
                    source,
                })
            }
        }
    }

    /// Flushes and releases the OS handle.
    ///
    /// Files opened for writing are synced to disk first; a failure there is
    /// reported as [`AssetError::CloseFailed`] and the file stays Open.
    pub fn close(&mut self) -> Result<()> {
        let path = self.path_string();
        let Some(mut handle) = self.handle.take() else {
            log::error!("Cannot close '{}': not open.", self.basename);
            return Err(self.not_open());
        };

        let writable = self.permissions.is_some_and(Permissions::is_writable);
        let flushed = handle.flush().and_then(|()| {
            if writable {
                handle.sync_all()
            } else {
                Ok(())
            }
        });

        if let Err(source) = flushed {
            log::error!("Failed to close '{path}': {source}");
            self.handle = Some(handle);
            return Err(AssetError::CloseFailed { path, source });
        }

        drop(handle);
        self.permissions = None;
        log::debug!("Closed '{path}'.");
        Ok(())
    }

    /// Queries the OS for the current byte length and caches it.
    ///
    /// This is a metadata query on the open handle, not a seek.
    pub fn get_size(&mut self) -> Result<u64> {
        let path = self.path_string();
        let handle = self.handle.as_ref().ok_or_else(|| self.not_open())?;
        match handle.metadata() {
            Ok(metadata) => {
                self.size = metadata.len();
                log::debug!("'{path}' is {} bytes.", self.size);
                Ok(self.size)
            }
            Err(source) => {
                log::error!("Failed to stat '{path}': {source}");
                Err(AssetError::StatFailed { path, source })
            }
        }
    }

    /// Reads exactly [`size`](AssetFile::size) bytes into `buffer`.
    ///
    /// For text-like types ([`FileType::is_text_like`]) a NUL byte is written
    /// at `buffer[size]`, so the buffer must hold `size + 1` bytes. Binary
    /// types are never terminated. Returns the number of content bytes read.
    ///
    /// # Errors
    /// - [`AssetError::BufferTooSmall`] if `buffer` cannot hold the content
    ///   (and terminator).
    /// - [`AssetError::ReadIncomplete`] if fewer than `size` bytes were read.
    pub fn load_into(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let path = self.path_string();
        if self.handle.is_none() {
            return Err(self.not_open());
        }

        let terminator = usize::from(self.file_type.is_text_like());
        let needed = usize::try_from(self.size)
            .ok()
            .and_then(|size| size.checked_add(terminator))
            .unwrap_or(usize::MAX);
        if buffer.len() < needed {
            log::error!(
                "Buffer of {} bytes is too small for '{path}' ({needed} bytes).",
                buffer.len()
            );
            return Err(AssetError::BufferTooSmall {
                path,
                needed,
                provided: buffer.len(),
            });
        }

        let size = needed - terminator;
        let Some(handle) = self.handle.as_mut() else {
            return Err(AssetError::NotOpen {
                basename: self.basename.clone(),
            });
        };
        let (read, source) = read_counted(handle, &mut buffer[..size]);
        if read < size {
            match &source {
                Some(err) => log::error!("Read {read} of {size} bytes from '{path}': {err}"),
                None => log::error!("Read {read} of {size} bytes from '{path}'."),
            }
            return Err(AssetError::ReadIncomplete {
                path,
                read: read as u64,
                expected: size as u64,
                source,
            });
        }

        if terminator == 1 {
            buffer[size] = 0;
        }
        log::debug!("Loaded {size} bytes from '{path}'.");
        Ok(size)
    }

    /// Queries the size and reads the whole file into a new vector.
    ///
    /// The vector holds exactly the file contents, never a terminator.
    pub fn load(&mut self) -> Result<Vec<u8>> {
        let size = self.get_size()?;
        let len = usize::try_from(size).map_err(|_| AssetError::BufferTooSmall {
            path: self.path_string(),
            needed: usize::MAX,
            provided: 0,
        })?;

        let mut buffer = vec![0u8; len + usize::from(self.file_type.is_text_like())];
        let read = self.load_into(&mut buffer)?;
        buffer.truncate(read);
        Ok(buffer)
    }

    /// Like [`load`](AssetFile::load), but decodes the contents as UTF-8.
    pub fn load_text(&mut self) -> Result<String> {
        let bytes = self.load()?;
        String::from_utf8(bytes).map_err(|source| {
            let path = self.path_string();
            log::error!("'{path}' is not valid UTF-8: {source}");
            AssetError::InvalidText { path, source }
        })
    }

    /// Writes all of `contents` and records its length as the file size.
    ///
    /// The slice length is authoritative: a size set earlier with
    /// [`set_size`](AssetFile::set_size) is replaced, never used to cut
    /// `contents` short.
    ///
    /// # Errors
    /// [`AssetError::WriteIncomplete`] if the OS accepted fewer bytes.
    pub fn write(&mut self, contents: &[u8]) -> Result<()> {
        let path = self.path_string();
        let handle = self.handle.as_mut().ok_or_else(|| AssetError::NotOpen {
            basename: self.basename.clone(),
        })?;

        let expected = contents.len();
        let (written, source) = write_counted(handle, contents);
        if written < expected {
            match &source {
                Some(err) => log::error!("Wrote {written} of {expected} bytes to '{path}': {err}"),
                None => log::error!("Wrote {written} of {expected} bytes to '{path}'."),
            }
            return Err(AssetError::WriteIncomplete {
                path,
                written: written as u64,
                expected: expected as u64,
                source,
            });
        }

        self.size = expected as u64;
        log::debug!("Wrote {expected} bytes to '{path}'.");
        Ok(())
    }
}

/// Reads until `buffer` is full, EOF, or an error, resuming on `Interrupted`.
fn read_counted(reader: &mut impl Read, buffer: &mut [u8]) -> (usize, Option<io::Error>) {
    let mut read = 0;
    while read < buffer.len() {
        match reader.read(&mut buffer[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return (read, Some(err)),
        }
    }
    (read, None)
}

/// Writes until `contents` is consumed, the writer stalls, or an error,
/// resuming on `Interrupted`.
fn write_counted(writer: &mut impl Write, contents: &[u8]) -> (usize, Option<io::Error>) {
    let mut written = 0;
    while written < contents.len() {
        match writer.write(&contents[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return (written, Some(err)),
        }
    }
    (written, None)
}

/// Opens, sizes, loads and closes an asset in one call.
pub fn read_asset(config: &AssetConfig, basename: &str, file_type: FileType) -> Result<Vec<u8>> {
    let mut file = AssetFile::new(basename, file_type);
    file.open(config, Permissions::Read)?;
    let contents = file.load();
    let closed = file.close();
    let contents = contents?;
    closed?;
    Ok(contents)
}

/// Creates or truncates an asset, writes `contents` and closes it.
pub fn write_asset(
    config: &AssetConfig,
    basename: &str,
    file_type: FileType,
    contents: &[u8],
) -> Result<()> {
    let mut file = AssetFile::new(basename, file_type);
    file.open(config, Permissions::Write)?;
    let written = file.write(contents);
    let closed = file.close();
    written?;
    closed
}
