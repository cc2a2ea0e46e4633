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

//! Synchronous execution of external tools.
//!
//! A tool is an [`AssetFile`] of type [`FileType::SystemExecutable`], resolved
//! against the system root. [`execute`] spawns it with the resolved path as
//! `argv[0]`, blocks until it terminates and reports its exit code. There is
//! no timeout: a tool that hangs blocks the caller.
//!
//! Exec failures inside the child (missing interpreter, bad binary format,
//! permission races) are sent back to the parent by `std::process` before
//! `spawn` returns, so they surface as [`AssetError::ExecFailed`] and are never
//! confused with a tool that ran and exited nonzero.

use crate::config::AssetConfig;
use crate::error::{AssetError, Result};
use crate::file::AssetFile;
use crate::file_type::FileType;
use crate::path::ResolvedPath;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::process::{Command, ExitStatus};

/// Returns `true` if `path` names a regular file with any execute bit set.
///
/// This is a mode-bit check, not an access check for the current user: a file
/// executable only by another owner or group passes here and is then
/// reported by [`execute`] as [`AssetError::ExecFailed`] when the OS refuses
/// it. On non-Unix platforms any regular file qualifies.
pub fn is_executable(path: &ResolvedPath) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    let executable = {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    };
    #[cfg(not(unix))]
    let executable = true;

    executable
}

/// Splits a `spawn` error into resource exhaustion in the parent and a failure
/// of the child to exec the target.
fn classify_spawn_error(path: &ResolvedPath, source: io::Error) -> AssetError {
    let path = path.to_string();
    match source.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory | io::ErrorKind::Interrupted => {
            AssetError::SpawnFailed { path, source }
        }
        _ => AssetError::ExecFailed { path, source },
    }
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<i32> {
    None
}

/// Runs `file` with `args` and waits for it to finish.
///
/// The child sees `[resolved_path, args...]` as its argument vector and
/// inherits the caller's standard streams.
///
/// Returns the child's exit code, zero or not.
///
/// # Errors
/// - [`AssetError::WrongFileType`] if `file` is not a `SystemExecutable`.
/// - [`AssetError::Config`] if `config` is invalid, e.g. has an empty
///   system root.
/// - [`AssetError::PathTooLong`] if its path cannot be synthesized.
/// - [`AssetError::NotExecutable`] if the path is missing, not a regular file
///   or lacks execute permission.
/// - [`AssetError::SpawnFailed`] if no process could be created.
/// - [`AssetError::ExecFailed`] if the child could not run the target.
/// - [`AssetError::WaitFailed`] if waiting for the child failed.
/// - [`AssetError::AbnormalTermination`] if the child ended without an exit
///   code, e.g. because it was killed by a signal.
pub fn execute<I, S>(config: &AssetConfig, file: &AssetFile, args: I) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    if file.file_type() != FileType::SystemExecutable {
        log::error!(
            "Cannot execute '{}': it is a {:?}, not a system executable.",
            file.basename(),
            file.file_type()
        );
        return Err(AssetError::WrongFileType {
            basename: file.basename().to_string(),
            expected: "SystemExecutable",
            found: file.file_type(),
        });
    }

    config.validate()?;
    let path = file.resolve(config)?;
    if !is_executable(&path) {
        log::error!("'{path}' is not an executable file.");
        return Err(AssetError::NotExecutable {
            path: path.into(),
        });
    }

    let args: Vec<OsString> = args
        .into_iter()
        .map(|arg| arg.as_ref().to_os_string())
        .collect();
    log::debug!("Executing '{path}' with arguments {args:?}.");

    let mut child = Command::new(path.as_path())
        .args(&args)
        .spawn()
        .map_err(|source| {
            log::error!("Failed to start '{path}': {source}");
            classify_spawn_error(&path, source)
        })?;

    let status = child.wait().map_err(|source| {
        log::error!("Failed to wait for '{path}': {source}");
        AssetError::WaitFailed {
            path: path.to_string(),
            source,
        }
    })?;

    match status.code() {
        Some(code) => {
            log::debug!("'{path}' exited with status {code}.");
            Ok(code)
        }
        None => {
            let signal = terminating_signal(status);
            log::error!("'{path}' terminated abnormally ({status}).");
            Err(AssetError::AbnormalTermination {
                path: path.into(),
                signal,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_executables_are_rejected_before_resolution() {
        let config = AssetConfig::default();
        let file = AssetFile::new("readme", FileType::Text);

        let err = execute(&config, &file, ["--help"]).unwrap_err();
        assert!(matches!(
            err,
            AssetError::WrongFileType {
                found: FileType::Text,
                ..
            }
        ));
    }

    #[test]
    fn missing_tool_is_not_executable() {
        let config = AssetConfig::with_roots("./Resources", "/definitely/not/a/bin/dir");
        let file = AssetFile::new("tool", FileType::SystemExecutable);

        let err = execute(&config, &file, std::iter::empty::<&str>()).unwrap_err();
        assert!(matches!(err, AssetError::NotExecutable { .. }));
    }

    #[test]
    fn empty_system_root_is_a_config_error() {
        let config = AssetConfig::with_roots("./Resources", "");
        let file = AssetFile::new("sh", FileType::SystemExecutable);

        let err = execute(&config, &file, ["-c", "exit 0"]).unwrap_err();
        assert!(matches!(err, AssetError::Config(_)));
    }

    #[test]
    fn resource_errors_are_spawn_failures() {
        let config = AssetConfig::default();
        let path = AssetFile::new("tool", FileType::SystemExecutable)
            .resolve(&config)
            .unwrap();

        let spawn = classify_spawn_error(&path, io::Error::from(io::ErrorKind::OutOfMemory));
        let exec = classify_spawn_error(&path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(spawn, AssetError::SpawnFailed { .. }));
        assert!(matches!(exec, AssetError::ExecFailed { .. }));
    }
}
