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

use anyhow::Result;
use std::fs;
use tempfile::{tempdir, TempDir};
use waterlily_assets::{
    read_asset, write_asset, AssetConfig, AssetError, AssetFile, FileType, Permissions,
};

/// Creates an asset root with the shader subdirectories in place.
fn asset_root() -> Result<(TempDir, AssetConfig)> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("Shaders/Source"))?;
    fs::create_dir_all(dir.path().join("Shaders/Compiled"))?;
    let root = dir.path().to_str().expect("temp dir is UTF-8").to_string();
    let config = AssetConfig::with_roots(root, "/usr/bin");
    Ok((dir, config))
}

#[test]
fn test_write_close_reopen_load_round_trip() -> Result<()> {
    let (_dir, config) = asset_root()?;
    let contents: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

    let mut file = AssetFile::new("blob", FileType::ShaderVertexBinary);
    file.open(&config, Permissions::Write)?;
    file.write(&contents)?;
    assert_eq!(file.size(), contents.len() as u64);
    file.close()?;
    assert!(!file.is_open());

    file.open(&config, Permissions::Read)?;
    assert_eq!(file.get_size()?, contents.len() as u64);
    let mut buffer = vec![0u8; contents.len()];
    let read = file.load_into(&mut buffer)?;
    file.close()?;

    assert_eq!(read, contents.len());
    assert_eq!(buffer, contents);
    Ok(())
}

#[test]
fn test_round_trip_lands_at_the_synthesized_path() -> Result<()> {
    let (dir, config) = asset_root()?;

    write_asset(&config, "triangle", FileType::ShaderFragmentSource, b"void main() {}")?;

    let on_disk = fs::read(dir.path().join("Shaders/Source/triangle.frag"))?;
    assert_eq!(on_disk, b"void main() {}");
    assert_eq!(
        read_asset(&config, "triangle", FileType::ShaderFragmentSource)?,
        b"void main() {}"
    );
    Ok(())
}

#[test]
fn test_open_missing_file_for_read_stays_closed() -> Result<()> {
    let (_dir, config) = asset_root()?;
    let mut file = AssetFile::new("missing", FileType::Text);

    let err = file.open(&config, Permissions::Read).unwrap_err();

    assert!(matches!(err, AssetError::OpenFailed { .. }));
    assert!(err.to_string().contains("missing.txt"));
    assert!(!file.is_open());
    assert!(file.path().is_none());
    assert!(matches!(file.get_size(), Err(AssetError::NotOpen { .. })));
    Ok(())
}

#[test]
fn test_open_twice_is_rejected_and_keeps_the_handle() -> Result<()> {
    let (_dir, config) = asset_root()?;
    let mut file = AssetFile::new("notes", FileType::Text);
    file.open(&config, Permissions::Write)?;

    let err = file.open(&config, Permissions::Read).unwrap_err();

    assert!(matches!(err, AssetError::AlreadyOpen { .. }));
    assert!(file.is_open());
    assert_eq!(file.permissions(), Some(Permissions::Write));
    file.close()?;
    Ok(())
}

#[test]
fn test_text_loads_are_nul_terminated() -> Result<()> {
    let (_dir, config) = asset_root()?;
    write_asset(&config, "notes", FileType::Text, b"hello")?;

    let mut file = AssetFile::new("notes", FileType::Text);
    file.open(&config, Permissions::Read)?;
    file.get_size()?;

    let mut buffer = [0xFFu8; 6];
    assert_eq!(file.load_into(&mut buffer)?, 5);
    assert_eq!(&buffer, b"hello\0");
    file.close()?;
    Ok(())
}

#[test]
fn test_text_load_needs_room_for_the_terminator() -> Result<()> {
    let (_dir, config) = asset_root()?;
    write_asset(&config, "notes", FileType::Text, b"hello")?;

    let mut file = AssetFile::new("notes", FileType::Text);
    file.open(&config, Permissions::Read)?;
    file.get_size()?;

    let mut buffer = [0u8; 5];
    let err = file.load_into(&mut buffer).unwrap_err();
    assert!(matches!(
        err,
        AssetError::BufferTooSmall {
            needed: 6,
            provided: 5,
            ..
        }
    ));
    assert!(file.is_open());
    file.close()?;
    Ok(())
}

#[test]
fn test_binary_loads_are_not_terminated() -> Result<()> {
    let (_dir, config) = asset_root()?;
    write_asset(&config, "quad", FileType::ShaderVertexBinary, &[1, 2, 3])?;

    let mut file = AssetFile::new("quad", FileType::ShaderVertexBinary);
    file.open(&config, Permissions::Read)?;
    file.get_size()?;

    let mut buffer = [0xAAu8; 4];
    assert_eq!(file.load_into(&mut buffer)?, 3);
    assert_eq!(buffer, [1, 2, 3, 0xAA]);
    file.close()?;
    Ok(())
}

#[test]
fn test_short_read_is_reported_and_file_stays_open() -> Result<()> {
    let (_dir, config) = asset_root()?;
    write_asset(&config, "short", FileType::Text, b"abcd")?;

    let mut file = AssetFile::new("short", FileType::Text);
    file.open(&config, Permissions::Read)?;
    file.set_size(10);

    let mut buffer = [0u8; 11];
    let err = file.load_into(&mut buffer).unwrap_err();
    assert!(matches!(
        err,
        AssetError::ReadIncomplete {
            read: 4,
            expected: 10,
            ..
        }
    ));
    assert!(file.is_open());
    file.close()?;
    Ok(())
}

#[test]
fn test_write_on_read_only_handle_is_incomplete() -> Result<()> {
    let (_dir, config) = asset_root()?;
    write_asset(&config, "locked", FileType::Text, b"data")?;

    let mut file = AssetFile::new("locked", FileType::Text);
    file.open(&config, Permissions::Read)?;

    let err = file.write(b"more").unwrap_err();
    assert!(matches!(
        err,
        AssetError::WriteIncomplete {
            written: 0,
            expected: 4,
            source: Some(_),
            ..
        }
    ));
    assert!(file.is_open());
    file.close()?;
    Ok(())
}

#[test]
fn test_write_length_comes_from_the_slice_not_the_cached_size() -> Result<()> {
    let (dir, config) = asset_root()?;
    let mut file = AssetFile::new("sized", FileType::Text);
    file.open(&config, Permissions::Write)?;

    file.set_size(2);
    file.write(b"hello")?;
    assert_eq!(file.size(), 5);
    file.close()?;

    assert_eq!(fs::read(dir.path().join("sized.txt"))?, b"hello");
    Ok(())
}

#[test]
fn test_empty_basename_writes_inside_the_asset_root() -> Result<()> {
    let (dir, config) = asset_root()?;

    write_asset(&config, "", FileType::Text, b"unnamed")?;

    assert_eq!(fs::read(dir.path().join(".txt"))?, b"unnamed");
    let sibling = format!("{}.txt", dir.path().display());
    assert!(!std::path::Path::new(&sibling).exists());
    Ok(())
}

#[test]
fn test_append_extends_existing_contents() -> Result<()> {
    let (_dir, config) = asset_root()?;
    write_asset(&config, "log", FileType::Text, b"first\n")?;

    let mut file = AssetFile::new("log", FileType::Text);
    file.open(&config, Permissions::Append)?;
    file.write(b"second\n")?;
    file.close()?;

    file.open(&config, Permissions::Read)?;
    assert_eq!(file.load_text()?, "first\nsecond\n");
    file.close()?;
    Ok(())
}

#[test]
fn test_read_write_truncates_and_sizes_by_stat() -> Result<()> {
    let (_dir, config) = asset_root()?;
    write_asset(&config, "scratch", FileType::Text, b"a much longer original body")?;

    let mut file = AssetFile::new("scratch", FileType::Text);
    file.open(&config, Permissions::ReadWrite)?;
    assert_eq!(file.get_size()?, 0);
    file.write(b"short")?;
    assert_eq!(file.get_size()?, 5);
    file.close()?;
    Ok(())
}

#[test]
fn test_load_text_rejects_invalid_utf8() -> Result<()> {
    let (_dir, config) = asset_root()?;
    write_asset(&config, "garbage", FileType::Text, &[0xFF, 0xFE, 0x00])?;

    let mut file = AssetFile::new("garbage", FileType::Text);
    file.open(&config, Permissions::Read)?;
    assert!(matches!(file.load_text(), Err(AssetError::InvalidText { .. })));
    file.close()?;
    Ok(())
}

#[test]
fn test_over_long_basename_never_touches_the_filesystem() -> Result<()> {
    let (_dir, mut config) = asset_root()?;
    config.max_path_length = 64;
    let basename = "x".repeat(128);

    let mut file = AssetFile::new(basename, FileType::Text);
    let err = file.open(&config, Permissions::Write).unwrap_err();

    assert!(matches!(err, AssetError::PathTooLong { limit: 64, .. }));
    assert!(!file.is_open());
    Ok(())
}
