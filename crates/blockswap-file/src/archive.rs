//! ZIP压缩包读写
//!
//! 解包时只保留扩展名匹配的文件条目，写出路径限制在目标目录内。

use crate::dxf_io::has_extension;
use crate::error::{ArchiveOperation, FileError};
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// 解包得到的图纸文件
#[derive(Debug, Clone)]
pub struct ExtractedFile {
    /// 条目的文件名（不含目录）
    pub file_name: String,
    /// 解包后的磁盘路径
    pub path: PathBuf,
}

/// 解包扩展名匹配的文件，按压缩包中的顺序返回
///
/// 每个条目写入 `dest/<序号>/<文件名>`，同名条目互不覆盖。
pub fn extract_matching(
    archive: &[u8],
    dest: &Path,
    extension: &str,
) -> Result<Vec<ExtractedFile>, FileError> {
    let mut zip = ZipArchive::new(Cursor::new(archive))
        .map_err(|e| FileError::archive(ArchiveOperation::Open, e))?;

    let mut extracted = Vec::new();

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| FileError::archive(ArchiveOperation::Extract, e))?;

        if entry.is_dir() {
            continue;
        }

        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping archive entry with unsafe path: {}", entry.name());
            continue;
        };

        if !has_extension(&relative, extension) {
            debug!("Skipping non-drawing entry: {}", entry.name());
            continue;
        }

        let Some(file_name) = relative.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let file_name = file_name.to_string();

        let entry_dir = dest.join(index.to_string());
        std::fs::create_dir_all(&entry_dir)
            .map_err(|e| FileError::archive(ArchiveOperation::Extract, e))?;

        let path = entry_dir.join(&file_name);
        let mut out =
            File::create(&path).map_err(|e| FileError::archive(ArchiveOperation::Extract, e))?;
        std::io::copy(&mut entry, &mut out)
            .map_err(|e| FileError::archive(ArchiveOperation::Extract, e))?;

        extracted.push(ExtractedFile { file_name, path });
    }

    Ok(extracted)
}

/// 将文件打包为ZIP，条目名为给定名称
pub fn pack(files: &[(String, PathBuf)]) -> Result<Vec<u8>, FileError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, path) in files {
        let data =
            std::fs::read(path).map_err(|e| FileError::archive(ArchiveOperation::Build, e))?;
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| FileError::archive(ArchiveOperation::Build, e))?;
        writer
            .write_all(&data)
            .map_err(|e| FileError::archive(ArchiveOperation::Build, e))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| FileError::archive(ArchiveOperation::Build, e))?;

    Ok(cursor.into_inner())
}

/// 列出ZIP中的文件条目名称
#[cfg(test)]
pub(crate) fn entry_names(archive: &[u8]) -> Result<Vec<String>, FileError> {
    let mut zip = ZipArchive::new(Cursor::new(archive))
        .map_err(|e| FileError::archive(ArchiveOperation::Open, e))?;

    let mut names = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        let entry = zip
            .by_index(index)
            .map_err(|e| FileError::archive(ArchiveOperation::Extract, e))?;
        if !entry.is_dir() {
            names.push(entry.name().to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
pub(crate) fn build_zip(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_filters_by_extension() {
        let archive = build_zip(&[
            ("a.dxf", b"A".to_vec()),
            ("notes.txt", b"ignored".to_vec()),
            ("drawings/", Vec::new()),
            ("drawings/B.DXF", b"B".to_vec()),
            ("drawings/c.dwg", b"ignored".to_vec()),
        ]);
        let dir = TempDir::new().unwrap();

        let files = extract_matching(&archive, dir.path(), "dxf").unwrap();

        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.dxf", "B.DXF"]);
        assert_eq!(std::fs::read(&files[1].path).unwrap(), b"B");
    }

    #[test]
    fn test_extract_keeps_same_named_entries_apart() {
        let archive = build_zip(&[("x/plan.dxf", b"1".to_vec()), ("y/plan.dxf", b"2".to_vec())]);
        let dir = TempDir::new().unwrap();

        let files = extract_matching(&archive, dir.path(), "dxf").unwrap();

        assert_eq!(files.len(), 2);
        assert_ne!(files[0].path, files[1].path);
        assert_eq!(std::fs::read(&files[0].path).unwrap(), b"1");
        assert_eq!(std::fs::read(&files[1].path).unwrap(), b"2");
    }

    #[test]
    fn test_extract_invalid_archive() {
        let dir = TempDir::new().unwrap();
        let err = extract_matching(b"definitely not a zip", dir.path(), "dxf").unwrap_err();

        assert!(matches!(
            err,
            FileError::Archive {
                operation: ArchiveOperation::Open,
                ..
            }
        ));
    }

    #[test]
    fn test_pack_uses_given_names() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("1.bin");
        let second = dir.path().join("2.bin");
        std::fs::write(&first, b"one").unwrap();
        std::fs::write(&second, b"two").unwrap();

        let bytes = pack(&[
            ("first.dxf".to_string(), first),
            ("second.dxf".to_string(), second),
        ])
        .unwrap();

        assert_eq!(entry_names(&bytes).unwrap(), vec!["first.dxf", "second.dxf"]);
    }

    #[test]
    fn test_pack_empty() {
        let bytes = pack(&[]).unwrap();
        assert!(entry_names(&bytes).unwrap().is_empty());
    }
}
