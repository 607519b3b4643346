//! DXF文件读写
//!
//! 直接使用 dxf crate 的 `Drawing`，不做实体转换，保存时保留源图纸的全部内容。

use crate::error::FileError;
use std::path::Path;
use tracing::{debug, warn};

/// 从DXF文件加载图纸
pub fn load(path: &Path) -> Result<dxf::Drawing, FileError> {
    let drawing = dxf::Drawing::load_file(path).map_err(|e| FileError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!(
        "Loaded {} ({} entities, {} blocks)",
        path.display(),
        drawing.entities().count(),
        drawing.blocks().count()
    );

    Ok(drawing)
}

/// 保存图纸到DXF文件
///
/// 写入失败时删除不完整的输出文件。
pub fn save(drawing: &dxf::Drawing, path: &Path) -> Result<(), FileError> {
    if let Err(e) = drawing.save_file(path) {
        if path.exists() {
            if let Err(remove_err) = std::fs::remove_file(path) {
                warn!(
                    "Failed to remove partial output {}: {}",
                    path.display(),
                    remove_err
                );
            }
        }
        return Err(FileError::Save {
            path: path.to_path_buf(),
            message: e.to_string(),
        });
    }

    debug!("Saved {}", path.display());
    Ok(())
}

/// 扩展名是否匹配（不区分大小写）
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/b/plan.DXF"), "dxf"));
        assert!(has_extension(Path::new("plan.dxf"), "dxf"));
        assert!(!has_extension(Path::new("plan.dwg"), "dxf"));
        assert!(!has_extension(Path::new("dxf"), "dxf"));
    }

    #[test]
    fn test_load_garbage_is_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.dxf");
        std::fs::write(&path, "this is not a drawing\nat all\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, FileError::Load { .. }));
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope.dxf")).unwrap_err();
        assert!(matches!(err, FileError::Load { .. }));
    }

    #[test]
    fn test_save_to_missing_directory_is_save_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("out.dxf");

        let err = save(&dxf::Drawing::new(), &path).unwrap_err();
        assert!(matches!(err, FileError::Save { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.dxf");

        save(&dxf::Drawing::new(), &path).unwrap();
        assert!(load(&path).is_ok());
    }
}
