//! 文件操作错误定义

use blockswap_core::block::BlockNameError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 压缩包操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOperation {
    /// 打开上传的压缩包
    Open,
    /// 解压上传的压缩包
    Extract,
    /// 生成输出压缩包
    Build,
}

impl fmt::Display for ArchiveOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ArchiveOperation::Open => "open input archive",
            ArchiveOperation::Extract => "extract input archive",
            ArchiveOperation::Build => "build output archive",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug)]
pub enum FileError {
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("Invalid block name: {0}")]
    InvalidBlockName(BlockNameError),

    #[error("Failed to load {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },

    #[error("Failed to save {}: {message}", .path.display())]
    Save { path: PathBuf, message: String },

    #[error("Failed to {operation}: {message}")]
    Archive {
        operation: ArchiveOperation,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BlockNameError> for FileError {
    fn from(err: BlockNameError) -> Self {
        match err {
            BlockNameError::Empty => FileError::MissingInput("block name"),
            other => FileError::InvalidBlockName(other),
        }
    }
}

impl FileError {
    pub(crate) fn archive(operation: ArchiveOperation, err: impl fmt::Display) -> Self {
        FileError::Archive {
            operation,
            message: err.to_string(),
        }
    }

    /// 不含工作目录路径的简短原因，用于按文件名汇报
    pub fn reason(&self) -> String {
        match self {
            FileError::Load { path, message } => {
                format!("cannot load {}: {}", display_name(path), message)
            }
            FileError::Save { path, message } => {
                format!("cannot save {}: {}", display_name(path), message)
            }
            other => other.to_string(),
        }
    }

    /// 是否为输入缺失（整批不执行）
    pub fn is_missing_input(&self) -> bool {
        matches!(self, FileError::MissingInput(_))
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_error_names_operation() {
        let err = FileError::archive(ArchiveOperation::Build, "disk full");
        assert_eq!(err.to_string(), "Failed to build output archive: disk full");
    }

    #[test]
    fn test_empty_block_name_is_missing_input() {
        let err: FileError = BlockNameError::Empty.into();
        assert!(err.is_missing_input());
        assert_eq!(err.to_string(), "Missing input: block name");
    }

    #[test]
    fn test_reason_drops_directory() {
        let err = FileError::Load {
            path: PathBuf::from("/tmp/work/input/0/plan.dxf"),
            message: "bad group code".to_string(),
        };
        assert_eq!(err.reason(), "cannot load plan.dxf: bad group code");
    }
}
