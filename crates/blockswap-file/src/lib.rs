//! BlockSwap 文件处理
//!
//! 支持：
//! - `.dxf` 读写与块表编辑
//! - 单文件块替换
//! - `.zip` 批处理（解包、逐个替换、重新打包）

pub mod archive;
pub mod batch;
pub mod document;
pub mod dxf_io;
pub mod error;
pub mod replace;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch::{run_batch, run_batch_in, BatchOptions, BatchOutput, BatchRequest, Upload};
pub use document::Document;
pub use error::{ArchiveOperation, FileError};
pub use replace::{replace_block, replace_block_with, ReplaceOptions};
