//! 块替换
//!
//! 删除源图纸模型空间中某个块的全部块参照，用模板图纸中的同名定义替换
//! 原定义，并在锚点处插入一个新的块参照。

use crate::document::Document;
use crate::error::FileError;
use blockswap_core::block::{BlockName, Placement};
use blockswap_core::math::Point2;
use blockswap_core::outcome::ReplaceOutcome;
use std::path::Path;
use tracing::{debug, info};

/// 块替换选项
#[derive(Debug, Clone)]
pub struct ReplaceOptions {
    /// 新块参照的插入点
    pub anchor: Point2,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            anchor: Point2::origin(),
        }
    }
}

/// 替换块（默认选项）
///
/// 输入文件不会被修改；结果写入 `output`。
pub fn replace_block(
    source: &Path,
    output: &Path,
    block_name: &str,
    template: &Path,
) -> Result<ReplaceOutcome, FileError> {
    let name = BlockName::new(block_name)?;
    replace_block_with(source, output, &name, template, &ReplaceOptions::default())
}

/// 替换块
pub fn replace_block_with(
    source: &Path,
    output: &Path,
    name: &BlockName,
    template: &Path,
    options: &ReplaceOptions,
) -> Result<ReplaceOutcome, FileError> {
    if source == output {
        return Err(FileError::Save {
            path: output.to_path_buf(),
            message: "output path must differ from the source drawing".to_string(),
        });
    }

    let mut document = Document::open(source)?;

    // 先删除块参照，再删除定义
    let removed = document.remove_placements(name);

    let template = Document::open(template)?;
    let replacement = template.block(name);

    // 图纸空间仍引用该块且没有替换定义时保留原定义
    let still_referenced = document.reference_count(name);
    if replacement.is_none() && still_referenced > 0 {
        debug!(
            "Keeping definition of block '{}': {} paper space reference(s) remain",
            name, still_referenced
        );
    } else {
        let deleted = document.remove_block(name);
        debug!("Deleted {} definition(s) of block '{}'", deleted, name);
    }

    let replaced = match replacement {
        Some(block) => {
            document.copy_block_from(block);
            document.add_placement(&Placement::new(block.name.clone(), options.anchor));
            true
        }
        None => {
            debug!("Template has no block '{}', nothing inserted", name);
            false
        }
    };

    document.save_as(output)?;

    info!(
        "Replaced block '{}' in {}: removed {} placement(s), replacement {}",
        name,
        source.display(),
        removed,
        if replaced { "inserted" } else { "skipped" }
    );

    Ok(ReplaceOutcome { removed, replaced })
}
