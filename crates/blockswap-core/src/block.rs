//! 块名称和块参照
//!
//! 块是一组实体的集合，按名称定义一次，可以被重复插入。
//! 块参照（INSERT）按名称引用块定义，拥有自己的插入点。

use crate::math::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 块名称错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockNameError {
    #[error("Block name is empty")]
    Empty,

    #[error("Block name contains a control character: {0:?}")]
    ControlCharacter(String),
}

/// 块名称
///
/// DXF 符号表中的名称不区分大小写，比较时按 ASCII 折叠大小写。
/// 前后空白在构造时去除。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockName(String);

impl BlockName {
    /// 创建块名称
    pub fn new(name: impl AsRef<str>) -> Result<Self, BlockNameError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(BlockNameError::Empty);
        }
        if name.chars().any(char::is_control) {
            return Err(BlockNameError::ControlCharacter(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// 名称文本
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 判断另一个名称是否指向同一个块
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq for BlockName {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Eq for BlockName {}

impl fmt::Display for BlockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BlockName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 块参照
///
/// 模型空间中的一次块插入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    /// 参照的块名称
    pub block_name: String,
    /// 插入点
    pub insertion_point: Point2,
}

impl Placement {
    /// 创建块参照
    pub fn new(block_name: impl Into<String>, insertion_point: Point2) -> Self {
        Self {
            block_name: block_name.into(),
            insertion_point,
        }
    }

    /// 是否引用指定块
    pub fn references(&self, name: &BlockName) -> bool {
        name.matches(&self.block_name)
    }
}
