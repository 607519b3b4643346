//! BlockSwap 核心类型
//!
//! 批量替换 DXF 图纸中块定义所需的领域类型。
//!
//! # 架构设计
//!
//! - `BlockName`: 块名称（DXF 符号表语义，大小写不敏感）
//! - `Placement`: 模型空间中的块参照
//! - `ReplaceOutcome` / `BatchReport`: 单文件与批处理结果
//!
//! # 示例
//!
//! ```rust
//! use blockswap_core::prelude::*;
//!
//! let name = BlockName::new("Title-Block").unwrap();
//! let placement = Placement::new("TITLE-BLOCK", Point2::origin());
//!
//! assert!(placement.references(&name));
//! ```

pub mod block;
pub mod math;
pub mod outcome;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::block::{BlockName, BlockNameError, Placement};
    pub use crate::math::Point2;
    pub use crate::outcome::{BatchReport, FileFailure, FileOutcome, ReplaceOutcome};
}
