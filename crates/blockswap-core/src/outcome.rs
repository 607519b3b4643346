//! 处理结果
//!
//! 单文件替换结果与整批汇总。

use serde::{Deserialize, Serialize};

/// 单个文件块替换的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReplaceOutcome {
    /// 从模型空间删除的块参照数量
    pub removed: usize,
    /// 是否从模板复制了新定义并插入了一个参照
    pub replaced: bool,
}

/// 失败文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub file: String,
    pub message: String,
}

/// 批处理中单个文件的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Success { file: String, outcome: ReplaceOutcome },
    Failure(FileFailure),
}

impl FileOutcome {
    /// 文件名
    pub fn file(&self) -> &str {
        match self {
            FileOutcome::Success { file, .. } => file,
            FileOutcome::Failure(failure) => &failure.file,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Success { .. })
    }
}

/// 批处理汇总
///
/// 按处理顺序记录每个文件的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub block_name: String,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new(block_name: impl Into<String>) -> Self {
        Self {
            block_name: block_name.into(),
            outcomes: Vec::new(),
        }
    }

    /// 记录成功
    pub fn record_success(&mut self, file: impl Into<String>, outcome: ReplaceOutcome) {
        self.outcomes.push(FileOutcome::Success {
            file: file.into(),
            outcome,
        });
    }

    /// 记录失败
    pub fn record_failure(&mut self, file: impl Into<String>, message: impl Into<String>) {
        self.outcomes.push(FileOutcome::Failure(FileFailure {
            file: file.into(),
            message: message.into(),
        }));
    }

    /// 成功文件数
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// 所有失败
    pub fn failures(&self) -> impl Iterator<Item = &FileFailure> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Failure(failure) => Some(failure),
            FileOutcome::Success { .. } => None,
        })
    }

    /// 所有成功文件中删除的块参照总数
    pub fn total_removed(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                FileOutcome::Success { outcome, .. } => outcome.removed,
                FileOutcome::Failure(_) => 0,
            })
            .sum()
    }

    /// 成功汇总信息
    pub fn summary(&self) -> String {
        format!("Processed {} file(s) successfully.", self.success_count())
    }

    /// 每个失败文件一行错误信息
    pub fn failure_messages(&self) -> Vec<String> {
        self.failures()
            .map(|f| format!("Failed on {}: {}", f.file, f.message))
            .collect()
    }
}
