//! 表单状态管理

use blockswap_file::{BatchOutput, BatchRequest, FileError, Upload};
use tracing::{info, warn};

/// 状态信息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// 状态信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// 表单状态
#[derive(Debug, Default)]
pub struct FormState {
    /// 要替换的块名称
    pub block_name: String,
    /// 模板图纸
    pub template: Option<Upload>,
    /// 图纸压缩包
    pub archive: Option<Upload>,
    /// 是否正在处理
    pub processing: bool,
    /// 状态信息（每次提交后重置）
    pub messages: Vec<StatusMessage>,
    /// 上次成功处理的输出
    pub output: Option<BatchOutput>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 根据当前输入构造批处理请求
    pub fn request(&self) -> BatchRequest {
        BatchRequest {
            block_name: self.block_name.clone(),
            template: self.template.clone(),
            archive: self.archive.clone(),
        }
    }

    /// 提交表单
    ///
    /// 输入不完整时给出警告并返回 `None`，否则进入处理状态并返回请求。
    pub fn submit(&mut self) -> Option<BatchRequest> {
        self.messages.clear();
        self.output = None;

        let request = self.request();
        if let Err(e) = request.validate() {
            warn!("Submit rejected: {}", e);
            self.push(
                MessageLevel::Warning,
                "Please provide all required inputs.",
            );
            self.push(MessageLevel::Warning, e.to_string());
            return None;
        }

        self.processing = true;
        Some(request)
    }

    /// 应用批处理结果
    pub fn finish(&mut self, result: Result<BatchOutput, FileError>) {
        self.processing = false;

        match result {
            Ok(output) => {
                for line in output.report.failure_messages() {
                    self.push(MessageLevel::Error, line);
                }
                self.push(MessageLevel::Success, output.report.summary());
                info!("{}", output.report.summary());
                self.output = Some(output);
            }
            Err(e) if e.is_missing_input() => {
                self.push(MessageLevel::Warning, e.to_string());
            }
            Err(e) => {
                self.push(MessageLevel::Error, e.to_string());
            }
        }
    }

    /// 后台任务意外终止
    pub fn abort(&mut self, reason: impl Into<String>) {
        self.processing = false;
        self.push(MessageLevel::Error, reason);
    }

    pub fn push(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(StatusMessage::new(level, text));
    }

    /// 三项输入是否都已提供
    pub fn is_complete(&self) -> bool {
        self.request().validate().is_ok()
    }
}
