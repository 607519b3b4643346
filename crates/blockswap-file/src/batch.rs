//! 批处理
//!
//! 在临时工作目录中解包上传的压缩包，对每个图纸执行块替换，
//! 再将成功的输出重新打包。工作目录在任何退出路径上都会被删除。

use crate::archive;
use crate::error::FileError;
use crate::replace::{replace_block_with, ReplaceOptions};
use blockswap_core::block::BlockName;
use blockswap_core::outcome::BatchReport;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 上传的文件
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 读取磁盘文件作为上传
    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }
}

/// 批处理请求（表单输入）
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    pub block_name: String,
    pub template: Option<Upload>,
    pub archive: Option<Upload>,
}

impl BatchRequest {
    /// 检查必填输入
    pub fn validate(&self) -> Result<(BlockName, &Upload, &Upload), FileError> {
        let name = BlockName::new(&self.block_name)?;
        let template = self
            .template
            .as_ref()
            .ok_or(FileError::MissingInput("template drawing"))?;
        let archive = self
            .archive
            .as_ref()
            .ok_or(FileError::MissingInput("drawing archive"))?;
        Ok((name, template, archive))
    }
}

/// 批处理选项
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// 图纸扩展名（不含点，不区分大小写）
    pub extension: String,
    pub replace: ReplaceOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            extension: "dxf".to_string(),
            replace: ReplaceOptions::default(),
        }
    }
}

impl BatchOptions {
    /// 输出压缩包名称，如 `updated_dxf.zip`
    pub fn output_archive_name(&self) -> String {
        format!("updated_{}.zip", self.extension.to_ascii_lowercase())
    }
}

/// 批处理输出
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub report: BatchReport,
    pub archive_name: String,
    /// 输出压缩包内容
    pub archive: Vec<u8>,
}

/// 在系统临时目录中运行批处理
pub fn run_batch(request: &BatchRequest, options: &BatchOptions) -> Result<BatchOutput, FileError> {
    run_batch_in(request, options, &std::env::temp_dir())
}

/// 在指定父目录下创建工作目录并运行批处理
pub fn run_batch_in(
    request: &BatchRequest,
    options: &BatchOptions,
    work_parent: &Path,
) -> Result<BatchOutput, FileError> {
    let (name, template, upload) = request.validate()?;

    let work_dir = tempfile::Builder::new()
        .prefix("blockswap-")
        .tempdir_in(work_parent)?;
    let root = work_dir.path();

    let template_path = root.join(format!("template.{}", options.extension));
    std::fs::write(&template_path, &template.bytes)?;

    let input_dir = root.join("input");
    let output_dir = root.join("updated");
    std::fs::create_dir_all(&input_dir)?;
    std::fs::create_dir_all(&output_dir)?;

    let inputs = archive::extract_matching(&upload.bytes, &input_dir, &options.extension)?;
    info!(
        "Extracted {} drawing(s) from {}",
        inputs.len(),
        upload.name
    );

    let mut report = BatchReport::new(name.as_str());
    let mut outputs: Vec<(String, PathBuf)> = Vec::new();

    // 每个输出写入独立子目录，后续失败不会影响已成功的同名输出
    for (index, input) in inputs.iter().enumerate() {
        let entry_dir = output_dir.join(index.to_string());
        std::fs::create_dir_all(&entry_dir)?;
        let output_path = entry_dir.join(&input.file_name);
        match replace_block_with(
            &input.path,
            &output_path,
            &name,
            &template_path,
            &options.replace,
        ) {
            Ok(outcome) => {
                report.record_success(&input.file_name, outcome);
                match outputs.iter_mut().find(|(n, _)| n == &input.file_name) {
                    Some(existing) => {
                        warn!("Output {} overwritten by a later entry", input.file_name);
                        existing.1 = output_path;
                    }
                    None => outputs.push((input.file_name.clone(), output_path)),
                }
            }
            Err(e) => {
                error!("Failed on {}: {}", input.file_name, e);
                report.record_failure(&input.file_name, e.reason());
            }
        }
    }

    let archive = archive::pack(&outputs)?;

    info!(
        "Batch finished: {} of {} file(s) succeeded",
        report.success_count(),
        inputs.len()
    );

    // work_dir 在此处被删除
    Ok(BatchOutput {
        report,
        archive_name: options.output_archive_name(),
        archive,
    })
}
