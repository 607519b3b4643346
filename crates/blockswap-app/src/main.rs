//! BlockSwap 主应用程序入口
//! 使用 eframe 作为应用框架，表单提交后在后台线程中顺序处理整批图纸

use anyhow::Result;
use blockswap_file::{run_batch, BatchOptions, BatchOutput, FileError, Upload};
use blockswap_ui::{show_form_panel, show_status_panel, FormAction, FormState, MessageLevel};
use crossbeam::channel::{self, Receiver, TryRecvError};
use eframe::egui;
use std::path::Path;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

type BatchResult = Result<BatchOutput, FileError>;

/// BlockSwap 应用程序
struct BlockSwapApp {
    form: FormState,
    options: BatchOptions,

    /// 正在运行的批处理
    pending: Option<Receiver<BatchResult>>,
}

impl Default for BlockSwapApp {
    fn default() -> Self {
        Self {
            form: FormState::new(),
            options: BatchOptions::default(),
            pending: None,
        }
    }
}

impl BlockSwapApp {
    /// 打开文件对话框并读取为上传文件
    fn pick_upload(&mut self, title: &str, filter_name: &str, extensions: &[&str]) -> Option<Upload> {
        let path = rfd::FileDialog::new()
            .add_filter(filter_name, extensions)
            .set_title(title)
            .pick_file()?;

        match Upload::from_path(&path) {
            Ok(upload) => {
                info!("Selected {} ({} bytes)", path.display(), upload.bytes.len());
                Some(upload)
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                self.form
                    .push(MessageLevel::Error, format!("Failed to read {}: {}", path.display(), e));
                None
            }
        }
    }

    /// 启动后台批处理
    fn start_batch(&mut self) {
        let Some(request) = self.form.submit() else {
            return;
        };

        let options = self.options.clone();
        let (tx, rx) = channel::bounded(1);
        std::thread::spawn(move || {
            let result = run_batch(&request, &options);
            // 接收端已关闭时丢弃结果
            let _ = tx.send(result);
        });

        info!("Batch started for block '{}'", self.form.block_name.trim());
        self.pending = Some(rx);
    }

    /// 检查后台批处理是否完成
    fn poll_batch(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.form.finish(result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                tracing::error!("Batch worker stopped without a result");
                self.form.abort("Processing stopped unexpectedly.");
            }
        }
    }

    /// 保存输出压缩包
    fn download(&mut self) {
        let Some(output) = &self.form.output else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("ZIP Files", &["zip"])
            .set_title("Download Updated DXFs")
            .set_file_name(output.archive_name.as_str())
            .save_file()
        else {
            return;
        };

        match write_archive(&path, &output.archive) {
            Ok(()) => {
                info!("Saved archive: {}", path.display());
                self.form
                    .push(MessageLevel::Info, format!("Saved {}", path.display()));
            }
            Err(e) => {
                tracing::error!("Failed to save archive: {}", e);
                self.form.push(MessageLevel::Error, e.to_string());
            }
        }
    }

    /// 复制JSON报告到剪贴板
    fn copy_report(&mut self, ctx: &egui::Context) {
        let Some(output) = &self.form.output else {
            return;
        };

        match serde_json::to_string_pretty(&output.report) {
            Ok(json) => {
                ctx.copy_text(json);
                self.form.push(MessageLevel::Info, "Report copied to clipboard.");
            }
            Err(e) => {
                tracing::error!("Failed to serialize report: {}", e);
            }
        }
    }
}

fn write_archive(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    std::fs::write(path, bytes).map_err(|e| FileError::Archive {
        operation: blockswap_file::ArchiveOperation::Build,
        message: format!("{}: {}", path.display(), e),
    })
}

impl eframe::App for BlockSwapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_batch();

        let mut action = FormAction::None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = show_form_panel(ui, &mut self.form);
            ui.separator();
            show_status_panel(ui, &self.form);
        });

        match action {
            FormAction::None => {}
            FormAction::PickTemplate => {
                if let Some(upload) = self.pick_upload("Upload Template DXF", "DXF Files", &["dxf"]) {
                    self.form.template = Some(upload);
                }
            }
            FormAction::PickArchive => {
                if let Some(upload) = self.pick_upload("Upload ZIP of DXF Files", "ZIP Files", &["zip"]) {
                    self.form.archive = Some(upload);
                }
            }
            FormAction::Process => self.start_batch(),
            FormAction::Download => self.download(),
            FormAction::CopyReport => self.copy_report(ctx),
        }

        if self.pending.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish()
    )?;

    info!("Starting BlockSwap...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 560.0])
            .with_title("BlockSwap"),
        ..Default::default()
    };

    eframe::run_native(
        "BlockSwap",
        native_options,
        Box::new(|_cc| Ok(Box::new(BlockSwapApp::default()))),
    ).map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
