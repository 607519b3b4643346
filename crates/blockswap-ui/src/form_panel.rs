//! 输入表单

use crate::state::FormState;
use blockswap_file::Upload;

/// 表单产生的动作，由应用层执行（文件对话框、后台任务）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    PickTemplate,
    PickArchive,
    Process,
    Download,
    CopyReport,
}

/// 渲染输入表单
pub fn show_form_panel(ui: &mut egui::Ui, state: &mut FormState) -> FormAction {
    let mut action = FormAction::None;

    ui.heading("DXF Block Replace Tool");
    ui.label("Upload a ZIP of DXF files and a template DXF file to replace a block.");
    ui.separator();

    egui::Grid::new("block_replace_inputs")
        .num_columns(2)
        .spacing([10.0, 8.0])
        .show(ui, |ui| {
            ui.label("Block Name to Replace:");
            ui.add_enabled(
                !state.processing,
                egui::TextEdit::singleline(&mut state.block_name).hint_text("e.g. TITLE_BLOCK"),
            );
            ui.end_row();

            ui.label("Template DXF:");
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!state.processing, egui::Button::new("📂 Browse…"))
                    .clicked()
                {
                    action = FormAction::PickTemplate;
                }
                upload_label(ui, state.template.as_ref());
            });
            ui.end_row();

            ui.label("ZIP of DXF Files:");
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!state.processing, egui::Button::new("📂 Browse…"))
                    .clicked()
                {
                    action = FormAction::PickArchive;
                }
                upload_label(ui, state.archive.as_ref());
            });
            ui.end_row();
        });

    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!state.processing, egui::Button::new("▶ Process"))
            .clicked()
        {
            action = FormAction::Process;
        }
        if state.processing {
            ui.spinner();
            ui.label("Processing...");
        } else if !state.is_complete() {
            ui.weak("Block name, template and ZIP are all required.");
        }
    });

    if let Some(output) = &state.output {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("💾 Download Updated DXFs").clicked() {
                action = FormAction::Download;
            }
            ui.label(&output.archive_name);
            if ui.small_button("📋 Copy report").clicked() {
                action = FormAction::CopyReport;
            }
        });
    }

    action
}

fn upload_label(ui: &mut egui::Ui, upload: Option<&Upload>) {
    match upload {
        Some(upload) => {
            ui.label(format!("{} ({})", upload.name, format_size(upload.bytes.len())));
        }
        None => {
            ui.weak("No file selected");
        }
    }
}

/// 文件大小显示
fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KB {
        format!("{} B", bytes)
    } else if bytes_f < KB * KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{:.1} MB", bytes_f / (KB * KB))
    }
}
