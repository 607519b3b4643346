//! 状态与结果面板

use crate::state::{FormState, MessageLevel};
use blockswap_core::outcome::FileOutcome;

/// 渲染状态信息和逐文件结果
pub fn show_status_panel(ui: &mut egui::Ui, state: &FormState) {
    for message in &state.messages {
        let color = match message.level {
            MessageLevel::Info => ui.visuals().text_color(),
            MessageLevel::Success => egui::Color32::from_rgb(80, 200, 120),
            MessageLevel::Warning => egui::Color32::from_rgb(230, 180, 60),
            MessageLevel::Error => egui::Color32::from_rgb(230, 80, 80),
        };
        ui.colored_label(color, &message.text);
    }

    let Some(output) = &state.output else {
        return;
    };
    if output.report.outcomes.is_empty() {
        return;
    }

    ui.separator();
    ui.label(format!(
        "Block '{}': {} placement(s) removed in total",
        output.report.block_name,
        output.report.total_removed()
    ));

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("file_outcomes")
            .num_columns(3)
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.strong("File");
                ui.strong("Status");
                ui.strong("Removed");
                ui.end_row();

                for outcome in &output.report.outcomes {
                    ui.label(outcome.file());
                    match outcome {
                        FileOutcome::Success { outcome, .. } => {
                            ui.label(if outcome.replaced { "replaced" } else { "removed only" });
                            ui.label(outcome.removed.to_string());
                        }
                        FileOutcome::Failure(failure) => {
                            ui.colored_label(egui::Color32::from_rgb(230, 80, 80), "failed")
                                .on_hover_text(failure.message.as_str());
                            ui.label("-");
                        }
                    }
                    ui.end_row();
                }
            });
    });
}
