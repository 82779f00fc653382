use eframe::egui::{Color32, CornerRadius, Frame, Margin, RichText, Ui};

use crate::domain::JobStatus;
use crate::ui::config::UI_CONFIG;

/// Extension trait to add semantic styling methods directly to `egui::Ui`.
pub trait UiStyleExt {
    /// Renders small, gray text (good for helper captions).
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Renders a "Label: Value" pair with consistent spacing and styling.
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    /// Large value with a small caption underneath, for the metric grid.
    fn metric_tile(&mut self, caption: &str, value: &str);

    /// Renders a sub-section header using the configured global color.
    fn label_subheader(&mut self, text: impl Into<String>);

    /// Renders an error message (Red).
    fn label_error(&mut self, text: impl Into<String>);

    /// Renders a warning/info message (Yellow/Gold).
    fn label_warning(&mut self, text: impl Into<String>);

    /// Coloured pill naming a job status
    fn status_badge(&mut self, status: JobStatus);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).color(color));
        });
    }

    fn metric_tile(&mut self, caption: &str, value: &str) {
        self.vertical(|ui| {
            ui.label(RichText::new(value).size(20.0).strong().color(Color32::WHITE));
            ui.label_subdued(caption);
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.subsection_heading));
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.status_failed));
    }

    fn label_warning(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.status_pending));
    }

    fn status_badge(&mut self, status: JobStatus) {
        let color = status_color(status);
        Frame::new()
            .fill(color.gamma_multiply(0.25))
            .corner_radius(CornerRadius::same(10))
            .inner_margin(Margin::symmetric(8, 2))
            .show(self, |ui| {
                ui.label(RichText::new(status_label(status)).small().strong().color(color));
            });
    }
}

pub fn status_color(status: JobStatus) -> Color32 {
    match status {
        JobStatus::Completed => UI_CONFIG.colors.status_completed,
        JobStatus::Failed => UI_CONFIG.colors.status_failed,
        JobStatus::Running => UI_CONFIG.colors.status_running,
        JobStatus::Pending => UI_CONFIG.colors.status_pending,
    }
}

pub fn status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Completed => "Completed",
        JobStatus::Failed => "Failed",
        JobStatus::Running => "In progress",
        JobStatus::Pending => "Queued",
    }
}
