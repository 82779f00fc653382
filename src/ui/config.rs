use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub card: Color32,
    pub accent: Color32,
    pub status_completed: Color32,
    pub status_failed: Color32,
    pub status_running: Color32,
    pub status_pending: Color32,
    pub weight_bar: Color32,
}

#[derive(Clone, Copy, Default)]
pub struct UiLayout {
    pub content_max_width: f32,
    pub chart_max_height: f32,
    pub weight_plot_height: f32,
    /// Seconds a toast stays on screen
    pub notice_ttl_secs: f32,
    pub max_visible_notices: usize,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub layout: UiLayout,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY, // This sets every label globally to this color
        heading: Color32::from_rgb(120, 180, 255),
        subsection_heading: Color32::from_rgb(160, 200, 255),
        central_panel: Color32::from_rgb(24, 26, 32),
        side_panel: Color32::from_rgb(18, 19, 24),
        card: Color32::from_rgb(34, 37, 46),
        accent: Color32::from_rgb(59, 130, 246),
        status_completed: Color32::from_rgb(34, 197, 94),
        status_failed: Color32::from_rgb(239, 68, 68),
        status_running: Color32::from_rgb(59, 130, 246),
        status_pending: Color32::from_rgb(234, 179, 8),
        weight_bar: Color32::from_rgb(99, 102, 241),
    },
    layout: UiLayout {
        content_max_width: 1100.0,
        chart_max_height: 420.0,
        weight_plot_height: 180.0,
        notice_ttl_secs: 4.0,
        max_visible_notices: 5,
    },
};
