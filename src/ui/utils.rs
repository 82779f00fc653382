use eframe::egui::{Context, Frame, Margin, RichText, Ui, Visuals};

use crate::ui::config::{UI_CONFIG, UI_TEXT};

/// Creates a colored heading
pub fn colored_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into())
        .color(UI_CONFIG.colors.heading)
        .strong()
}

/// Creates a colored sub-section heading using the configured color
pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.card;
    visuals.panel_fill = UI_CONFIG.colors.central_panel;
    visuals.selection.bg_fill = UI_CONFIG.colors.accent;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Rounded frame used for every card on the page
pub fn card_frame() -> Frame {
    Frame::new()
        .fill(UI_CONFIG.colors.card)
        .corner_radius(8)
        .inner_margin(Margin::same(12))
}

/// `$1,234,567.89`, or "N/A" when the value is missing
pub fn format_currency(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return UI_TEXT.not_available.to_string();
    };

    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// Value already expressed in percent, e.g. `12.345 -> "12.35%"`
pub fn format_percentage(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.2}%", v),
        None => UI_TEXT.not_available.to_string(),
    }
}

pub fn format_ratio(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.2}", v),
        None => UI_TEXT.not_available.to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
