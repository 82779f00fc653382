use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::ui::config::UI_CONFIG;

/// Bar chart of the optimal weights, in percent
pub fn render_weights_plot(ui: &mut Ui, weights: &[(&str, f64)]) {
    let labels: Vec<String> = weights.iter().map(|(ticker, _)| ticker.to_string()).collect();
    let bars: Vec<Bar> = weights
        .iter()
        .enumerate()
        .map(|(i, (ticker, weight))| {
            Bar::new(i as f64, weight * 100.0)
                .name(*ticker)
                .width(0.6)
                .fill(UI_CONFIG.colors.weight_bar)
        })
        .collect();

    Plot::new("optimal_weights_plot")
        .height(UI_CONFIG.layout.weight_plot_height)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .include_y(100.0)
        .x_axis_formatter(move |mark, _range| tick_label(&labels, mark.value))
        .y_axis_formatter(|mark, _range| format!("{:.0}%", mark.value))
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{}: {:.2}%", name, value.y)
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Weights", bars).color(UI_CONFIG.colors.weight_bar));
        });
}

/// Ticker under a bar; blank for fractional grid marks
fn tick_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_label_bar_positions() {
        let labels = vec!["AAPL".to_string(), "MSFT".to_string()];
        assert_eq!(tick_label(&labels, 0.0), "AAPL");
        assert_eq!(tick_label(&labels, 1.0), "MSFT");
        assert_eq!(tick_label(&labels, 0.5), "");
        assert_eq!(tick_label(&labels, 2.0), "");
        assert_eq!(tick_label(&labels, -1.0), "");
    }
}
