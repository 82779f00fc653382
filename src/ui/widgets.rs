//! Small presentational building blocks shared by the result views.

use eframe::egui::{self, Button, Hyperlink, Image, Layout, RichText, Stroke, Ui};
use std::hash::Hash;

use crate::domain::ChartEmbed;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{card_frame, colored_subsection_heading};

/// Open/closed flag of a [`Collapsible`], kept in egui's temp memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsibleState {
    open: bool,
}

impl CollapsibleState {
    pub fn new(default_open: bool) -> Self {
        Self { open: default_open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn marker(&self) -> &'static str {
        if self.open { "▲" } else { "▼" }
    }
}

/// A titled section whose body can be folded away by clicking the title row.
pub struct Collapsible {
    title: String,
    id_salt: egui::Id,
    default_open: bool,
}

impl Collapsible {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id_salt: egui::Id::new(&title),
            title,
            default_open: true,
        }
    }

    pub fn id_salt(mut self, salt: impl Hash) -> Self {
        self.id_salt = egui::Id::new(salt);
        self
    }

    pub fn default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Returns the body's output when expanded
    pub fn show<R>(self, ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> Option<R> {
        let id = ui.make_persistent_id(self.id_salt);
        let default = CollapsibleState::new(self.default_open);
        let mut state = ui.data_mut(|d| *d.get_temp_mut_or(id, default));

        let header = RichText::new(format!("{}  {}", self.title, state.marker()))
            .heading()
            .color(UI_CONFIG.colors.heading);
        if ui.add(Button::new(header).frame(false)).clicked() {
            state.toggle();
            ui.data_mut(|d| d.insert_temp(id, state));
        }

        if !state.is_open() {
            return None;
        }

        ui.add_space(4.0);
        let inner = card_frame().show(ui, add_contents).inner;
        ui.add_space(8.0);
        Some(inner)
    }
}

/// One chart: title row with an external link, then the chart itself.
pub struct ChartFrame<'a> {
    title: &'a str,
    url: &'a str,
    embed: ChartEmbed,
}

impl<'a> ChartFrame<'a> {
    pub fn new(title: &'a str, url: &'a str) -> Self {
        Self {
            title,
            url,
            embed: ChartEmbed::from_path(url),
        }
    }

    pub fn show(self, ui: &mut Ui) {
        card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(colored_subsection_heading(self.title).strong());
                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        Hyperlink::from_label_and_url(UI_TEXT.open_in_new_tab, self.url)
                            .open_in_new_tab(true),
                    );
                });
            });
            ui.add_space(6.0);

            match self.embed {
                ChartEmbed::Image => {
                    ui.add(
                        Image::new(self.url)
                            .max_width(ui.available_width())
                            .max_height(UI_CONFIG.layout.chart_max_height)
                            .maintain_aspect_ratio(true)
                            .show_loading_spinner(true),
                    );
                }
                ChartEmbed::Document => {
                    egui::Frame::new()
                        .stroke(Stroke::new(1.0, UI_CONFIG.colors.label))
                        .corner_radius(4)
                        .inner_margin(egui::Margin::same(16))
                        .show(ui, |ui| {
                            ui.set_min_width(ui.available_width());
                            ui.label_subdued(UI_TEXT.document_placeholder);
                            ui.monospace(self.url);
                        });
                }
            }
        });
        ui.add_space(8.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_collapsible(ctx: &egui::Context, default_open: bool) -> Option<u8> {
        let mut shown = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                shown = Collapsible::new("Metrics")
                    .default_open(default_open)
                    .show(ui, |_| 7);
            });
        });
        shown
    }

    #[test]
    fn toggle_flips_open_state_and_marker() {
        let mut state = CollapsibleState::new(true);
        assert_eq!(state.marker(), "▲");
        state.toggle();
        assert!(!state.is_open());
        assert_eq!(state.marker(), "▼");
        state.toggle();
        assert!(state.is_open());
    }

    #[test]
    fn body_renders_only_when_open() {
        assert_eq!(render_collapsible(&egui::Context::default(), true), Some(7));
        assert_eq!(render_collapsible(&egui::Context::default(), false), None);
    }

    #[test]
    fn state_survives_between_frames() {
        let ctx = egui::Context::default();
        assert_eq!(render_collapsible(&ctx, false), None);
        // The stored state wins over the default once it exists
        assert_eq!(render_collapsible(&ctx, true), None);
    }
}
