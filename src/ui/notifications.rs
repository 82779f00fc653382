//! Transient toast messages in the top-right corner.

use eframe::egui::{self, Align2, Color32, Context, RichText};
use std::time::Duration;

use crate::engine::{Notice, NoticeLevel};
use crate::ui::config::UI_CONFIG;
use crate::utils::app_time::AppInstant;

struct Toast {
    notice: Notice,
    expires_at: AppInstant,
}

#[derive(Default)]
pub struct Toasts {
    items: Vec<Toast>,
}

impl Toasts {
    fn ttl() -> Duration {
        Duration::from_secs_f32(UI_CONFIG.layout.notice_ttl_secs)
    }

    pub fn push(&mut self, notice: Notice, now: AppInstant) {
        self.items.push(Toast {
            notice,
            expires_at: now + Self::ttl(),
        });

        // Oldest first out when the stack is full
        let max = UI_CONFIG.layout.max_visible_notices;
        if self.items.len() > max {
            let overflow = self.items.len() - max;
            self.items.drain(..overflow);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop expired toasts and return the time until the next one expires
    pub fn prune(&mut self, now: AppInstant) -> Option<Duration> {
        self.items.retain(|toast| toast.expires_at > now);
        self.items
            .iter()
            .map(|toast| toast.expires_at - now)
            .min()
    }

    pub fn show(&mut self, ctx: &Context, now: AppInstant) -> Option<Duration> {
        let next_expiry = self.prune(now);
        if self.items.is_empty() {
            return next_expiry;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_max_width(340.0);
                for (i, toast) in self.items.iter().enumerate() {
                    let color = level_color(toast.notice.level);
                    let response = egui::Frame::new()
                        .fill(UI_CONFIG.colors.card)
                        .stroke(egui::Stroke::new(1.0, color))
                        .corner_radius(6)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.horizontal_wrapped(|ui| {
                                ui.label(RichText::new(level_icon(toast.notice.level)).color(color));
                                ui.label(RichText::new(&toast.notice.text).color(Color32::WHITE));
                            });
                        })
                        .response
                        .interact(egui::Sense::click());
                    if response.clicked() {
                        dismissed = Some(i);
                    }
                    ui.add_space(6.0);
                }
            });

        if let Some(i) = dismissed {
            self.items.remove(i);
        }
        next_expiry
    }
}

fn level_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Info => UI_CONFIG.colors.status_running,
        NoticeLevel::Success => UI_CONFIG.colors.status_completed,
        NoticeLevel::Error => UI_CONFIG.colors.status_failed,
    }
}

fn level_icon(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "ℹ",
        NoticeLevel::Success => "✔",
        NoticeLevel::Error => "✖",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::app_time::now;

    fn notice(text: &str) -> Notice {
        Notice {
            level: NoticeLevel::Info,
            text: text.to_string(),
        }
    }

    #[test]
    fn toasts_expire_after_ttl() {
        let t0 = now();
        let mut toasts = Toasts::default();
        toasts.push(notice("first"), t0);
        toasts.push(notice("second"), t0 + Duration::from_secs(1));

        assert_eq!(toasts.prune(t0), Some(Toasts::ttl()));
        assert_eq!(toasts.prune(t0 + Toasts::ttl()), Some(Duration::from_secs(1)));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.prune(t0 + Toasts::ttl() + Duration::from_secs(1)), None);
        assert!(toasts.is_empty());
    }

    #[test]
    fn stack_keeps_the_newest() {
        let t0 = now();
        let mut toasts = Toasts::default();
        for i in 0..UI_CONFIG.layout.max_visible_notices + 2 {
            toasts.push(notice(&i.to_string()), t0);
        }
        assert_eq!(toasts.len(), UI_CONFIG.layout.max_visible_notices);
        assert_eq!(toasts.items[0].notice.text, "2");
    }
}
