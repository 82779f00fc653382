use eframe::egui::{
    Align, CentralPanel, Color32, Context, Frame, Layout, Margin, RichText, ScrollArea,
    Spinner, TopBottomPanel, Ui,
};
use strum::IntoEnumIterator;

use crate::domain::JobStatus;
use crate::engine::{ActiveView, NoticeLevel};
use crate::ui::about::AboutEvent;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::{UiStyleExt, status_color, status_label};
use crate::ui::ui_panels::{
    AnalysisFormPanel, ChartSections, FormEvent, Panel, ResultsEvent, ResultsPanel, StatusEvent,
    StatusPanel,
};
use crate::utils::TimeUtils;
use crate::utils::app_time::now;

use super::app::{Page, PortfolioApp};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

impl PortfolioApp {
    pub(super) fn render_header(&mut self, ctx: &Context) {
        let header_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(16, 10));
        TopBottomPanel::top("header_panel")
            .frame(header_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(UI_TEXT.app_title)
                                .size(22.0)
                                .strong()
                                .color(UI_CONFIG.colors.heading),
                        );
                        ui.label_subdued(UI_TEXT.app_subtitle);
                    });

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        // right_to_left reverses the visual order
                        for page in Page::iter().rev() {
                            let label = RichText::new(page.label()).size(15.0);
                            if ui.selectable_label(self.page == page, label).clicked()
                                && self.page != page
                            {
                                #[cfg(debug_assertions)]
                                if DEBUG_FLAGS.print_ui_interactions {
                                    log::info!("Navigating to {:?}", page);
                                }
                                self.page = page;
                            }
                        }
                    });
                });
            });
    }

    pub(super) fn render_footer(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.metric("🌐", &self.api_base_url, UI_CONFIG.colors.label);
                    ui.separator();

                    let session = self.engine.session();
                    if session.is_loading() {
                        ui.add(Spinner::new().size(12.0));
                    }
                    if session.is_submitting() {
                        ui.metric("🚀", UI_TEXT.submitting_button, UI_CONFIG.colors.status_pending);
                        ui.separator();
                    } else if let Some(job) = session.job() {
                        let status = job.status();
                        ui.metric(
                            "📡",
                            &format!("{} · {}", job.id, status_label(status)),
                            status_color(status),
                        );
                        ui.separator();
                    }

                    ui.label_subdued(UI_TEXT.footer);

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label_subdued(format!("© {}", TimeUtils::current_year()));
                    });
                });
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::symmetric(24, 12));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .id_salt("page_scroll")
                    .show(ui, |ui| {
                        ui.set_max_width(UI_CONFIG.layout.content_max_width);
                        match self.page {
                            Page::Analysis => self.render_analysis_page(ui),
                            Page::About => self.render_about_page(ui),
                        }
                    });
            });
    }

    fn render_about_page(&mut self, ui: &mut Ui) {
        for event in self.about.render(ui) {
            match event {
                AboutEvent::StartAnalysis => {
                    self.page = Page::Analysis;
                    self.engine.session_mut().set_active_view(ActiveView::Form);
                }
            }
        }
    }

    fn render_analysis_page(&mut self, ui: &mut Ui) {
        self.render_view_tabs(ui);
        ui.separator();

        match self.engine.session().active_view() {
            ActiveView::Form => self.render_form(ui),
            ActiveView::Status => self.render_status(ui),
            ActiveView::Results => self.render_results(ui),
        }
    }

    fn render_view_tabs(&mut self, ui: &mut Ui) {
        let mut requested = None;
        let session = self.engine.session();

        ui.horizontal(|ui| {
            for view in ActiveView::iter() {
                let selected = session.active_view() == view;
                let response = ui.add_enabled_ui(session.can_view(view), |ui| {
                    ui.selectable_label(selected, RichText::new(view.to_string()).strong())
                });
                if response.inner.clicked() && !selected {
                    requested = Some(view);
                }
            }
        });

        if let Some(view) = requested {
            self.engine.session_mut().set_active_view(view);
        }
    }

    fn render_form(&mut self, ui: &mut Ui) {
        let today = TimeUtils::today();
        let session = self.engine.session_mut();
        let catalog_state = session.catalog_state();
        let submitting = session.is_submitting();
        let job_active = session.is_polling() || session.polling_halted();

        let (form, tickers) = session.edit_form();
        let events =
            AnalysisFormPanel::new(form, tickers, catalog_state, submitting, job_active, today)
                .render(ui);

        for event in events {
            match event {
                FormEvent::Submit => {
                    if self.engine.session_mut().submit(today) {
                        ui.ctx().request_repaint();
                    }
                }
            }
        }
    }

    fn render_status(&mut self, ui: &mut Ui) {
        let session = self.engine.session();
        let events = StatusPanel::new(
            session.job(),
            session.is_awaiting_results(),
            session.results().is_some(),
            session.polling_halted(),
        )
        .render(ui);

        for event in events {
            match event {
                StatusEvent::CopyJobId(id) => {
                    ui.ctx().copy_text(id);
                    self.engine
                        .session_mut()
                        .notify(NoticeLevel::Success, UI_TEXT.job_id_copied);
                }
                StatusEvent::ResumePolling => {
                    if self.engine.session_mut().resume_polling(now()) {
                        ui.ctx().request_repaint();
                    }
                }
                StatusEvent::ViewResults => {
                    self.engine.session_mut().set_active_view(ActiveView::Results);
                }
            }
        }
    }

    fn render_results(&mut self, ui: &mut Ui) {
        self.refresh_chart_cache();

        let session = self.engine.session();
        let Some(results) = session.results() else {
            ui.label(RichText::new(UI_TEXT.not_available).color(Color32::GRAY));
            return;
        };
        let completed = session.job().map(|j| j.status()) == Some(JobStatus::Completed);

        let empty = ChartSections::default();
        let charts = self
            .chart_cache
            .as_ref()
            .map(|(_, sections)| sections)
            .unwrap_or(&empty);

        let events =
            ResultsPanel::new(results, session.submitted_request(), completed, charts).render(ui);

        for event in events {
            match event {
                ResultsEvent::NewAnalysis => {
                    self.engine.session_mut().set_active_view(ActiveView::Form);
                }
            }
        }
    }
}
