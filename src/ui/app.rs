use eframe::{Frame, egui};
use std::sync::Arc;
use strum_macros::EnumIter;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::PortfolioApi;
use crate::domain::JobId;
use crate::engine::AnalysisEngine;
use crate::ui::about::AboutPage;
use crate::ui::config::UI_TEXT;
use crate::ui::notifications::Toasts;
use crate::ui::ui_panels::ChartSections;
use crate::ui::utils::setup_custom_visuals;
use crate::utils::TimeUtils;
use crate::utils::app_time::now;

/// Top-level navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Page {
    Analysis,
    About,
}

impl Page {
    pub fn label(self) -> &'static str {
        match self {
            Page::Analysis => UI_TEXT.nav_analysis,
            Page::About => UI_TEXT.nav_about,
        }
    }
}

pub struct PortfolioApp {
    pub(super) engine: AnalysisEngine,
    pub(super) page: Page,
    pub(super) toasts: Toasts,
    pub(super) about: AboutPage,
    /// Shown in the footer
    pub(super) api_base_url: String,
    /// Chart titles and URLs for the job whose results are displayed
    pub(super) chart_cache: Option<(JobId, ChartSections)>,
}

impl PortfolioApp {
    pub fn new(cc: &eframe::CreationContext, api: Arc<dyn PortfolioApi>, api_base_url: String) -> Self {
        setup_custom_visuals(&cc.egui_ctx);
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let mut engine =
            AnalysisEngine::new(api, TimeUtils::today()).with_repaint(cc.egui_ctx.clone());
        engine.start();

        log::info!("Portfolio Analyzer ready, backend at {}", api_base_url);

        Self {
            engine,
            page: Page::Analysis,
            toasts: Toasts::default(),
            about: AboutPage,
            api_base_url,
            chart_cache: None,
        }
    }

    /// Rebuild the chart list only when a different job's results are shown
    pub(super) fn refresh_chart_cache(&mut self) {
        let session = self.engine.session();
        let (Some(job_id), Some(results)) = (session.current_job_id(), session.results()) else {
            self.chart_cache = None;
            return;
        };

        if matches!(&self.chart_cache, Some((cached, _)) if cached == job_id) {
            return;
        }

        let sections = ChartSections::build(&results.plot_paths, |path| self.engine.asset_url(path));
        self.chart_cache = Some((job_id.clone(), sections));
    }
}

impl eframe::App for PortfolioApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Abandon in-flight calls so no task outlives the window
        self.engine.shutdown();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let now = now();

        // 1. Deliver replies, fire due polls
        let activity = self.engine.update(now);

        // 2. Surface notices
        for notice in self.engine.session_mut().take_notices() {
            self.toasts.push(notice, now);
        }

        // 3. Draw
        self.render_header(ctx);
        self.render_footer(ctx);
        self.render_central_panel(ctx);
        let next_toast_expiry = self.toasts.show(ctx, now);

        // 4. Wake up for the next deadline. Finished calls wake us on their own.
        if let Some(wait) = activity.wake_after() {
            ctx.request_repaint_after(wait);
        }
        if let Some(wait) = next_toast_expiry {
            ctx.request_repaint_after(wait);
        }
    }
}
