use chrono::{Datelike, NaiveDate};
use eframe::egui::{
    Button, DragValue, Grid, ProgressBar, RichText, ScrollArea, Spinner, TextEdit, Ui,
};
use egui_extras::DatePickerButton;
use std::collections::BTreeMap;

use crate::config::FORM;
use crate::domain::{
    AnalysisForm, AnalysisRequest, AnalysisResults, Job, JobStatus, TickerGroups, chart_title,
    split_chart_paths, weight_label,
};
use crate::engine::CatalogState;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_plot_view::render_weights_plot;
use crate::ui::utils::{
    card_frame, colored_subsection_heading, format_currency, format_percentage, format_ratio,
    section_heading, spaced_separator,
};
use crate::ui::widgets::{ChartFrame, Collapsible};
use crate::utils::TimeUtils;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

// --- FORM ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
}

/// Ticker selection, period, investment and simulation count
pub struct AnalysisFormPanel<'a> {
    form: &'a mut AnalysisForm,
    tickers: &'a TickerGroups,
    catalog_state: CatalogState,
    submitting: bool,
    job_active: bool,
    today: NaiveDate,
}

impl<'a> AnalysisFormPanel<'a> {
    pub fn new(
        form: &'a mut AnalysisForm,
        tickers: &'a TickerGroups,
        catalog_state: CatalogState,
        submitting: bool,
        job_active: bool,
        today: NaiveDate,
    ) -> Self {
        Self {
            form,
            tickers,
            catalog_state,
            submitting,
            job_active,
            today,
        }
    }

    fn render_ticker_selector(&mut self, ui: &mut Ui) {
        ui.label(colored_subsection_heading(UI_TEXT.tickers_heading));

        match self.catalog_state {
            CatalogState::NotRequested | CatalogState::Loading => {
                ui.horizontal(|ui| {
                    ui.add(Spinner::new());
                    ui.label_subdued(UI_TEXT.tickers_loading);
                });
            }
            CatalogState::Failed => ui.label_warning(UI_TEXT.tickers_unavailable),
            CatalogState::Ready => {}
        }

        ui.add(
            TextEdit::singleline(&mut self.form.search)
                .hint_text(UI_TEXT.tickers_search_hint)
                .desired_width(f32::INFINITY),
        );

        self.render_selected_chips(ui);

        let mut toggled: Option<String> = None;
        ScrollArea::vertical()
            .max_height(FORM.tickers.list_max_height)
            .id_salt("ticker_list")
            .show(ui, |ui| {
                let groups = self.tickers.filtered(&self.form.search);
                if groups.is_empty() && !self.tickers.is_empty() {
                    ui.label_subdued(UI_TEXT.tickers_no_match);
                }
                for (label, tickers) in groups {
                    ui.label(RichText::new(label).small().strong().color(UI_CONFIG.colors.label));
                    ui.horizontal_wrapped(|ui| {
                        for ticker in tickers {
                            let selected = self.form.is_selected(ticker);
                            if ui.selectable_label(selected, ticker).clicked() {
                                toggled = Some(ticker.to_string());
                            }
                        }
                    });
                    ui.add_space(4.0);
                }
            });

        if let Some(ticker) = toggled {
            let now_selected = self.form.toggle_ticker(&ticker);
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Ticker {} selected: {}", ticker, now_selected);
            }
            #[cfg(not(debug_assertions))]
            let _ = now_selected;
        }
    }

    fn render_selected_chips(&mut self, ui: &mut Ui) {
        let count = self.form.selected_tickers.len();
        if count == 0 {
            return;
        }

        let mut removed: Option<String> = None;
        let mut clear = false;
        ui.horizontal_wrapped(|ui| {
            ui.label_subdued(format!("{} ({}):", UI_TEXT.tickers_selected_prefix, count));
            for ticker in &self.form.selected_tickers {
                if ui.small_button(format!("{} ✖", ticker)).clicked() {
                    removed = Some(ticker.clone());
                }
            }
            if ui.small_button(UI_TEXT.clear_selection).clicked() {
                clear = true;
            }
        });

        if count > FORM.tickers.suggested_max {
            ui.label_warning(UI_TEXT.tickers_suggested_max);
        }

        if clear {
            self.form.selected_tickers.clear();
        } else if let Some(ticker) = removed {
            self.form.toggle_ticker(&ticker);
        }
    }

    fn render_period(&mut self, ui: &mut Ui) {
        ui.label(colored_subsection_heading(UI_TEXT.dates_heading));

        let year = self.today.year();
        let years = (year - FORM.date_picker_years)..=year;

        Grid::new("analysis_period_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label(UI_TEXT.start_date_label);
                ui.push_id("start_date", |ui| {
                    ui.add(
                        DatePickerButton::new(&mut self.form.start_date)
                            .start_end_years(years.clone())
                            .calendar_week(false),
                    );
                });
                ui.end_row();

                ui.label(UI_TEXT.end_date_label);
                ui.push_id("end_date", |ui| {
                    ui.add(
                        DatePickerButton::new(&mut self.form.end_date)
                            .start_end_years(years)
                            .calendar_week(false),
                    );
                });
                ui.end_row();
            });

        // Same limits the picker would enforce: no future end, start before end
        self.form.clamp_dates(self.today);
    }

    fn render_amounts(&mut self, ui: &mut Ui) {
        Grid::new("analysis_amounts_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label(UI_TEXT.investment_label);
                ui.add(
                    DragValue::new(&mut self.form.initial_investment)
                        .range(FORM.investment.min..=f64::MAX)
                        .speed(FORM.investment.step)
                        .prefix("$ ")
                        .max_decimals(2),
                );
                ui.end_row();

                ui.label(UI_TEXT.simulations_label);
                ui.add(
                    DragValue::new(&mut self.form.sim_runs)
                        .range(FORM.simulations.min..=FORM.simulations.max)
                        .speed(FORM.simulations.step),
                );
                ui.end_row();
            });
        ui.label_subdued(UI_TEXT.simulations_helper);
    }
}

impl<'a> Panel for AnalysisFormPanel<'a> {
    type Event = FormEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.form_heading);

        card_frame().show(ui, |ui| {
            self.render_ticker_selector(ui);
            spaced_separator(ui);
            self.render_period(ui);
            spaced_separator(ui);
            self.render_amounts(ui);
            spaced_separator(ui);

            if self.job_active {
                ui.label_warning(UI_TEXT.replace_job_warning);
            }

            let label = if self.submitting {
                UI_TEXT.submitting_button
            } else if self.job_active {
                UI_TEXT.submit_replace_button
            } else {
                UI_TEXT.submit_button
            };
            let button = Button::new(RichText::new(label).strong()).min_size([220.0, 32.0].into());
            if ui.add_enabled(!self.submitting, button).clicked() {
                events.push(FormEvent::Submit);
            }
            if !self.form.has_enough_tickers() {
                ui.label_subdued(format!(
                    "Select at least {} tickers to run an analysis",
                    FORM.tickers.min_selected
                ));
            }
        });

        events
    }
}

// --- STATUS ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    CopyJobId(String),
    ResumePolling,
    ViewResults,
}

pub struct StatusPanel<'a> {
    job: Option<&'a Job>,
    awaiting_results: bool,
    results_ready: bool,
    polling_halted: bool,
}

impl<'a> StatusPanel<'a> {
    pub fn new(
        job: Option<&'a Job>,
        awaiting_results: bool,
        results_ready: bool,
        polling_halted: bool,
    ) -> Self {
        Self {
            job,
            awaiting_results,
            results_ready,
            polling_halted,
        }
    }
}

impl<'a> Panel for StatusPanel<'a> {
    type Event = StatusEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.status_heading);

        let Some(job) = self.job else {
            ui.label_subdued(UI_TEXT.no_job);
            return events;
        };
        let status = job.status();

        card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label_subdued(format!("{}:", UI_TEXT.job_id_label));
                ui.monospace(job.id.as_str());
                if ui.small_button(UI_TEXT.copy_job_id).clicked() {
                    events.push(StatusEvent::CopyJobId(job.id.to_string()));
                }
                ui.add_space(12.0);
                ui.status_badge(status);
            });

            if let Some(message) = job.snapshot.message.as_deref().filter(|m| !m.is_empty()) {
                ui.add_space(6.0);
                if status == JobStatus::Failed {
                    ui.label_error(message);
                } else {
                    ui.label(message);
                }
            }

            if status.is_active() {
                ui.add_space(10.0);
                ui.add(
                    ProgressBar::new(job.snapshot.progress_fraction())
                        .show_percentage()
                        .animate(status == JobStatus::Running),
                );
                let caption = match status {
                    JobStatus::Running => UI_TEXT.running_caption,
                    _ => UI_TEXT.pending_caption,
                };
                ui.label_subdued(caption);
            }

            if self.polling_halted {
                ui.add_space(10.0);
                ui.label_error(UI_TEXT.polling_halted);
                if ui.button(UI_TEXT.resume_polling_button).clicked() {
                    events.push(StatusEvent::ResumePolling);
                }
            }

            if status == JobStatus::Completed {
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    let view = ui.add_enabled(
                        self.results_ready,
                        Button::new(RichText::new(UI_TEXT.view_results_button).strong()),
                    );
                    if view.clicked() {
                        events.push(StatusEvent::ViewResults);
                    }
                    if self.awaiting_results {
                        ui.add(Spinner::new());
                        ui.label_subdued(UI_TEXT.fetching_results);
                    }
                });
            }
        });

        events
    }
}

// --- RESULTS ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub title: String,
    pub url: String,
}

/// Charts split into the portfolio-wide section and the per-ticker section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSections {
    pub overview: Vec<ChartEntry>,
    pub per_ticker: Vec<ChartEntry>,
}

impl ChartSections {
    pub fn build(plot_paths: &BTreeMap<String, String>, asset_url: impl Fn(&str) -> String) -> Self {
        let entry = |(key, path): (&str, &str)| ChartEntry {
            title: chart_title(key),
            url: asset_url(path),
        };
        let (overview, per_ticker) = split_chart_paths(plot_paths);
        Self {
            overview: overview.into_iter().map(entry).collect(),
            per_ticker: per_ticker.into_iter().map(entry).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.overview.is_empty() && self.per_ticker.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsEvent {
    NewAnalysis,
}

pub struct ResultsPanel<'a> {
    results: &'a AnalysisResults,
    request: Option<&'a AnalysisRequest>,
    completed: bool,
    charts: &'a ChartSections,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(
        results: &'a AnalysisResults,
        request: Option<&'a AnalysisRequest>,
        completed: bool,
        charts: &'a ChartSections,
    ) -> Self {
        Self {
            results,
            request,
            completed,
            charts,
        }
    }

    fn initial_investment(&self) -> Option<f64> {
        self.results
            .initial_investment
            .or(self.request.map(|r| r.initial_investment))
    }

    fn render_summary_cards(&self, ui: &mut Ui) {
        let metrics = &self.results.optimal_metrics;
        let value_color = ui.visuals().strong_text_color();

        ui.columns(2, |columns| {
            card_frame().show(&mut columns[0], |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(colored_subsection_heading(UI_TEXT.summary_heading).strong());
                ui.add_space(4.0);
                if let Some(request) = self.request {
                    let period = format!(
                        "{} - {}",
                        TimeUtils::to_display_date(request.start_date),
                        TimeUtils::to_display_date(request.end_date)
                    );
                    ui.metric("Period", &period, value_color);
                }
                ui.metric(
                    "Initial investment",
                    &format_currency(self.initial_investment()),
                    value_color,
                );
                if let Some(request) = self.request {
                    ui.metric("Tickers", &request.tickers.join(", "), value_color);
                }
            });

            card_frame().show(&mut columns[1], |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(colored_subsection_heading(UI_TEXT.statistics_heading).strong());
                ui.add_space(4.0);
                ui.metric(
                    "Average return",
                    &format_percentage(metrics.expected_return),
                    value_color,
                );
                ui.metric(
                    "Standard deviation",
                    &format_percentage(metrics.volatility),
                    value_color,
                );
                ui.metric("Final value", &format_currency(metrics.final_value), value_color);
                ui.metric(
                    "Return on investment",
                    &format_percentage(metrics.return_on_investment),
                    value_color,
                );
            });
        });
        ui.add_space(10.0);
    }

    fn render_metrics(&self, ui: &mut Ui) {
        let metrics = &self.results.optimal_metrics;

        Grid::new("optimal_metrics_grid")
            .num_columns(3)
            .spacing([40.0, 16.0])
            .show(ui, |ui| {
                ui.metric_tile("Expected annual return", &format_percentage(metrics.expected_return));
                ui.metric_tile("Volatility", &format_percentage(metrics.volatility));
                ui.metric_tile("Sharpe ratio", &format_ratio(metrics.sharpe_ratio));
                ui.end_row();

                ui.metric_tile("Final value", &format_currency(metrics.final_value));
                ui.metric_tile(
                    "Return on investment",
                    &format_percentage(metrics.return_on_investment),
                );
                ui.metric_tile("Initial investment", &format_currency(self.initial_investment()));
                ui.end_row();
            });

        spaced_separator(ui);
        ui.label_subheader(UI_TEXT.weights_heading);
        ui.add_space(4.0);

        let weights = metrics.weights_by_size();
        for (ticker, weight) in &weights {
            ui.horizontal(|ui| {
                ui.add_sized([70.0, 18.0], egui_label(ticker));
                ui.add(
                    ProgressBar::new(weight.clamp(0.0, 1.0) as f32)
                        .text(weight_label(*weight))
                        .fill(UI_CONFIG.colors.weight_bar),
                );
            });
        }

        if !weights.is_empty() {
            ui.add_space(8.0);
            render_weights_plot(ui, &weights);
        }
    }

    fn render_charts(&self, ui: &mut Ui) {
        if self.charts.is_empty() {
            ui.label_subdued(UI_TEXT.no_charts);
            return;
        }

        for chart in &self.charts.overview {
            ChartFrame::new(&chart.title, &chart.url).show(ui);
        }

        if !self.charts.per_ticker.is_empty() {
            ui.add_space(6.0);
            ui.label_subheader(UI_TEXT.individual_charts_heading);
            ui.separator();
            for chart in &self.charts.per_ticker {
                ChartFrame::new(&chart.title, &chart.url).show(ui);
            }
        }
    }
}

fn egui_label(text: &str) -> eframe::egui::Label {
    eframe::egui::Label::new(RichText::new(text).monospace().strong())
}

impl<'a> Panel for ResultsPanel<'a> {
    type Event = ResultsEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, "Analysis Results");

        if self.completed {
            self.render_summary_cards(ui);
        }

        Collapsible::new(UI_TEXT.metrics_heading)
            .id_salt("results_metrics")
            .default_open(true)
            .show(ui, |ui| self.render_metrics(ui));

        Collapsible::new(UI_TEXT.charts_heading)
            .id_salt("results_charts")
            .default_open(true)
            .show(ui, |ui| self.render_charts(ui));

        ui.add_space(10.0);
        if ui.button(UI_TEXT.new_analysis_button).clicked() {
            events.push(ResultsEvent::NewAnalysis);
        }
        ui.add_space(20.0);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_sections_put_overview_first_with_absolute_urls() {
        let paths = BTreeMap::from([
            ("plot_AAPL_candlestick".to_string(), "job/AAPL_candlestick.html".to_string()),
            ("plot_efficient_frontier".to_string(), "/job/efficient_frontier.png".to_string()),
            ("plot_MSFT_trends_pie".to_string(), "job/MSFT_trends_pie.png".to_string()),
        ]);
        let sections = ChartSections::build(&paths, |p| {
            format!("http://localhost:8000/static/{}", p.trim_start_matches('/'))
        });

        assert_eq!(
            sections.overview,
            vec![ChartEntry {
                title: "Efficient Frontier".to_string(),
                url: "http://localhost:8000/static/job/efficient_frontier.png".to_string(),
            }]
        );
        let titles: Vec<&str> = sections.per_ticker.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Candlestick Chart - AAPL", "Trends - MSFT"]);
    }

    #[test]
    fn no_paths_means_no_sections() {
        let sections = ChartSections::build(&BTreeMap::new(), |p| p.to_string());
        assert!(sections.is_empty());
    }
}
