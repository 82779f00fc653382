/// Every user-facing string that is not built from data
pub struct UiText {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub nav_analysis: &'static str,
    pub nav_about: &'static str,
    pub footer: &'static str,

    // Form
    pub form_heading: &'static str,
    pub tickers_heading: &'static str,
    pub tickers_search_hint: &'static str,
    pub tickers_loading: &'static str,
    pub tickers_unavailable: &'static str,
    pub tickers_no_match: &'static str,
    pub tickers_selected_prefix: &'static str,
    pub tickers_suggested_max: &'static str,
    pub clear_selection: &'static str,
    pub dates_heading: &'static str,
    pub start_date_label: &'static str,
    pub end_date_label: &'static str,
    pub investment_label: &'static str,
    pub simulations_label: &'static str,
    pub simulations_helper: &'static str,
    pub submit_button: &'static str,
    pub submit_replace_button: &'static str,
    pub submitting_button: &'static str,
    pub replace_job_warning: &'static str,

    // Status
    pub status_heading: &'static str,
    pub job_id_label: &'static str,
    pub copy_job_id: &'static str,
    pub job_id_copied: &'static str,
    pub running_caption: &'static str,
    pub pending_caption: &'static str,
    pub view_results_button: &'static str,
    pub fetching_results: &'static str,
    pub polling_halted: &'static str,
    pub resume_polling_button: &'static str,
    pub no_job: &'static str,

    // Results
    pub summary_heading: &'static str,
    pub statistics_heading: &'static str,
    pub metrics_heading: &'static str,
    pub weights_heading: &'static str,
    pub charts_heading: &'static str,
    pub individual_charts_heading: &'static str,
    pub no_charts: &'static str,
    pub open_in_new_tab: &'static str,
    pub document_placeholder: &'static str,
    pub new_analysis_button: &'static str,
    pub not_available: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "Portfolio Analyzer",
    app_subtitle: "Optimise a stock portfolio with Modern Portfolio Theory and Monte Carlo simulation",
    nav_analysis: "📊 Analysis",
    nav_about: "ℹ About",
    footer: "Historical prices courtesy of Yahoo Finance. Not investment advice.",

    form_heading: "Analysis Configuration",
    tickers_heading: "Tickers",
    tickers_search_hint: "Search tickers...",
    tickers_loading: "Loading available tickers...",
    tickers_unavailable: "Ticker list unavailable",
    tickers_no_match: "No ticker matches the search",
    tickers_selected_prefix: "Selected",
    tickers_suggested_max: "More than 10 tickers can make the analysis slow",
    clear_selection: "Clear",
    dates_heading: "Analysis period",
    start_date_label: "Start date",
    end_date_label: "End date",
    investment_label: "Initial investment (USD)",
    simulations_label: "Monte Carlo simulations",
    simulations_helper: "More simulations give more stable results but take longer",
    submit_button: "🚀 Analyze portfolio",
    submit_replace_button: "🚀 Start a new analysis",
    submitting_button: "Submitting...",
    replace_job_warning: "An analysis is still running. Submitting replaces it.",

    status_heading: "Process Status",
    job_id_label: "Job",
    copy_job_id: "📋 Copy",
    job_id_copied: "Job id copied to the clipboard",
    running_caption: "Processing financial analysis...",
    pending_caption: "Waiting to start processing...",
    view_results_button: "View results",
    fetching_results: "Fetching results...",
    polling_halted: "Status updates stopped after repeated connection errors.",
    resume_polling_button: "🔄 Resume polling",
    no_job: "No analysis has been started yet",

    summary_heading: "Analysis Summary",
    statistics_heading: "Statistics",
    metrics_heading: "Optimal portfolio metrics",
    weights_heading: "Optimal weight distribution",
    charts_heading: "Charts and visualisations",
    individual_charts_heading: "Individual stock analysis",
    no_charts: "No charts available",
    open_in_new_tab: "↗ Open in new tab",
    document_placeholder: "Interactive chart. Open it in a new tab to view:",
    new_analysis_button: "⟲ New analysis",
    not_available: "N/A",
};
