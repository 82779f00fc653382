use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::config::FORM;
use crate::utils::TimeUtils;

/// Reasons a form is refused before anything is sent
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    TooFewTickers { selected: usize },
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
    EndInFuture { end: NaiveDate, today: NaiveDate },
    NonPositiveInvestment(f64),
    SimRunsOutOfRange(u32),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::TooFewTickers { .. } => write!(
                f,
                "Select at least {} tickers for the analysis",
                FORM.tickers.min_selected
            ),
            RequestError::StartAfterEnd { start, end } => write!(
                f,
                "Start date {} is after end date {}",
                TimeUtils::to_display_date(*start),
                TimeUtils::to_display_date(*end)
            ),
            RequestError::EndInFuture { end, .. } => write!(
                f,
                "End date {} is in the future",
                TimeUtils::to_display_date(*end)
            ),
            RequestError::NonPositiveInvestment(amount) => {
                write!(f, "Initial investment must be positive (got {})", amount)
            }
            RequestError::SimRunsOutOfRange(runs) => write!(
                f,
                "Simulation count must be between {} and {} (got {})",
                FORM.simulations.min, FORM.simulations.max, runs
            ),
        }
    }
}

impl std::error::Error for RequestError {}

/// Editable form state bound to the widgets
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisForm {
    /// Selection order is kept; it is the order sent to the backend
    pub selected_tickers: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_investment: f64,
    pub sim_runs: u32,
    /// Ticker search box text
    pub search: String,
}

impl AnalysisForm {
    /// Defaults: the last five years up to `today`, 1,000,000 USD, 100 runs.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_tickers: Vec::new(),
            start_date: TimeUtils::years_before(today, FORM.default_lookback_years),
            end_date: today,
            initial_investment: FORM.investment.default,
            sim_runs: FORM.simulations.default,
            search: String::new(),
        }
    }

    pub fn is_selected(&self, ticker: &str) -> bool {
        self.selected_tickers.iter().any(|t| t == ticker)
    }

    /// Returns the new selection state of `ticker`
    pub fn toggle_ticker(&mut self, ticker: &str) -> bool {
        if let Some(pos) = self.selected_tickers.iter().position(|t| t == ticker) {
            self.selected_tickers.remove(pos);
            false
        } else {
            self.selected_tickers.push(ticker.to_string());
            true
        }
    }

    pub fn has_enough_tickers(&self) -> bool {
        self.selected_tickers.len() >= FORM.tickers.min_selected
    }

    /// Apply the date picker limits: end no later than today, start no later than end.
    pub fn clamp_dates(&mut self, today: NaiveDate) {
        if self.end_date > today {
            self.end_date = today;
        }
        if self.start_date > self.end_date {
            self.start_date = self.end_date;
        }
    }

    /// Validate and snapshot the form. The ticker count is checked first.
    pub fn to_request(&self, today: NaiveDate) -> Result<AnalysisRequest, RequestError> {
        if !self.has_enough_tickers() {
            return Err(RequestError::TooFewTickers {
                selected: self.selected_tickers.len(),
            });
        }
        if self.end_date > today {
            return Err(RequestError::EndInFuture {
                end: self.end_date,
                today,
            });
        }
        if self.start_date > self.end_date {
            return Err(RequestError::StartAfterEnd {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if !(self.initial_investment.is_finite() && self.initial_investment > 0.0) {
            return Err(RequestError::NonPositiveInvestment(self.initial_investment));
        }
        if !(FORM.simulations.min..=FORM.simulations.max).contains(&self.sim_runs) {
            return Err(RequestError::SimRunsOutOfRange(self.sim_runs));
        }

        Ok(AnalysisRequest {
            tickers: self.selected_tickers.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            initial_investment: self.initial_investment,
            sim_runs: self.sim_runs,
        })
    }
}

/// Validated request; serializes to the `POST /portfolio/analyze` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub tickers: Vec<String>,
    /// Serialized as `YYYY-MM-DD`
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_investment: f64,
    pub sim_runs: u32,
}
