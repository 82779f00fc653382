use serde::Deserialize;
use std::collections::BTreeMap;

/// Allowed drift of the weight sum from 1.0 before we log a warning
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Metrics of the best risk-adjusted portfolio.
/// Scalars are optional: a missing value renders as "N/A".
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptimalMetrics {
    /// Annualised, already in percent
    #[serde(default)]
    pub expected_return: Option<f64>,
    /// Already in percent
    #[serde(default)]
    pub volatility: Option<f64>,
    #[serde(default)]
    pub sharpe_ratio: Option<f64>,
    #[serde(default)]
    pub final_value: Option<f64>,
    /// Already in percent
    #[serde(default)]
    pub return_on_investment: Option<f64>,
    /// Fractions in 0..=1, expected to sum to 1
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisResults {
    pub optimal_metrics: OptimalMetrics,
    #[serde(default)]
    pub initial_investment: Option<f64>,
    /// Chart key -> path relative to the backend's static root
    #[serde(default)]
    pub plot_paths: BTreeMap<String, String>,
}

impl OptimalMetrics {
    pub fn weight_sum(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn weights_are_normalized(&self) -> bool {
        (self.weight_sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Heaviest first; ties keep ticker order
    pub fn weights_by_size(&self) -> Vec<(&str, f64)> {
        let mut weights: Vec<(&str, f64)> = self
            .weights
            .iter()
            .map(|(ticker, weight)| (ticker.as_str(), *weight))
            .collect();
        weights.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        weights
    }
}

/// Weight as the percentage label shown next to its bar, e.g. `0.6 -> "60.00%"`
pub fn weight_label(weight: f64) -> String {
    format!("{:.2}%", weight * 100.0)
}
