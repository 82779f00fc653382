//! Analysis form defaults and bounds

/// Bounds for the initial investment input (USD)
pub struct InvestmentBounds {
    pub default: f64,
    pub min: f64,
    pub step: f64,
}

/// Bounds for the Monte Carlo simulation count input
pub struct SimulationBounds {
    pub default: u32,
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

/// Ticker selection rules
pub struct TickerRules {
    /// Submission is refused below this count
    pub min_selected: usize,
    /// Only suggested in the helper text, never enforced
    pub suggested_max: usize,
    /// Always offered first, whether or not the backend lists them
    pub popular: &'static [&'static str],
    /// Height of the scrollable ticker list
    pub list_max_height: f32,
}

/// The Master Form Configuration
pub struct FormConfig {
    /// Default start date is this many years before today
    pub default_lookback_years: i32,
    /// Number of years offered by the date picker's year dropdown
    pub date_picker_years: i32,
    pub investment: InvestmentBounds,
    pub simulations: SimulationBounds,
    pub tickers: TickerRules,
}

pub const FORM: FormConfig = FormConfig {
    default_lookback_years: 5,
    date_picker_years: 15,

    investment: InvestmentBounds {
        default: 1_000_000.0,
        min: 1_000.0,
        step: 1_000.0,
    },

    simulations: SimulationBounds {
        default: 100,
        min: 10,
        max: 10_000,
        step: 10,
    },

    tickers: TickerRules {
        min_selected: 2,
        suggested_max: 10,
        popular: &[
            "AAPL", "MSFT", "GOOGL", "AMZN", "META", "TSLA", "NVDA", "JPM", "JNJ", "PG", "V",
            "WMT", "DIS", "KO", "PFE", "INTC",
        ],
        list_max_height: 200.0,
    },
};
