//! Chart key classification and display titles

const CANDLESTICK_MARKER: &str = "_candlestick";
const TRENDS_PIE_MARKER: &str = "_trends_pie";
const KEY_PREFIX: &str = "plot_";

/// Titles of the portfolio-wide charts the backend is known to produce
const KNOWN_TITLES: &[(&str, &str)] = &[
    ("plot_closing_prices", "Closing Prices"),
    ("plot_daily_returns", "Daily Returns"),
    ("plot_returns_histogram", "Returns Histogram"),
    ("plot_correlation_heatmap", "Correlation Matrix"),
    ("plot_efficient_frontier", "Efficient Frontier"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartKind {
    /// Portfolio-wide chart
    Overview,
    Candlestick { ticker: String },
    TrendsPie { ticker: String },
}

impl ChartKind {
    pub fn from_key(key: &str) -> Self {
        if key.contains(CANDLESTICK_MARKER) {
            ChartKind::Candlestick {
                ticker: strip_markers(key, CANDLESTICK_MARKER),
            }
        } else if key.contains(TRENDS_PIE_MARKER) {
            ChartKind::TrendsPie {
                ticker: strip_markers(key, TRENDS_PIE_MARKER),
            }
        } else {
            ChartKind::Overview
        }
    }

    pub fn is_per_ticker(&self) -> bool {
        !matches!(self, ChartKind::Overview)
    }
}

fn strip_markers(key: &str, marker: &str) -> String {
    key.replacen(KEY_PREFIX, "", 1).replacen(marker, "", 1)
}

/// Human title for a chart key
pub fn chart_title(key: &str) -> String {
    match ChartKind::from_key(key) {
        ChartKind::Candlestick { ticker } => format!("Candlestick Chart - {}", ticker),
        ChartKind::TrendsPie { ticker } => format!("Trends - {}", ticker),
        ChartKind::Overview => KNOWN_TITLES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, title)| title.to_string())
            .unwrap_or_else(|| title_case(&key.replacen(KEY_PREFIX, "", 1).replace('_', " "))),
    }
}

/// Upper-case the first character of every word, leaving the rest untouched
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_word = false;
    for c in text.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

/// How a chart asset can be shown inside the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEmbed {
    /// Raster image, drawn inline
    Image,
    /// Anything else (interactive HTML, SVG, ...): open externally
    Document,
}

impl ChartEmbed {
    const IMAGE_EXTENSIONS: &'static [&'static str] = &["png", "jpg", "jpeg", "gif", "webp"];

    pub fn from_path(path: &str) -> Self {
        let without_query = path.split(['?', '#']).next().unwrap_or(path);
        let extension = without_query
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension {
            Some(ext) if Self::IMAGE_EXTENSIONS.contains(&ext.as_str()) => ChartEmbed::Image,
            _ => ChartEmbed::Document,
        }
    }
}

/// Split chart entries into (overview, per-ticker), keeping key order
pub fn split_chart_paths<'a, I>(paths: I) -> (Vec<(&'a str, &'a str)>, Vec<(&'a str, &'a str)>)
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    paths
        .into_iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .partition(|(key, _)| !ChartKind::from_key(key).is_per_ticker())
}
