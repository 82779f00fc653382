use crate::config::FORM;

/// A labelled set of selectable ticker symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerGroup {
    pub label: &'static str,
    pub tickers: Vec<String>,
}

/// Ticker catalog as offered by the form: a fixed "Popular" group followed by
/// everything else the backend listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerGroups {
    groups: Vec<TickerGroup>,
}

impl TickerGroups {
    pub const POPULAR_LABEL: &'static str = "Popular";
    pub const REMAINDER_LABEL: &'static str = "Full S&P 500";

    /// Popular symbols are always offered, even if the backend omits them.
    /// The remainder keeps the backend's order and drops duplicates.
    pub fn partition(available: &[String]) -> Self {
        let popular: Vec<String> = FORM
            .tickers
            .popular
            .iter()
            .map(|t| t.to_string())
            .collect();

        let mut remainder: Vec<String> = Vec::with_capacity(available.len());
        for ticker in available {
            let ticker = ticker.trim();
            if ticker.is_empty() || FORM.tickers.popular.contains(&ticker) {
                continue;
            }
            if !remainder.iter().any(|t| t == ticker) {
                remainder.push(ticker.to_string());
            }
        }

        Self {
            groups: vec![
                TickerGroup {
                    label: Self::POPULAR_LABEL,
                    tickers: popular,
                },
                TickerGroup {
                    label: Self::REMAINDER_LABEL,
                    tickers: remainder,
                },
            ],
        }
    }

    pub fn groups(&self) -> &[TickerGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.tickers.is_empty())
    }

    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.tickers.len()).sum()
    }

    /// Case-insensitive substring filter, keeping group structure.
    /// Groups left empty by the filter are dropped.
    pub fn filtered(&self, query: &str) -> Vec<(&'static str, Vec<&str>)> {
        let needle = query.trim().to_uppercase();
        self.groups
            .iter()
            .map(|group| {
                let hits: Vec<&str> = group
                    .tickers
                    .iter()
                    .map(String::as_str)
                    .filter(|t| needle.is_empty() || t.to_uppercase().contains(&needle))
                    .collect();
                (group.label, hits)
            })
            .filter(|(_, hits)| !hits.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn popular_group_is_fixed_and_remainder_excludes_it() {
        let groups = TickerGroups::partition(&symbols(&["AAPL", "XOM", "MSFT", "CVX", "XOM"]));

        let popular = &groups.groups()[0];
        assert_eq!(popular.label, TickerGroups::POPULAR_LABEL);
        assert_eq!(popular.tickers.len(), FORM.tickers.popular.len());
        assert_eq!(popular.tickers[0], "AAPL");

        let remainder = &groups.groups()[1];
        assert_eq!(remainder.tickers, symbols(&["XOM", "CVX"]));
    }

    #[test]
    fn default_catalog_is_empty() {
        let groups = TickerGroups::default();
        assert!(groups.is_empty());
        assert_eq!(groups.total(), 0);
        assert!(groups.filtered("").is_empty());
    }

    #[test]
    fn filter_is_case_insensitive_and_drops_empty_groups() {
        let groups = TickerGroups::partition(&symbols(&["XOM", "CVX"]));
        let hits = groups.filtered("xo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, TickerGroups::REMAINDER_LABEL);
        assert_eq!(hits[0].1, vec!["XOM"]);
    }
}
