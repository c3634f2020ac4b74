//! A normalized table of bars for one or more symbols.

use indexmap::IndexMap;

use crate::models::bar::Bar;

/// Ordered rows of [`Bar`]s.
///
/// A series is only built through [`BarSeries::normalized`], so it always
/// holds:
/// - rows grouped by symbol, symbols in first-seen order;
/// - ascending timestamps within a symbol;
/// - no duplicate `(symbol, timestamp)` pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Groups, sorts and de-duplicates `bars`.
    ///
    /// When two rows share a `(symbol, timestamp)` the one seen first wins.
    pub fn normalized(bars: impl IntoIterator<Item = Bar>) -> Self {
        let mut by_symbol: IndexMap<String, Vec<Bar>> = IndexMap::new();
        for bar in bars {
            by_symbol.entry(bar.symbol.clone()).or_default().push(bar);
        }

        let mut out = Vec::with_capacity(by_symbol.values().map(Vec::len).sum());
        for (_, mut rows) in by_symbol {
            // stable sort keeps the first-seen duplicate in front
            rows.sort_by_key(|b| b.timestamp);
            rows.dedup_by_key(|b| b.timestamp);
            out.extend(rows);
        }

        Self { bars: out }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Distinct symbols in first-seen order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for bar in &self.bars {
            if out.last() != Some(&bar.symbol.as_str()) {
                out.push(&bar.symbol);
            }
        }
        out
    }

    /// The rows of a single symbol, still normalized.
    pub fn for_symbol(&self, symbol: &str) -> BarSeries {
        BarSeries {
            bars: self
                .bars
                .iter()
                .filter(|b| b.symbol == symbol)
                .cloned()
                .collect(),
        }
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}

impl<'a> IntoIterator for &'a BarSeries {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
