//! Price-change plus volume-spike momentum rule.
//!
//! Over one symbol's series:
//!
//! ```text
//! price_change_pct = (last_close - first_open) / first_open * 100
//! triggered        = price_change_pct >= price_thresh
//!                    && last_volume > mean(volume) * volume_multiplier
//! ```

use market_data_ingestor::BarSeries;
use serde::Deserialize;
use thiserror::Error;

/// `[strategy]` section.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MomentumParams {
    /// Minimum price change, in percent.
    pub price_thresh: f64,
    /// Last volume must exceed the mean volume times this factor.
    pub volume_multiplier: f64,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            price_thresh: 1.0,
            volume_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumMetrics {
    pub price_change_pct: f64,
    pub avg_volume: f64,
    pub last_volume: u64,
    /// `last_volume / avg_volume`; 0 when every volume is 0.
    pub volume_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumSignal {
    pub triggered: bool,
    /// `None` when the series is too short to evaluate.
    pub metrics: Option<MomentumMetrics>,
}

impl MomentumSignal {
    const NOT_ENOUGH_DATA: Self = Self {
        triggered: false,
        metrics: None,
    };
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MomentumError {
    #[error("first open price must be positive and finite, got {0}")]
    NonPositiveOpen(f64),

    #[error("momentum is evaluated per symbol, series holds {0:?}")]
    MixedSymbols(Vec<String>),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumEvaluator {
    params: MomentumParams,
}

impl MomentumEvaluator {
    pub fn new(params: MomentumParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MomentumParams {
        &self.params
    }

    /// Evaluates a single-symbol series.
    ///
    /// Fewer than two rows is a definite "no signal", not an error.
    pub fn evaluate(&self, series: &BarSeries) -> Result<MomentumSignal, MomentumError> {
        let symbols = series.symbols();
        if symbols.len() > 1 {
            return Err(MomentumError::MixedSymbols(
                symbols.into_iter().map(str::to_string).collect(),
            ));
        }

        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Ok(MomentumSignal::NOT_ENOUGH_DATA);
        };
        if series.len() < 2 {
            return Ok(MomentumSignal::NOT_ENOUGH_DATA);
        }
        if !(first.open.is_finite() && first.open > 0.0) {
            return Err(MomentumError::NonPositiveOpen(first.open));
        }

        let price_change_pct = (last.close - first.open) / first.open * 100.0;
        let total_volume: f64 = series.iter().map(|b| b.volume as f64).sum();
        let avg_volume = total_volume / series.len() as f64;
        let last_volume = last.volume;
        let volume_ratio = if avg_volume > 0.0 {
            last_volume as f64 / avg_volume
        } else {
            0.0
        };

        let triggered = price_change_pct >= self.params.price_thresh
            && last_volume as f64 > avg_volume * self.params.volume_multiplier;

        tracing::debug!(
            symbol = %last.symbol,
            triggered,
            price_change_pct = format_args!("{price_change_pct:.2}"),
            last_volume,
            avg_volume = format_args!("{avg_volume:.0}"),
            "momentum evaluated"
        );

        Ok(MomentumSignal {
            triggered,
            metrics: Some(MomentumMetrics {
                price_change_pct,
                avg_volume,
                last_volume,
                volume_ratio,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use market_data_ingestor::Bar;

    use super::*;

    /// One bar per minute; `open` on the first row, `close` on the last.
    fn series(symbol: &str, first_open: f64, last_close: f64, volumes: &[u64]) -> BarSeries {
        let start = Utc.with_ymd_and_hms(2025, 1, 2, 14, 30, 0).unwrap();
        let n = volumes.len();
        BarSeries::normalized(volumes.iter().enumerate().map(|(i, &volume)| Bar {
            timestamp: start + Duration::minutes(i as i64),
            symbol: symbol.to_string(),
            open: if i == 0 { first_open } else { 101.0 },
            high: 103.0,
            low: 99.0,
            close: if i + 1 == n { last_close } else { 101.0 },
            volume,
        }))
    }

    fn evaluator() -> MomentumEvaluator {
        MomentumEvaluator::new(MomentumParams::default())
    }

    #[test]
    fn price_rise_with_volume_spike_triggers() {
        let s = series("AAPL", 100.0, 102.0, &[10, 10, 10, 10, 50]);

        let signal = evaluator().evaluate(&s).unwrap();
        let metrics = signal.metrics.unwrap();

        assert!(signal.triggered);
        assert!((metrics.price_change_pct - 2.0).abs() < 1e-9);
        assert!((metrics.avg_volume - 18.0).abs() < 1e-9);
        assert_eq!(metrics.last_volume, 50);
        assert!((metrics.volume_ratio - 50.0 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn small_price_change_never_triggers() {
        let s = series("AAPL", 100.0, 100.5, &[10, 10, 10, 10, 500]);

        let signal = evaluator().evaluate(&s).unwrap();

        assert!(!signal.triggered);
        assert!((signal.metrics.unwrap().price_change_pct - 0.5).abs() < 1e-9);
    }

    #[test]
    fn price_rise_without_volume_spike_does_not_trigger() {
        // avg 20, 30 is not above 20 * 2
        let s = series("AAPL", 100.0, 105.0, &[10, 20, 20, 30]);
        assert!(!evaluator().evaluate(&s).unwrap().triggered);
    }

    #[test]
    fn threshold_is_inclusive_on_price() {
        let params = MomentumParams {
            price_thresh: 2.0,
            volume_multiplier: 1.0,
        };
        let s = series("AAPL", 100.0, 102.0, &[10, 30]);
        assert!(MomentumEvaluator::new(params).evaluate(&s).unwrap().triggered);
    }

    #[test]
    fn fewer_than_two_rows_is_no_signal() {
        assert_eq!(
            evaluator().evaluate(&BarSeries::empty()).unwrap(),
            MomentumSignal::NOT_ENOUGH_DATA
        );
        let one = series("AAPL", 100.0, 150.0, &[1_000]);
        assert_eq!(evaluator().evaluate(&one).unwrap(), MomentumSignal::NOT_ENOUGH_DATA);
    }

    #[test]
    fn zero_open_is_rejected() {
        let s = series("PENNY", 0.0, 1.0, &[10, 50]);
        assert_eq!(
            evaluator().evaluate(&s).unwrap_err(),
            MomentumError::NonPositiveOpen(0.0)
        );
    }

    #[test]
    fn mixed_symbols_are_rejected() {
        let mut bars = series("AAPL", 100.0, 102.0, &[10, 50]).into_bars();
        bars.extend(series("MSFT", 100.0, 102.0, &[10, 50]).into_bars());
        let err = evaluator()
            .evaluate(&BarSeries::normalized(bars))
            .unwrap_err();
        assert_eq!(err, MomentumError::MixedSymbols(vec!["AAPL".into(), "MSFT".into()]));
    }

    #[test]
    fn all_zero_volume_has_zero_ratio() {
        let s = series("AAPL", 100.0, 110.0, &[0, 0, 0]);
        let signal = evaluator().evaluate(&s).unwrap();
        assert!(!signal.triggered);
        assert_eq!(signal.metrics.unwrap().volume_ratio, 0.0);
    }
}
