use crate::{
    models::{
        request_params::{BarsRequestParams, ProviderParams},
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::ProviderError,
};

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

impl Adjustment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Adjustment::Raw => "raw",
            Adjustment::Split => "split",
            Adjustment::Dividend => "dividend",
            Adjustment::All => "all",
        }
    }
}

/// Specifies the source feed for stock data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Feed {
    #[default]
    Sip,
    Iex,
    Otc,
}

impl Feed {
    pub const fn as_str(self) -> &'static str {
        match self {
            Feed::Sip => "sip",
            Feed::Iex => "iex",
            Feed::Otc => "otc",
        }
    }
}

/// Specifies the sort order for the bars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    pub const fn as_str(self) -> &'static str {
        match self {
            Sort::Asc => "asc",
            Sort::Desc => "desc",
        }
    }
}

/// Alpaca-specific parameters for a bars request.
#[derive(Clone, Debug, Default)]
pub struct AlpacaBarsParams {
    pub adjustment: Option<Adjustment>,
    pub feed: Option<Feed>,
    pub currency: Option<String>,
    pub sort: Option<Sort>,
}

/// Checks `tf` against the combinations the bars endpoint accepts.
pub fn validate_timeframe(tf: &TimeFrame) -> Result<(), ProviderError> {
    let ok = match tf.unit {
        TimeFrameUnit::Minute => (1..=59).contains(&tf.amount),
        TimeFrameUnit::Hour => (1..=23).contains(&tf.amount),
        TimeFrameUnit::Day | TimeFrameUnit::Week => tf.amount == 1,
        TimeFrameUnit::Month => [1, 2, 3, 6, 12].contains(&tf.amount),
    };
    if ok {
        Ok(())
    } else {
        Err(ProviderError::Validation(format!(
            "timeframe {tf} is not supported by Alpaca"
        )))
    }
}

/// Builds the query string for one page.
///
/// `limit` is the number of rows still wanted, not the caller's total.
pub fn construct_params(
    params: &BarsRequestParams,
    limit: Option<u32>,
    page_token: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![("timeframe", params.timeframe.to_string())];

    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    if let Some(start) = params.start {
        query.push(("start", start.to_rfc3339()));
    }
    if let Some(end) = params.end {
        query.push(("end", end.to_rfc3339()));
    }

    if let ProviderParams::Alpaca(alpaca) = &params.provider_specific {
        if let Some(adjustment) = alpaca.adjustment {
            query.push(("adjustment", adjustment.as_str().to_string()));
        }
        if let Some(feed) = alpaca.feed {
            query.push(("feed", feed.as_str().to_string()));
        }
        if let Some(currency) = &alpaca.currency {
            query.push(("currency", currency.clone()));
        }
        if let Some(sort) = alpaca.sort {
            query.push(("sort", sort.as_str().to_string()));
        }
    }

    if let Some(token) = page_token {
        query.push(("page_token", token.to_string()));
    }

    query
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn accepts_documented_timeframes() {
        for tf in ["1Min", "59Min", "1Hour", "23Hour", "1Day", "1Week", "6Month"] {
            let tf: TimeFrame = tf.parse().unwrap();
            assert!(validate_timeframe(&tf).is_ok(), "{tf}");
        }
    }

    #[test]
    fn rejects_out_of_range_timeframes() {
        for tf in ["60Min", "24Hour", "2Day", "2Week", "4Month"] {
            let tf: TimeFrame = tf.parse().unwrap();
            assert!(
                matches!(validate_timeframe(&tf), Err(ProviderError::Validation(_))),
                "{tf}"
            );
        }
    }

    #[test]
    fn query_contains_optional_fields_only_when_set() {
        let mut params = BarsRequestParams::new(TimeFrame::day(), 10);
        let query = construct_params(&params, Some(10), None);
        assert_eq!(
            query,
            vec![("timeframe", "1Day".to_string()), ("limit", "10".to_string())]
        );

        params.start = Some(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap());
        params.provider_specific = ProviderParams::Alpaca(AlpacaBarsParams {
            feed: Some(Feed::Iex),
            sort: Some(Sort::Desc),
            ..Default::default()
        });
        let query = construct_params(&params, Some(4), Some("tok"));
        assert!(query.contains(&("limit", "4".to_string())));
        assert!(query.contains(&("start", "2025-01-02T00:00:00+00:00".to_string())));
        assert!(query.contains(&("feed", "iex".to_string())));
        assert!(query.contains(&("sort", "desc".to_string())));
        assert_eq!(query.last(), Some(&("page_token", "tok".to_string())));
    }
}
