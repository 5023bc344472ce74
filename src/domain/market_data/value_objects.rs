use derive_more::{Constructor, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::errors::RecordError;

/// Value Object - price quote
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - instant in milliseconds since the Unix epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Constructor, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Layout of the quote server's timestamps, e.g. `2019-02-01 14:39:13.270455`
    pub const QUOTE_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }

    /// Parse a quote-server timestamp, interpreted as UTC.
    pub fn parse_quote(value: &str) -> Result<Self, RecordError> {
        let parsed = chrono::NaiveDateTime::parse_from_str(value.trim(), Self::QUOTE_FORMAT)
            .map_err(|e| RecordError::InvalidTimestamp {
                value: value.to_string(),
                reason: e.to_string(),
            })?;
        let millis = parsed.and_utc().timestamp_millis();
        u64::try_from(millis).map(Self).map_err(|_| RecordError::InvalidTimestamp {
            value: value.to_string(),
            reason: "before the Unix epoch".to_string(),
        })
    }
}

/// The two tickers whose price ratio is tracked
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[display(fmt = "{}/{}", abc, def)]
pub struct StockPair {
    pub abc: String,
    pub def: String,
}

impl Default for StockPair {
    fn default() -> Self {
        Self { abc: "ABC".to_string(), def: "DEF".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quote_server_timestamp() {
        let ts = Timestamp::parse_quote("2019-02-01 14:39:13.270455").unwrap();
        assert_eq!(ts.value(), 1_549_031_953_270);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(matches!(
            Timestamp::parse_quote("yesterday"),
            Err(RecordError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn pair_display() {
        assert_eq!(StockPair::default().to_string(), "ABC/DEF");
    }
}
