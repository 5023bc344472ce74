pub mod dto;

pub use dto::{QuoteSnapshot, TopOfBook, pair_quotes};

use crate::domain::errors::RecordError;
use crate::domain::logging::{LogComponent, LogLevel, get_logger};
use crate::domain::market_data::{RawServerRecord, ServerRecord, StockPair};

/// Records decoded from one pushed payload, plus what had to be dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    pub records: Vec<ServerRecord>,
    /// `(position in payload, reason)`
    pub rejected: Vec<(usize, RecordError)>,
}

/// Decode a JSON array of records. Entries that fail validation are dropped
/// individually; only a payload that is not a JSON array fails as a whole.
pub fn decode_records(json: &str) -> Result<RecordBatch, RecordError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| RecordError::Malformed(e.to_string()))?;

    let mut batch = RecordBatch::default();
    for (index, value) in values.into_iter().enumerate() {
        let decoded = serde_json::from_value::<RawServerRecord>(value)
            .map_err(|e| RecordError::Malformed(e.to_string()))
            .and_then(ServerRecord::try_from);
        match decoded {
            Ok(record) => batch.records.push(record),
            Err(reason) => {
                get_logger().log_with_metadata(
                    LogLevel::Warn,
                    LogComponent::Infrastructure("Feed"),
                    &format!("dropping record: {}", reason),
                    &format!("{{\"index\":{}}}", index),
                );
                batch.rejected.push((index, reason));
            }
        }
    }
    Ok(batch)
}

/// Decode one quote-server payload (a snapshot per stock) into a single record.
pub fn decode_quotes(json: &str, stocks: &StockPair) -> Result<ServerRecord, RecordError> {
    let quotes: Vec<QuoteSnapshot> =
        serde_json::from_str(json).map_err(|e| RecordError::Malformed(e.to_string()))?;
    pair_quotes(&quotes, stocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_entries_are_dropped_in_place() {
        let batch = decode_records(
            r#"[
                {"price_abc": 110, "price_def": 100, "timestamp": 1},
                {"price_abc": 1, "price_def": 0, "timestamp": 2},
                {"price_abc": 1, "timestamp": 3},
                {"price_abc": 95, "price_def": 100, "timestamp": 4}
            ]"#,
        )
        .unwrap();

        let stamps: Vec<u64> = batch.records.iter().map(|r| r.timestamp().value()).collect();
        assert_eq!(stamps, vec![1, 4]);
        assert_eq!(batch.rejected.len(), 2);
        assert_eq!(batch.rejected[0], (1, RecordError::ZeroDenominator));
        assert!(matches!(batch.rejected[1], (2, RecordError::Malformed(_))));
    }

    #[test]
    fn non_array_payload_fails() {
        assert!(matches!(decode_records(r#"{"price_abc":1}"#), Err(RecordError::Malformed(_))));
    }
}
