pub use super::value_objects::{Price, Timestamp};
use serde::{Deserialize, Serialize};

use crate::domain::errors::RecordError;

/// One observation of both tracked stocks.
///
/// Construction is validated: both prices are finite, `price_def` is non-zero
/// and `price_abc / price_def` does not overflow, so the ratio of a record is
/// always finite. Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawServerRecord")]
pub struct ServerRecord {
    price_abc: Price,
    price_def: Price,
    timestamp: Timestamp,
}

impl ServerRecord {
    pub fn new(price_abc: Price, price_def: Price, timestamp: Timestamp) -> Result<Self, RecordError> {
        if !price_abc.is_finite() {
            return Err(RecordError::NonFinitePrice { field: "price_abc", value: price_abc.value() });
        }
        if !price_def.is_finite() {
            return Err(RecordError::NonFinitePrice { field: "price_def", value: price_def.value() });
        }
        if price_def.value() == 0.0 {
            return Err(RecordError::ZeroDenominator);
        }
        let ratio = price_abc.value() / price_def.value();
        if !ratio.is_finite() {
            return Err(RecordError::RatioOverflow { price_abc: price_abc.value(), price_def: price_def.value() });
        }
        Ok(Self { price_abc, price_def, timestamp })
    }

    pub fn price_abc(&self) -> Price {
        self.price_abc
    }

    pub fn price_def(&self) -> Price {
        self.price_def
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Wire shape of a record before validation
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawServerRecord {
    pub price_abc: f64,
    pub price_def: f64,
    pub timestamp: u64,
}

impl TryFrom<RawServerRecord> for ServerRecord {
    type Error = RecordError;

    fn try_from(raw: RawServerRecord) -> Result<Self, Self::Error> {
        ServerRecord::new(
            Price::from(raw.price_abc),
            Price::from(raw.price_def),
            Timestamp::from_millis(raw.timestamp),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator_is_rejected() {
        let err = ServerRecord::new(Price::from(1.0), Price::from(0.0), Timestamp::from_millis(0));
        assert_eq!(err, Err(RecordError::ZeroDenominator));
    }

    #[test]
    fn overflowing_ratio_is_rejected() {
        let err = ServerRecord::new(Price::from(f64::MAX), Price::from(0.5), Timestamp::from_millis(1));
        assert!(matches!(err, Err(RecordError::RatioOverflow { .. })));

        let tiny = ServerRecord::new(Price::from(1.0), Price::from(f64::MIN_POSITIVE / 8.0), Timestamp::from_millis(1));
        assert!(matches!(tiny, Err(RecordError::RatioOverflow { .. })));
    }

    #[test]
    fn nan_price_is_rejected() {
        let err = ServerRecord::new(Price::from(f64::NAN), Price::from(1.0), Timestamp::from_millis(0));
        assert!(matches!(err, Err(RecordError::NonFinitePrice { field: "price_abc", .. })));
    }

    #[test]
    fn deserialization_validates() {
        let ok: ServerRecord =
            serde_json::from_str(r#"{"price_abc":110.0,"price_def":100.0,"timestamp":5}"#).unwrap();
        assert_eq!(ok.price_abc().value(), 110.0);
        assert_eq!(ok.timestamp().value(), 5);

        let zero = serde_json::from_str::<ServerRecord>(r#"{"price_abc":1.0,"price_def":0.0,"timestamp":5}"#);
        assert!(zero.is_err());

        let missing = serde_json::from_str::<ServerRecord>(r#"{"price_abc":1.0,"timestamp":5}"#);
        assert!(missing.is_err());
    }
}
