use crate::domain::chart::value_objects::{Row, ThresholdBand};
use crate::domain::market_data::ServerRecord;

/// Domain service that reshapes server records into chart rows
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowGenerator {
    band: ThresholdBand,
}

impl RowGenerator {
    pub fn new(band: ThresholdBand) -> Self {
        Self { band }
    }

    pub fn band(&self) -> ThresholdBand {
        self.band
    }

    pub fn generate_row(&self, record: &ServerRecord) -> Row {
        let price_abc = record.price_abc().value();
        let price_def = record.price_def().value();
        let ratio = price_abc / price_def;

        Row {
            price_abc,
            price_def,
            ratio,
            timestamp: record.timestamp(),
            upper_bound: self.band.upper,
            lower_bound: self.band.lower,
            trigger_alert: u8::from(!self.band.contains(ratio)),
        }
    }

    /// One row per record, in input order.
    pub fn generate(&self, records: &[ServerRecord]) -> Vec<Row> {
        records.iter().map(|record| self.generate_row(record)).collect()
    }
}
