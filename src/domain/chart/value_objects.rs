use derive_more::Display;
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use strum::AsRefStr;

use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::market_data::Timestamp;

/// Value Object - primitive column type understood by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum FieldType {
    #[display(fmt = "float")]
    #[strum(serialize = "float")]
    Float,
    #[display(fmt = "integer")]
    #[strum(serialize = "integer")]
    Integer,
    #[display(fmt = "datetime")]
    #[strum(serialize = "datetime")]
    Datetime,
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

/// Value Object - how the viewer folds rows that share a pivot value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Aggregate {
    #[display(fmt = "avg")]
    #[serde(rename = "avg")]
    Avg,
    #[display(fmt = "sum")]
    #[serde(rename = "sum")]
    Sum,
    #[display(fmt = "last")]
    #[serde(rename = "last")]
    Last,
    #[display(fmt = "distinct count")]
    #[serde(rename = "distinct count")]
    DistinctCount,
}

/// Value Object - ordered column declaration handed to the table once
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<(&'static str, FieldType)>,
}

impl Schema {
    pub fn new(fields: Vec<(&'static str, FieldType)>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, FieldType)> + '_ {
        self.fields.iter().copied()
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| *field == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(ChartError::from)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, kind) in &self.fields {
            map.serialize_entry(name, kind)?;
        }
        map.end()
    }
}

/// The one schema every [`Row`] conforms to.
pub static RATIO_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        ("price_abc", FieldType::Float),
        ("price_def", FieldType::Float),
        ("ratio", FieldType::Float),
        ("timestamp", FieldType::Datetime),
        ("upper_bound", FieldType::Float),
        ("lower_bound", FieldType::Float),
        ("trigger_alert", FieldType::Integer),
    ])
});

/// Value Object - band the ratio is expected to stay within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub upper: f64,
    pub lower: f64,
}

impl Default for ThresholdBand {
    fn default() -> Self {
        Self { upper: 1.05, lower: 0.95 }
    }
}

impl ThresholdBand {
    pub fn new(lower: f64, upper: f64) -> ChartResult<Self> {
        let band = Self { upper, lower };
        band.validate()?;
        Ok(band)
    }

    /// Band of `±pct` around a reference ratio, e.g. a 12-month average.
    pub fn around(center: f64, pct: f64) -> ChartResult<Self> {
        Self::new(center * (1.0 - pct), center * (1.0 + pct))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.upper.is_finite() || !self.lower.is_finite() {
            return Err(ChartError::Configuration(format!(
                "band bounds must be finite, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        if self.lower > self.upper {
            return Err(ChartError::Configuration(format!(
                "lower bound {} exceeds upper bound {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }

    /// True when `ratio` lies inside `[lower, upper]`.
    pub fn contains(&self, ratio: f64) -> bool {
        ratio >= self.lower && ratio <= self.upper
    }
}

/// One schema-conformant record appended to the table.
///
/// Field order matches [`RATIO_SCHEMA`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Row {
    pub price_abc: f64,
    pub price_def: f64,
    pub ratio: f64,
    pub timestamp: Timestamp,
    pub upper_bound: f64,
    pub lower_bound: f64,
    pub trigger_alert: u8,
}

impl Row {
    pub fn is_alert(&self) -> bool {
        self.trigger_alert == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_around_average() {
        let band = ThresholdBand::around(2.0, 0.10).unwrap();
        assert!((band.lower - 1.8).abs() < 1e-12);
        assert!((band.upper - 2.2).abs() < 1e-12);
    }

    #[test]
    fn inverted_band_is_rejected() {
        assert!(matches!(ThresholdBand::new(1.1, 0.9), Err(ChartError::Configuration(_))));
    }

    #[test]
    fn band_edges_are_inside() {
        let band = ThresholdBand::default();
        assert!(band.contains(1.05));
        assert!(band.contains(0.95));
        assert!(!band.contains(1.0500001));
    }

    #[test]
    fn schema_json_keeps_declared_order() {
        let json = RATIO_SCHEMA.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"price_abc":"float","price_def":"float","ratio":"float","timestamp":"datetime","upper_bound":"float","lower_bound":"float","trigger_alert":"integer"}"#
        );
    }
}
