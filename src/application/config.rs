use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{
    chart::{Aggregate, RATIO_SCHEMA, ThresholdBand},
    errors::{ChartError, ChartResult},
    market_data::StockPair,
};

/// Host-supplied settings for one ratio chart. Every field has a default,
/// so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub viewer_tag: String,
    pub view: String,
    pub columns: Vec<String>,
    pub row_pivots: Vec<String>,
    pub aggregates: BTreeMap<String, Aggregate>,
    pub band: ThresholdBand,
    pub stocks: StockPair,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let aggregates = RATIO_SCHEMA
            .field_names()
            .into_iter()
            .map(|name| {
                let aggregate = if name == "timestamp" { Aggregate::DistinctCount } else { Aggregate::Avg };
                (name.to_string(), aggregate)
            })
            .collect();

        Self {
            viewer_tag: "perspective-viewer".to_string(),
            view: "y_line".to_string(),
            columns: ["ratio", "lower_bound", "upper_bound", "trigger_alert"]
                .into_iter()
                .map(String::from)
                .collect(),
            row_pivots: vec!["timestamp".to_string()],
            aggregates,
            band: ThresholdBand::default(),
            stocks: StockPair::default(),
        }
    }
}

impl ChartConfig {
    /// Parse and validate a JSON configuration. Empty input yields the defaults.
    pub fn from_json(json: &str) -> ChartResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ChartError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewer_tag.contains('-') {
            return Err(ChartError::Configuration(format!(
                "viewer tag {:?} is not a custom element name",
                self.viewer_tag
            )));
        }

        let unknown = self
            .columns
            .iter()
            .chain(self.row_pivots.iter())
            .chain(self.aggregates.keys())
            .find(|name| !RATIO_SCHEMA.contains(name));
        if let Some(name) = unknown {
            return Err(ChartError::Configuration(format!("unknown column {:?}", name)));
        }

        if self.stocks.abc.is_empty() || self.stocks.def.is_empty() || self.stocks.abc == self.stocks.def {
            return Err(ChartError::Configuration(format!(
                "stock pair {} must name two distinct tickers",
                self.stocks
            )));
        }

        self.band.validate()
    }

    /// Attribute name/value pairs applied to the viewer element after the table is loaded.
    pub fn viewer_attributes(&self) -> ChartResult<Vec<(&'static str, String)>> {
        Ok(vec![
            ("view", self.view.clone()),
            ("columns", serde_json::to_string(&self.columns)?),
            ("row-pivots", serde_json::to_string(&self.row_pivots)?),
            ("aggregates", serde_json::to_string(&self.aggregates)?),
        ])
    }
}
