use serde::{Deserialize, Serialize};

use crate::domain::errors::RecordError;
use crate::domain::market_data::{Price, ServerRecord, StockPair, Timestamp};

/// Best price level on one side of the book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopOfBook {
    pub price: f64,
    pub size: f64,
}

/// DTO for one stock's top-of-book snapshot as published by the quote server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub stock: String,
    pub top_bid: TopOfBook,
    pub top_ask: TopOfBook,
    pub timestamp: String,
}

impl QuoteSnapshot {
    /// Midpoint of bid and ask
    pub fn mid_price(&self) -> Price {
        Price::from((self.top_bid.price + self.top_ask.price) / 2.0)
    }

    pub fn parsed_timestamp(&self) -> Result<Timestamp, RecordError> {
        Timestamp::parse_quote(&self.timestamp)
    }
}

/// Combine one snapshot per stock into a single record.
///
/// Prices are bid/ask midpoints; the record takes the later of the two timestamps.
pub fn pair_quotes(quotes: &[QuoteSnapshot], stocks: &StockPair) -> Result<ServerRecord, RecordError> {
    let find = |ticker: &str| {
        quotes
            .iter()
            .find(|quote| quote.stock == ticker)
            .ok_or_else(|| RecordError::MissingQuote(ticker.to_string()))
    };
    let abc = find(&stocks.abc)?;
    let def = find(&stocks.def)?;

    let timestamp = abc.parsed_timestamp()?.max(def.parsed_timestamp()?);
    ServerRecord::new(abc.mid_price(), def.mid_price(), timestamp)
}
