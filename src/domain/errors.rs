use derive_more::Display;

/// Reasons an incoming record is refused before it can reach the chart
#[derive(Debug, Clone, PartialEq, Display)]
pub enum RecordError {
    #[display(fmt = "{} is not a finite price: {}", field, value)]
    NonFinitePrice { field: &'static str, value: f64 },
    #[display(fmt = "price_def is zero, ratio is undefined")]
    ZeroDenominator,
    #[display(fmt = "ratio of {} / {} overflows", price_abc, price_def)]
    RatioOverflow { price_abc: f64, price_def: f64 },
    #[display(fmt = "no quote for stock {}", _0)]
    MissingQuote(String),
    #[display(fmt = "invalid timestamp {:?}: {}", value, reason)]
    InvalidTimestamp { value: String, reason: String },
    #[display(fmt = "malformed record: {}", _0)]
    Malformed(String),
}

impl std::error::Error for RecordError {}

/// Failures of the chart component and its rendering environment
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ChartError {
    #[display(fmt = "rendering worker unavailable")]
    WorkerUnavailable,
    #[display(fmt = "table creation failed: {}", _0)]
    TableCreation(String),
    #[display(fmt = "table update failed: {}", _0)]
    TableUpdate(String),
    #[display(fmt = "viewer error: {}", _0)]
    Viewer(String),
    #[display(fmt = "element not found: {}", _0)]
    ElementNotFound(String),
    #[display(fmt = "serialization failed: {}", _0)]
    Serialization(String),
    #[display(fmt = "invalid configuration: {}", _0)]
    Configuration(String),
    #[display(fmt = "invalid record: {}", _0)]
    InvalidRecord(RecordError),
}

impl std::error::Error for ChartError {}

impl From<RecordError> for ChartError {
    fn from(error: RecordError) -> Self {
        ChartError::InvalidRecord(error)
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(error: serde_json::Error) -> Self {
        ChartError::Serialization(error.to_string())
    }
}

impl From<ChartError> for wasm_bindgen::JsValue {
    fn from(error: ChartError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
