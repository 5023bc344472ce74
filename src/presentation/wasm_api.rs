use leptos::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::{
    application::ChartConfig,
    domain::{
        errors::ChartError,
        logging::LogComponent,
        market_data::{ServerRecord, StockPair},
    },
    infrastructure::feed::{decode_quotes, decode_records},
    log_info,
    presentation::ratio_graph::RatioGraph,
};

/// JavaScript handle to a mounted ratio graph.
/// Each push replaces the component's input with a new batch.
#[wasm_bindgen]
pub struct RatioGraphHandle {
    records: RwSignal<Vec<ServerRecord>>,
    stocks: StockPair,
}

/// Mount a ratio graph inside the element with id `element_id`.
///
/// `config_json` is an optional JSON `ChartConfig`; omitted fields take their defaults.
#[wasm_bindgen(js_name = mountRatioGraph)]
pub fn mount_ratio_graph(element_id: &str, config_json: Option<String>) -> Result<RatioGraphHandle, JsValue> {
    let config = ChartConfig::from_json(config_json.as_deref().unwrap_or_default())?;

    let host = gloo::utils::document()
        .get_element_by_id(element_id)
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
        .ok_or_else(|| ChartError::ElementNotFound(element_id.to_string()))?;

    let records = create_rw_signal(Vec::new());
    let stocks = config.stocks.clone();
    mount_to(host, move || view! { <RatioGraph data=records config=config /> });

    log_info!(LogComponent::Presentation("WASM"), "🚀 Ratio graph mounted in #{} for {}", element_id, stocks);
    Ok(RatioGraphHandle { records, stocks })
}

#[wasm_bindgen]
impl RatioGraphHandle {
    /// Push a JSON array of `{price_abc, price_def, timestamp}` records.
    /// Invalid entries are dropped; returns how many were accepted.
    #[wasm_bindgen(js_name = pushRecords)]
    pub fn push_records(&self, json: &str) -> Result<usize, JsValue> {
        let batch = decode_records(json).map_err(ChartError::from)?;
        let accepted = batch.records.len();
        self.records.set(batch.records);
        Ok(accepted)
    }

    /// Push one quote-server payload: an array with a top-of-book snapshot per stock.
    #[wasm_bindgen(js_name = pushQuotes)]
    pub fn push_quotes(&self, json: &str) -> Result<(), JsValue> {
        let record = decode_quotes(json, &self.stocks).map_err(ChartError::from)?;
        self.records.set(vec![record]);
        Ok(())
    }
}
