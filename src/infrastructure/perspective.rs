//! Bindings to the Perspective widget loaded by the host page
//! (`window.perspective` and the `<perspective-viewer>` element).

use js_sys::{JSON, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::domain::{
    chart::{ChartTable, ChartViewer, Row, Schema, TableWorker},
    errors::{ChartError, ChartResult},
};

#[wasm_bindgen]
extern "C" {
    type PerspectiveModule;

    #[wasm_bindgen(method, catch)]
    fn worker(this: &PerspectiveModule) -> Result<JsValue, JsValue>;

    #[derive(Debug, Clone)]
    type JsWorker;

    #[wasm_bindgen(method, catch)]
    fn table(this: &JsWorker, schema: &JsValue) -> Result<JsValue, JsValue>;

    #[derive(Debug, Clone)]
    type JsTable;

    #[wasm_bindgen(method, catch)]
    fn update(this: &JsTable, data: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(extends = web_sys::HtmlElement)]
    #[derive(Debug, Clone)]
    type JsViewerElement;

    #[wasm_bindgen(method, catch)]
    fn load(this: &JsViewerElement, table: &JsTable) -> Result<(), JsValue>;
}

/// Human-readable text of a thrown JavaScript value
fn describe(value: JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> ChartResult<JsValue> {
    let json = serde_json::to_string(value)?;
    JSON::parse(&json).map_err(|e| ChartError::Serialization(describe(e)))
}

/// The page's Perspective worker
#[derive(Debug, Clone)]
pub struct PerspectiveWorker {
    inner: JsWorker,
}

impl PerspectiveWorker {
    /// `window.perspective.worker()`, or `None` when the library is not loaded
    /// or hands back no worker.
    pub fn detect() -> Option<Self> {
        let module = Reflect::get(&gloo::utils::window(), &JsValue::from_str("perspective")).ok()?;
        if module.is_undefined() || module.is_null() {
            return None;
        }
        let worker = module.unchecked_into::<PerspectiveModule>().worker().ok()?;
        if !worker.is_truthy() {
            return None;
        }
        Some(Self { inner: worker.unchecked_into() })
    }
}

impl TableWorker for PerspectiveWorker {
    type Table = PerspectiveTable;

    fn create_table(&self, schema: &Schema) -> ChartResult<PerspectiveTable> {
        let table = self
            .inner
            .table(&to_js(schema)?)
            .map_err(|e| ChartError::TableCreation(describe(e)))?;
        if !table.is_truthy() {
            return Err(ChartError::TableCreation("worker returned no table".to_string()));
        }
        Ok(PerspectiveTable { inner: table.unchecked_into() })
    }
}

/// Handle to a Perspective table
#[derive(Debug)]
pub struct PerspectiveTable {
    inner: JsTable,
}

impl ChartTable for PerspectiveTable {
    fn update(&self, rows: &[Row]) -> ChartResult<()> {
        self.inner
            .update(&to_js(rows)?)
            .map_err(|e| ChartError::TableUpdate(describe(e)))
    }
}

/// A `<perspective-viewer>` element placed inside a host node
#[derive(Debug, Clone)]
pub struct PerspectiveViewer {
    element: JsViewerElement,
}

impl PerspectiveViewer {
    pub fn create_in(host: &web_sys::Element, tag: &str) -> ChartResult<Self> {
        let element = gloo::utils::document()
            .create_element(tag)
            .map_err(|e| ChartError::Viewer(describe(e)))?;
        host.append_child(&element)
            .map_err(|e| ChartError::Viewer(describe(e)))?;
        Ok(Self { element: element.unchecked_into() })
    }
}

impl ChartViewer<PerspectiveTable> for PerspectiveViewer {
    fn load(&self, table: &PerspectiveTable) -> ChartResult<()> {
        self.element
            .load(&table.inner)
            .map_err(|e| ChartError::Viewer(describe(e)))
    }

    fn set_attribute(&self, name: &str, value: &str) -> ChartResult<()> {
        self.element
            .set_attribute(name, value)
            .map_err(|e| ChartError::Viewer(describe(e)))
    }
}
