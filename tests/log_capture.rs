use std::sync::Mutex;

use ratio_graph_wasm::application::{ChartComponent, ChartConfig, ChartPhase, UpdateOutcome};
use ratio_graph_wasm::domain::chart::{ChartTable, ChartViewer, Row, Schema, TableWorker};
use ratio_graph_wasm::domain::errors::ChartResult;
use ratio_graph_wasm::domain::logging::{LogComponent, LogEntry, LogLevel, Logger, init_logger};
use ratio_graph_wasm::domain::market_data::{Price, ServerRecord, Timestamp};
use ratio_graph_wasm::infrastructure::feed::decode_records;

static CAPTURED: Mutex<Vec<LogEntry>> = Mutex::new(Vec::new());

struct CapturingLogger;

impl Logger for CapturingLogger {
    fn log(&self, entry: LogEntry) {
        CAPTURED.lock().unwrap().push(entry);
    }
}

fn entries_from(component: LogComponent) -> Vec<LogEntry> {
    init_logger(Box::new(CapturingLogger));
    CAPTURED
        .lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.component == component)
        .cloned()
        .collect()
}

struct NullTable;

impl ChartTable for NullTable {
    fn update(&self, _rows: &[Row]) -> ChartResult<()> {
        Ok(())
    }
}

struct NullWorker;

impl TableWorker for NullWorker {
    type Table = NullTable;

    fn create_table(&self, _schema: &Schema) -> ChartResult<NullTable> {
        Ok(NullTable)
    }
}

struct NullViewer;

impl ChartViewer<NullTable> for NullViewer {
    fn load(&self, _table: &NullTable) -> ChartResult<()> {
        Ok(())
    }

    fn set_attribute(&self, _name: &str, _value: &str) -> ChartResult<()> {
        Ok(())
    }
}

#[test]
fn rejected_records_are_logged_with_their_position() {
    init_logger(Box::new(CapturingLogger));
    let batch = decode_records(
        r#"[
            {"price_abc": 110, "price_def": 100, "timestamp": 1},
            {"price_abc": 1, "price_def": 0, "timestamp": 2}
        ]"#,
    )
    .unwrap();
    assert_eq!(batch.records.len(), 1);

    let warnings = entries_from(LogComponent::Infrastructure("Feed"));
    let entry = warnings
        .iter()
        .find(|entry| entry.message.contains("zero"))
        .expect("rejection logged");
    assert_eq!(entry.level, LogLevel::Warn);
    assert_eq!(entry.metadata.as_deref(), Some("{\"index\":1}"));
}

#[test]
fn missing_worker_stays_quiet() {
    init_logger(Box::new(CapturingLogger));
    let mut chart: ChartComponent<NullTable> = ChartComponent::new(ChartConfig::default());

    assert_eq!(chart.mount(None::<&NullWorker>, &NullViewer), ChartPhase::MountedNoTable);
    let record = ServerRecord::new(Price::from(110.0), Price::from(100.0), Timestamp::from_millis(1)).unwrap();
    assert_eq!(chart.update(&[record]).unwrap(), UpdateOutcome::Skipped);
    chart.unmount();

    let loud: Vec<LogEntry> = entries_from(LogComponent::Application("RatioChart"))
        .into_iter()
        .filter(|entry| entry.level > LogLevel::Debug)
        .collect();
    assert!(loud.is_empty(), "unexpected entries: {:?}", loud);
}
