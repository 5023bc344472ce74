use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use ratio_graph_wasm::domain::chart::{RowGenerator, ThresholdBand};
use ratio_graph_wasm::domain::market_data::{Price, ServerRecord, Timestamp};

fn record(abc: f64, def: f64, ts: u64) -> ServerRecord {
    ServerRecord::new(Price::from(abc), Price::from(def), Timestamp::from_millis(ts)).unwrap()
}

#[test]
fn ratio_above_band_triggers_alert() {
    let row = RowGenerator::default().generate_row(&record(110.0, 100.0, 1_000));

    assert_eq!(row.price_abc, 110.0);
    assert_eq!(row.price_def, 100.0);
    assert_eq!(row.ratio, 1.1);
    assert_eq!(row.upper_bound, 1.05);
    assert_eq!(row.lower_bound, 0.95);
    assert_eq!(row.trigger_alert, 1);
    assert_eq!(row.timestamp, Timestamp::from_millis(1_000));
}

#[test]
fn equal_prices_stay_quiet() {
    let row = RowGenerator::default().generate_row(&record(100.0, 100.0, 7));
    assert_eq!(row.ratio, 1.0);
    assert_eq!(row.trigger_alert, 0);
}

#[test]
fn ratio_below_band_triggers_alert() {
    let row = RowGenerator::default().generate_row(&record(90.0, 100.0, 7));
    assert!(row.is_alert());
}

#[test]
fn custom_band_is_applied() {
    let generator = RowGenerator::new(ThresholdBand::around(1.0, 0.10).unwrap());
    let row = generator.generate_row(&record(108.0, 100.0, 0));
    assert_eq!(row.trigger_alert, 0);
    assert!((row.upper_bound - 1.1).abs() < 1e-12);
    assert!((row.lower_bound - 0.9).abs() < 1e-12);
}

#[test]
fn empty_batch_gives_no_rows() {
    assert!(RowGenerator::default().generate(&[]).is_empty());
}

#[quickcheck]
fn ratio_is_exact_quotient(abc: f64, def: f64, ts: u64) -> TestResult {
    let Ok(record) = ServerRecord::new(Price::from(abc), Price::from(def), Timestamp::from_millis(ts)) else {
        return TestResult::discard();
    };
    let row = RowGenerator::default().generate_row(&record);
    TestResult::from_bool(row.ratio == abc / def)
}

#[quickcheck]
fn alert_iff_outside_band(abc: f64, def: f64) -> TestResult {
    let Ok(record) = ServerRecord::new(Price::from(abc), Price::from(def), Timestamp::from_millis(0)) else {
        return TestResult::discard();
    };
    let row = RowGenerator::default().generate_row(&record);
    let expected = u8::from(row.ratio > 1.05 || row.ratio < 0.95);
    TestResult::from_bool(row.trigger_alert == expected)
}

#[quickcheck]
fn batch_preserves_length_and_order(prices: Vec<(u16, u16)>) -> bool {
    let records: Vec<ServerRecord> = prices
        .iter()
        .enumerate()
        .map(|(i, (abc, def))| record(f64::from(*abc), f64::from(*def) + 1.0, i as u64))
        .collect();

    let rows = RowGenerator::default().generate(&records);

    rows.len() == records.len()
        && rows
            .iter()
            .zip(&records)
            .all(|(row, rec)| row.timestamp == rec.timestamp() && row.price_abc == rec.price_abc().value())
}

#[quickcheck]
fn accepted_records_yield_finite_ratio(abc: f64, def: f64) -> TestResult {
    let Ok(record) = ServerRecord::new(Price::from(abc), Price::from(def), Timestamp::from_millis(0)) else {
        return TestResult::discard();
    };
    let row = RowGenerator::default().generate_row(&record);
    let json = serde_json::to_value(row).unwrap();
    TestResult::from_bool(row.ratio.is_finite() && json["ratio"].is_number())
}
