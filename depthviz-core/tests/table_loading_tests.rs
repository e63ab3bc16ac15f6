//! Integration tests for reading market tables from a directory

use depthviz_core::data::{load_snapshot, MarketTables, TableError};
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

const RATIO: &str = r#"[
    {"datetime":"2024-05-01T00:00:00Z","ar_open":1.0,"ar_high":1.2,"ar_low":0.9,"ar_close":1.1},
    {"datetime":"2024-05-01T00:15:00Z","ar_open":1.1,"ar_high":1.3,"ar_low":1.0,"ar_close":1.2,"sma20":1.05}
]"#;

#[test]
fn test_load_dir_with_only_ratio() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), MarketTables::RATIO_FILE, RATIO);

    let tables = MarketTables::load_dir(dir.path()).unwrap();

    assert_eq!(tables.ratio.len(), 2);
    assert!(tables.btc.is_empty());
    assert!(tables.supports.is_empty());
    assert!(tables.liquidity.is_none());
    assert!(tables.orderbook.is_none());
    assert_eq!(
        tables.last_time().unwrap().to_rfc3339(),
        "2024-05-01T00:15:00+00:00"
    );
}

#[test]
fn test_load_dir_full() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), MarketTables::RATIO_FILE, RATIO);
    write(
        dir.path(),
        MarketTables::BTC_FILE,
        r#"[{"datetime":"2024-05-01T00:00:00Z","open":60000,"high":60100,"low":59900,"close":60050,"volume":12.5}]"#,
    );
    write(dir.path(), MarketTables::SUPPORTS_FILE, r#"[{"price":0.95},{"price":0.9}]"#);
    write(dir.path(), MarketTables::RESISTANCES_FILE, r#"[{"price":1.4}]"#);
    write(dir.path(), MarketTables::LIQUIDITY_FILE, r#"{"bsl":1.5,"ssl":0.85}"#);
    write(
        dir.path(),
        MarketTables::ORDERBOOK_FILE,
        r#"{"symbol":"SOLUSDT","bids":[[150.1,3]],"asks":[[150.2,4]]}"#,
    );

    let tables = MarketTables::load_dir(dir.path()).unwrap();

    assert_eq!(tables.btc[0].volume, Some(12.5));
    assert_eq!(tables.supports.len(), 2);
    assert_eq!(tables.resistances[0].price, 1.4);
    assert_eq!(tables.liquidity.unwrap().ssl, Some(0.85));
    assert_eq!(tables.orderbook.unwrap().symbol, "SOLUSDT");
}

#[test]
fn test_missing_ratio_is_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), MarketTables::BTC_FILE, "[]");

    assert!(matches!(
        MarketTables::load_dir(dir.path()),
        Err(TableError::Missing { .. })
    ));
}

#[test]
fn test_malformed_table_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), MarketTables::RATIO_FILE, "{not json");

    let err = MarketTables::load_dir(dir.path()).unwrap_err();
    assert!(matches!(err, TableError::Json { .. }));
    assert!(err.to_string().contains("ratio.json"));
}

#[test]
fn test_load_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.json");
    fs::write(&path, r#"{"symbol":"BTCUSDT","bids":[[100,2]],"asks":[]}"#).unwrap();

    let snapshot = load_snapshot(&path).unwrap();
    assert_eq!(snapshot.bids.len(), 1);
    assert!(snapshot.asks.is_empty());

    assert!(matches!(
        load_snapshot(dir.path().join("absent.json")),
        Err(TableError::Io { .. })
    ));
}
