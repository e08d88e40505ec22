// 周辺ユーティリティ（日付・認証情報・キャッシュ）の統合テスト

use crate::fixtures::{fake_quote, quiet_dispatcher, symbols};
use chrono::{NaiveDate, TimeDelta, Utc};
use multicall::services::credentials::{api_key_from, FINNHUB_API_KEY_VAR};
use multicall::services::dates::{formatted_dates, DATE_FORMAT, DEFAULT_LOOKBACK_DAYS};
use multicall::services::DOWNLOAD_DATE_KEY;
use multicall::{MulticallError, RequestCache};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_default_date_range_is_last_week() {
    let (start, end) = formatted_dates(None, None, DEFAULT_LOOKBACK_DAYS).unwrap();

    let start_date = NaiveDate::parse_from_str(&start, DATE_FORMAT).unwrap();
    let end_date = NaiveDate::parse_from_str(&end, DATE_FORMAT).unwrap();
    assert_eq!(end_date, Utc::now().date_naive());
    assert_eq!(end_date - start_date, TimeDelta::days(7));
    assert_eq!(start.len(), 10);
    assert_eq!(end.len(), 10);
}

#[test]
fn test_explicit_date_range_round_trip() {
    let range = formatted_dates(Some("2023-01-01"), Some("2023-01-10"), 7).unwrap();
    assert_eq!(range, ("2023-01-01".to_string(), "2023-01-10".to_string()));
}

#[test]
fn test_unparsable_date_fails_at_boundary() {
    let error = formatted_dates(Some("01/32/2023"), None, 7).unwrap_err();
    assert!(matches!(error, MulticallError::InvalidDate { .. }));
    assert!(error.is_recoverable());
}

#[test]
fn test_api_key_lookup() {
    let mut env = HashMap::new();
    assert_eq!(api_key_from(&env), None);

    env.insert(FINNHUB_API_KEY_VAR.to_string(), "c0ffee".to_string());
    assert_eq!(api_key_from(&env).as_deref(), Some("c0ffee"));
}

#[tokio::test]
async fn test_cache_round_trip_preserves_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cache.json");

    let cache = RequestCache::from_entries([("AAPL", json!({"c": 1.5})), ("meta", json!([1, 2]))]);
    let original_date = cache.download_date().unwrap();
    cache.to_json(&path).await.unwrap();

    // 少し待ってから再読み込みしても日時は更新されない
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let loaded = RequestCache::from_json(&path).await.unwrap();

    assert_eq!(loaded.data(), cache.data());
    assert_eq!(loaded.download_date().unwrap(), original_date);
}

#[tokio::test]
async fn test_non_object_cache_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("array.json");
    std::fs::write(&path, b"[1, 2, 3]").unwrap();

    let result = RequestCache::from_json(&path).await;
    assert!(matches!(result, Err(MulticallError::CacheShape { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_dispatch_results_cached_by_caller() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("quotes.json");

    let dispatcher = quiet_dispatcher(4);
    let func = |symbol: String, multiplier: Arc<u64>| async move {
        anyhow::Ok(json!({ "symbol": symbol.clone(), "price": fake_quote(&symbol, *multiplier) }))
    };
    let results = dispatcher.dispatch_with(func, symbols(5), 10u64).await;

    let cache = RequestCache::from_entries(results.into_successes());
    cache.to_json(&path).await.unwrap();

    let loaded = RequestCache::from_json(&path).await.unwrap();
    assert_eq!(loaded.data().len(), 6); // 5銘柄 + ダウンロード日時
    assert!(loaded.get(DOWNLOAD_DATE_KEY).is_some());
    assert_eq!(
        loaded.get("SYM0002").unwrap()["price"],
        json!(fake_quote("SYM0002", 10))
    );
}
