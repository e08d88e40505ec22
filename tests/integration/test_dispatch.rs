// ディスパッチャーの統合テスト

use crate::fixtures::{fake_quote, quiet_dispatcher, symbols, ConcurrencyGauge};
use multicall::{blocking, multicall_with, InvocationError};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_distinct_param_has_an_entry() {
    let dispatcher = quiet_dispatcher(8);
    let mut params = symbols(50);
    params.extend(symbols(10)); // 重複を含む

    let func = |symbol: String, _args: Arc<()>| async move { anyhow::Ok(symbol.len()) };
    let results = dispatcher.dispatch(func, params.clone()).await;

    let distinct: HashSet<String> = params.into_iter().collect();
    assert_eq!(results.len(), distinct.len());
    for symbol in &distinct {
        assert!(results.contains(symbol), "missing entry for {symbol}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_results_match_sequential_computation() {
    let dispatcher = quiet_dispatcher(5);
    let func = |symbol: String, multiplier: Arc<u64>| async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        anyhow::Ok(fake_quote(&symbol, *multiplier))
    };

    let params = symbols(40);
    let results = dispatcher.dispatch_with(func, params.clone(), 3u64).await;

    for symbol in params {
        let expected = fake_quote(&symbol, 3);
        assert_eq!(*results.get(&symbol).unwrap().as_ref().unwrap(), expected);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrency_never_exceeds_budget() {
    let budget = 4;
    let dispatcher = quiet_dispatcher(budget);
    let gauge = ConcurrencyGauge::new();

    let func = {
        let gauge = gauge.clone();
        move |symbol: String, _args: Arc<()>| {
            let gauge = gauge.clone();
            async move {
                gauge.track(Duration::from_millis(3)).await;
                anyhow::Ok(symbol)
            }
        }
    };

    let results = dispatcher.dispatch(func, symbols(200)).await;

    assert_eq!(results.len(), 200);
    assert_eq!(gauge.calls(), 200);
    assert!(gauge.peak() <= budget, "peak {} exceeded budget", gauge.peak());
    assert!(gauge.peak() >= 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_blocking_join_waits_for_slowest_worker() {
    let dispatcher = quiet_dispatcher(16);
    let func = |symbol: String, _args: Arc<()>| async move {
        if symbol == "SYM0007" {
            tokio::time::sleep(Duration::from_millis(300)).await;
            return anyhow::Ok("slow".to_string());
        }
        anyhow::Ok("fast".to_string())
    };

    let start = Instant::now();
    let results = dispatcher.dispatch(func, symbols(20)).await;

    assert!(start.elapsed() >= Duration::from_millis(300));
    assert_eq!(results.len(), 20);
    assert_eq!(
        results.get(&"SYM0007".to_string()).unwrap().as_ref().unwrap(),
        "slow"
    );
}

#[tokio::test]
async fn test_empty_input_returns_empty_mapping() {
    let gauge = ConcurrencyGauge::new();
    let func = {
        let gauge = gauge.clone();
        move |symbol: String, _args: Arc<()>| {
            let gauge = gauge.clone();
            async move {
                gauge.track(Duration::ZERO).await;
                anyhow::Ok(symbol)
            }
        }
    };

    let results = quiet_dispatcher(2).dispatch(func, Vec::<String>::new()).await;

    assert!(results.is_empty());
    assert_eq!(gauge.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_partial_failures_keep_the_batch() {
    let func = |symbol: String, _args: Arc<()>| async move {
        if symbol.ends_with('3') {
            anyhow::bail!("no data for {symbol}");
        }
        anyhow::Ok(symbol.to_lowercase())
    };

    let results = multicall_with(func, symbols(20), ()).await;

    assert_eq!(results.len(), 20);
    assert_eq!(results.failure_count(), 2);
    assert_eq!(results.success_count(), 18);
    for (symbol, error) in results.failures() {
        assert!(symbol.ends_with('3'));
        assert!(matches!(error, InvocationError::Failed { .. }));
        assert!(error.to_string().contains(symbol.as_str()));
    }
}

#[test]
fn test_blocking_dispatch_of_sync_function() {
    let budget = 4;
    let dispatcher = quiet_dispatcher(budget);
    let gauge = ConcurrencyGauge::new();
    let func = {
        let gauge = gauge.clone();
        blocking(move |symbol: String, multiplier: &u64| -> anyhow::Result<u64> {
            gauge.track_blocking(Duration::from_millis(20));
            Ok(fake_quote(&symbol, *multiplier))
        })
    };

    let results = dispatcher
        .dispatch_blocking(func, symbols(8), 2u64)
        .expect("runtime should build");

    assert_eq!(results.success_count(), 8);
    assert_eq!(gauge.calls(), 8);
    // 同期関数でも並列に走り、上限は超えない
    assert!(gauge.peak() > 1, "expected parallel execution, peak {}", gauge.peak());
    assert!(gauge.peak() <= budget);
    assert_eq!(
        *results.get(&"SYM0001".to_string()).unwrap().as_ref().unwrap(),
        fake_quote("SYM0001", 2)
    );
}
