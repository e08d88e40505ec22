// テスト用の呼び出し関数とヘルパー

use multicall::{DefaultDispatchConfig, Dispatcher, NoOpProgressReporter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// テスト用の銘柄リスト
pub fn symbols(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("SYM{i:04}")).collect()
}

/// 上限を指定した静音ディスパッチャー
pub fn quiet_dispatcher(budget: usize) -> Dispatcher<DefaultDispatchConfig, NoOpProgressReporter> {
    Dispatcher::new(
        DefaultDispatchConfig::default()
            .with_max_concurrent(budget)
            .expect("budget must be non-zero")
            .with_progress_reporting(false),
        NoOpProgressReporter::new(),
    )
}

/// 決定的な疑似API応答
pub fn fake_quote(symbol: &str, multiplier: u64) -> u64 {
    symbol.bytes().map(u64::from).sum::<u64>() * multiplier
}

/// 同時実行数を記録するゲージ
#[derive(Debug, Default, Clone)]
pub struct ConcurrencyGauge {
    running: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    calls: Arc<AtomicUsize>,
}

impl ConcurrencyGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// 本体の実行中だけ計数し、`delay` だけ待つ
    pub async fn track(&self, delay: Duration) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(delay).await;
        self.running.fetch_sub(1, Ordering::SeqCst);
    }

    /// 同期関数用。スレッドを `delay` だけ止める
    pub fn track_blocking(&self, delay: Duration) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(delay);
        self.running.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
