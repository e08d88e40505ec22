// 進捗監視の具象実装

use crate::core::ProgressReporter;
use async_trait::async_trait;

/// tracingイベントによる進捗報告実装
#[derive(Debug, Clone)]
pub struct TracingProgressReporter {
    progress_interval: usize,
}

impl Default for TracingProgressReporter {
    fn default() -> Self {
        Self {
            progress_interval: 100,
        }
    }
}

impl TracingProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 何件ごとに進捗を出すか（0は1として扱う）
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    pub fn progress_interval(&self) -> usize {
        self.progress_interval
    }

    fn should_report(&self, completed: usize, total: usize) -> bool {
        completed % self.progress_interval == 0 || completed == total
    }
}

#[async_trait]
impl ProgressReporter for TracingProgressReporter {
    async fn report_started(&self, total_params: usize) {
        tracing::info!(total_params, "Starting dispatch");
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        if self.should_report(completed, total) {
            let percentage = (completed as f64 / total.max(1) as f64) * 100.0;
            tracing::debug!(completed, total, "Progress: {percentage:.1}%");
        }
    }

    async fn report_error(&self, param: &str, error: &str) {
        tracing::warn!(param, error, "Invocation failed");
    }

    async fn report_completed(&self, succeeded: usize, failed: usize) {
        tracing::info!(succeeded, failed, "Dispatch completed");
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_params: usize) {}

    async fn report_progress(&self, _completed: usize, _total: usize) {}

    async fn report_error(&self, _param: &str, _error: &str) {}

    async fn report_completed(&self, _succeeded: usize, _failed: usize) {}
}
