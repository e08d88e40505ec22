// Dispatcher - 依存性注入による並列ファンアウト・ディスパッチャー
// 設定とレポーターはコンストラクタで注入される

use super::worker_pool::{join_outcome, spawn_workers};
use crate::core::{
    DispatchConfig, DispatchResults, DispatchSummary, Invocation, MulticallError,
    MulticallResult, ProgressReporter,
};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// 同じ関数をパラメーターごとに並列実行し、全ワーカーの終了を待って結果を集約する
///
/// ワーカー上限は設定から取得し、ディスパッチャーの生存期間中は変わらない。
/// 共有が必要な場合は `Arc<Dispatcher>` でラップする。
pub struct Dispatcher<C, R> {
    config: C,
    reporter: R,
}

impl<C, R> Dispatcher<C, R>
where
    C: DispatchConfig,
    R: ProgressReporter,
{
    pub fn new(config: C, reporter: R) -> Self {
        Self { config, reporter }
    }

    /// 追加引数なしでディスパッチ
    pub async fn dispatch<F, P, I>(
        &self,
        func: F,
        params: I,
    ) -> DispatchResults<P, <F as Invocation<P, ()>>::Output>
    where
        F: Invocation<P, ()> + 'static,
        P: Eq + Hash + Clone + Debug + Send + 'static,
        I: IntoIterator<Item = P>,
    {
        self.dispatch_with(func, params, ()).await
    }

    /// 全呼び出しに同じ追加引数を渡してディスパッチ
    ///
    /// 個々の失敗は結果マップに記録され、他のワーカーを止めない。
    pub async fn dispatch_with<F, P, A, I>(
        &self,
        func: F,
        params: I,
        args: A,
    ) -> DispatchResults<P, <F as Invocation<P, A>>::Output>
    where
        F: Invocation<P, A> + 'static,
        P: Eq + Hash + Clone + Debug + Send + 'static,
        A: Send + Sync + 'static,
        I: IntoIterator<Item = P>,
    {
        self.dispatch_with_summary(func, params, args).await.0
    }

    /// ディスパッチし、結果マップとサマリーを返す
    ///
    /// サマリーの成功・失敗数は重複を除いた結果マップから数える。
    pub async fn dispatch_with_summary<F, P, A, I>(
        &self,
        func: F,
        params: I,
        args: A,
    ) -> (
        DispatchResults<P, <F as Invocation<P, A>>::Output>,
        DispatchSummary,
    )
    where
        F: Invocation<P, A> + 'static,
        P: Eq + Hash + Clone + Debug + Send + 'static,
        A: Send + Sync + 'static,
        I: IntoIterator<Item = P>,
    {
        let start_time = Instant::now();
        let params: Vec<P> = params.into_iter().collect();

        if params.is_empty() {
            return (DispatchResults::empty(), DispatchSummary::new(0, 0, 0, 0));
        }

        let total = params.len();
        let budget = self.config.worker_budget();
        let reporting = self.config.enable_progress_reporting();

        tracing::debug!(total, budget = budget.get(), "Dispatching invocations");
        if reporting {
            self.reporter.report_started(total).await;
        }

        let semaphore = Arc::new(Semaphore::new(budget.get()));
        let handles = spawn_workers(Arc::new(func), &params, Arc::new(args), semaphore).await;

        // 合流: 全ハンドルを入力順に待つ
        let mut entries = Vec::with_capacity(total);
        for (index, (param, handle)) in params.into_iter().zip(handles).enumerate() {
            let outcome = join_outcome(handle).await;
            if reporting {
                if let Err(error) = &outcome {
                    self.reporter
                        .report_error(&format!("{param:?}"), &error.to_string())
                        .await;
                }
                self.reporter.report_progress(index + 1, total).await;
            }
            entries.push((param, outcome));
        }

        let results = DispatchResults::from_ordered(entries);
        let succeeded = results.success_count();
        let failed = results.failure_count();

        if reporting {
            self.reporter.report_completed(succeeded, failed).await;
        }

        let summary = DispatchSummary::new(
            total,
            succeeded,
            failed,
            start_time.elapsed().as_millis() as u64,
        );
        tracing::debug!(
            succeeded,
            failed,
            elapsed_ms = summary.total_time_ms,
            "Dispatch joined"
        );

        (results, summary)
    }

    /// 呼び出しスレッドをブロックしてディスパッチ
    ///
    /// 専用のマルチスレッドランタイムを構築する。非同期コンテキストの中から呼ばれた場合は
    /// `MulticallError::Runtime` を返す。
    pub fn dispatch_blocking<F, P, A, I>(
        &self,
        func: F,
        params: I,
        args: A,
    ) -> MulticallResult<DispatchResults<P, <F as Invocation<P, A>>::Output>>
    where
        F: Invocation<P, A> + 'static,
        P: Eq + Hash + Clone + Debug + Send + 'static,
        A: Send + Sync + 'static,
        I: IntoIterator<Item = P>,
    {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(MulticallError::runtime_context());
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(MulticallError::runtime)?;

        Ok(runtime.block_on(self.dispatch_with(func, params, args)))
    }

    /// 設定への参照を取得
    pub fn config(&self) -> &C {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}
