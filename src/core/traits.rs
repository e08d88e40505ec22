// ディスパッチャーのトレイト定義
// 設定・進捗報告・呼び出し関数の抽象化インターフェース

use super::types::WorkerBudget;
use async_trait::async_trait;
use mockall::automock;
use std::future::Future;
use std::sync::Arc;

/// ディスパッチ設定を抽象化するトレイト
pub trait DispatchConfig: Send + Sync {
    /// 同時実行できる呼び出し本体の上限
    fn worker_budget(&self) -> WorkerBudget;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// ディスパッチ開始時の報告
    async fn report_started(&self, total_params: usize);

    /// 進捗更新の報告
    async fn report_progress(&self, completed: usize, total: usize);

    /// 呼び出し失敗の報告
    async fn report_error(&self, param: &str, error: &str);

    /// 全ワーカー終了時の報告
    async fn report_completed(&self, succeeded: usize, failed: usize);
}

/// パラメーター1つに対して呼び出される関数
///
/// 異なるパラメーターで並行に呼ばれる。`args` は全呼び出しで共有される追加引数。
#[async_trait]
pub trait Invocation<P, A>: Send + Sync
where
    P: Send + 'static,
    A: Send + Sync + 'static,
{
    type Output: Send + 'static;

    async fn invoke(&self, param: P, args: Arc<A>) -> anyhow::Result<Self::Output>;
}

// 非同期クロージャはそのまま呼び出し関数として使える
#[async_trait]
impl<P, A, F, Fut, T> Invocation<P, A> for F
where
    P: Send + 'static,
    A: Send + Sync + 'static,
    F: Fn(P, Arc<A>) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    type Output = T;

    async fn invoke(&self, param: P, args: Arc<A>) -> anyhow::Result<T> {
        (self)(param, args).await
    }
}
