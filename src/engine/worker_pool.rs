// WorkerPool - パラメーターごとのワーカー起動と合流

use crate::core::{Invocation, InvocationError, InvocationOutcome};
use crate::services::processing::run_invocation;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

/// 単一ワーカー
///
/// 取得済みの許可証を呼び出し本体が終わるまで保持する。
pub fn spawn_single_worker<F, P, A>(
    worker_id: usize,
    func: Arc<F>,
    param: P,
    args: Arc<A>,
    permit: OwnedSemaphorePermit,
) -> JoinHandle<InvocationOutcome<<F as Invocation<P, A>>::Output>>
where
    F: Invocation<P, A> + 'static,
    P: Send + 'static,
    A: Send + Sync + 'static,
{
    tokio::spawn(async move {
        let _permit = permit;
        run_invocation(func.as_ref(), param, args, worker_id).await
    })
}

/// パラメーター1つにつき1ワーカーを起動
///
/// 起動前にセマフォの許可証を待つため、同時に走る本体は許可証の数を超えない。
/// 返すハンドルは `params` と同じ順序。
pub async fn spawn_workers<F, P, A>(
    func: Arc<F>,
    params: &[P],
    args: Arc<A>,
    semaphore: Arc<Semaphore>,
) -> Vec<JoinHandle<InvocationOutcome<<F as Invocation<P, A>>::Output>>>
where
    F: Invocation<P, A> + 'static,
    P: Clone + Send + 'static,
    A: Send + Sync + 'static,
{
    let mut handles = Vec::with_capacity(params.len());

    for (worker_id, param) in params.iter().enumerate() {
        let handle = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => {
                tracing::trace!(worker_id, "Worker admitted");
                spawn_single_worker(
                    worker_id,
                    Arc::clone(&func),
                    param.clone(),
                    Arc::clone(&args),
                    permit,
                )
            }
            // セマフォが閉じられた場合は以降のワーカーを起動しない
            Err(_) => tokio::spawn(async { Err(InvocationError::Cancelled) }),
        };
        handles.push(handle);
    }

    handles
}

/// ワーカーの終了を待ち、結果に変換
pub async fn join_outcome<T>(handle: JoinHandle<InvocationOutcome<T>>) -> InvocationOutcome<T> {
    match handle.await {
        Ok(outcome) => outcome,
        Err(join_error) => Err(InvocationError::from_join_error(join_error)),
    }
}
