// Worker - 単一パラメーターの呼び出し機能

use crate::core::{Invocation, InvocationError, InvocationOutcome};
use std::sync::Arc;
use std::time::Instant;

/// 単一パラメーターの呼び出し
///
/// 関数の失敗はエラー値として返し、呼び出し元へは伝播させない。
pub async fn run_invocation<F, P, A>(
    func: &F,
    param: P,
    args: Arc<A>,
    worker_id: usize,
) -> InvocationOutcome<F::Output>
where
    F: Invocation<P, A> + ?Sized,
    P: Send + 'static,
    A: Send + Sync + 'static,
{
    let start_time = Instant::now();
    let result = func.invoke(param, args).await;

    tracing::trace!(
        worker_id,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        ok = result.is_ok(),
        "Invocation finished"
    );

    result.map_err(InvocationError::failed)
}
