// 同期関数をブロッキングプール上で呼び出すアダプター

use crate::core::Invocation;
use async_trait::async_trait;
use std::sync::Arc;

/// 同期的な呼び出し関数のラッパー
///
/// 本体は `spawn_blocking` で実行されるため、ブロッキングI/Oを含んでも他のワーカーを止めない。
pub struct Blocking<F> {
    func: Arc<F>,
}

impl<F> Blocking<F> {
    pub fn new(func: F) -> Self {
        Self {
            func: Arc::new(func),
        }
    }
}

impl<F> Clone for Blocking<F> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
        }
    }
}

/// [`Blocking::new`] の短縮形
pub fn blocking<F>(func: F) -> Blocking<F> {
    Blocking::new(func)
}

#[async_trait]
impl<P, A, F, T> Invocation<P, A> for Blocking<F>
where
    P: Send + 'static,
    A: Send + Sync + 'static,
    F: Fn(P, &A) -> anyhow::Result<T> + Send + Sync + 'static,
    T: Send + 'static,
{
    type Output = T;

    async fn invoke(&self, param: P, args: Arc<A>) -> anyhow::Result<T> {
        let func = Arc::clone(&self.func);
        match tokio::task::spawn_blocking(move || func(param, args.as_ref())).await {
            Ok(result) => result,
            // パニックは外側のワーカータスクに引き継ぐ
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(anyhow::anyhow!("blocking invocation did not complete: {e}")),
        }
    }
}
