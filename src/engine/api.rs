// 高レベル公開API
// Dispatcherを簡単に使用できるようにするための便利な関数

use super::Dispatcher;
use crate::core::{DispatchResults, Invocation};
use crate::services::{DefaultDispatchConfig, NoOpProgressReporter, TracingProgressReporter};
use std::fmt::Debug;
use std::hash::Hash;

/// デフォルト設定のディスパッチャーを作成
pub fn create_default_dispatcher() -> Dispatcher<DefaultDispatchConfig, TracingProgressReporter> {
    Dispatcher::new(DefaultDispatchConfig::default(), TracingProgressReporter::new())
}

/// 静音版のディスパッチャーを作成
pub fn create_quiet_dispatcher() -> Dispatcher<DefaultDispatchConfig, NoOpProgressReporter> {
    Dispatcher::new(DefaultDispatchConfig::default(), NoOpProgressReporter::new())
}

/// 同じ関数をパラメーターごとに一斉に呼び出し、全て完了してから結果を返す
///
/// 戻り値は `{パラメーター: 結果}` のマップ。
pub async fn multicall<F, P, I>(
    func: F,
    params: I,
) -> DispatchResults<P, <F as Invocation<P, ()>>::Output>
where
    F: Invocation<P, ()> + 'static,
    P: Eq + Hash + Clone + Debug + Send + 'static,
    I: IntoIterator<Item = P>,
{
    create_quiet_dispatcher().dispatch(func, params).await
}

/// 追加引数付きの [`multicall`]
pub async fn multicall_with<F, P, A, I>(
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
    create_quiet_dispatcher().dispatch_with(func, params, args).await
}
