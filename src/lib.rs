// 並列ファンアウト呼び出し
// 同じ関数をパラメーターごとに上限付きで並列実行し、全て完了してから
// {パラメーター: 結果} のマップを返す

pub mod core;
pub mod engine;
pub mod logging;
pub mod services;

pub use crate::core::{
    DispatchConfig, DispatchResults, DispatchSummary, Invocation, InvocationError,
    InvocationOutcome, MulticallError, MulticallResult, ProgressReporter, WorkerBudget,
};
pub use crate::engine::{
    create_default_dispatcher, create_quiet_dispatcher, multicall, multicall_with, Dispatcher,
};
pub use crate::services::{
    api_key, blocking, formatted_dates, Blocking, DefaultDispatchConfig, NoOpProgressReporter,
    RequestCache, TracingProgressReporter,
};
