// コアレイヤー - 基盤となるトレイト、型、エラー定義
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorSeverity, InvocationError, MulticallError, MulticallResult};
pub use traits::{DispatchConfig, Invocation, MockProgressReporter, ProgressReporter};
pub use types::{
    DispatchResults, DispatchSummary, InvocationOutcome, WorkerBudget, DEFAULT_CPU_MULTIPLIER,
};
