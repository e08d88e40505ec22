// 呼び出し処理機能
// 単一パラメーターの呼び出しと同期関数アダプター

pub mod blocking;
pub mod worker;

pub use blocking::{blocking, Blocking};
pub use worker::run_invocation;
