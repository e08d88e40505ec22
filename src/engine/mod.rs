// エンジン層 - 並列ディスパッチとオーケストレーション
// サービス層を組み合わせて高レベルな処理を提供

pub mod api;
pub mod dispatcher;
pub mod worker_pool;

pub use api::{create_default_dispatcher, create_quiet_dispatcher, multicall, multicall_with};
pub use dispatcher::Dispatcher;
