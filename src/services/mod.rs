// サービス層 - 機能別の実装
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod cache;
pub mod config;
pub mod credentials;
pub mod dates;
pub mod monitoring;
pub mod processing;

pub use cache::{RequestCache, DOWNLOAD_DATE_KEY};
pub use config::DefaultDispatchConfig;
pub use credentials::{api_key, api_key_from, FINNHUB_API_KEY_VAR};
pub use dates::{formatted_dates, formatted_dates_on, DEFAULT_LOOKBACK_DAYS};
pub use monitoring::{NoOpProgressReporter, TracingProgressReporter};
pub use processing::{blocking, run_invocation, Blocking};
