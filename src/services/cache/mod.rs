// リクエストキャッシュ
// 集約結果の保存は呼び出し元の責任で、ディスパッチャー自体は永続化しない

pub mod request_cache;

pub use request_cache::{RequestCache, DOWNLOAD_DATE_KEY};
