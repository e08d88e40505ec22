// 環境変数からの認証情報の取得
// 未設定は呼び出し元が判断する（ここではエラーにしない）

use std::collections::HashMap;
use std::env::VarError;

/// APIキーを保持する環境変数名
pub const FINNHUB_API_KEY_VAR: &str = "FINNHUB_API_KEY";

/// プロセス環境からAPIキーを取得
pub fn api_key() -> Option<String> {
    credential(FINNHUB_API_KEY_VAR)
}

/// 与えられた環境マップからAPIキーを取得
pub fn api_key_from(env: &HashMap<String, String>) -> Option<String> {
    credential_from(env, FINNHUB_API_KEY_VAR)
}

/// プロセス環境から認証情報を取得
///
/// UTF-8でない値は未設定と同じく `None` になる（debugログを出す）。
pub fn credential(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(_)) => {
            tracing::debug!(name, "Credential is not valid UTF-8, treating as unset");
            None
        }
    }
}

pub fn credential_from(env: &HashMap<String, String>, name: &str) -> Option<String> {
    env.get(name).cloned()
}
