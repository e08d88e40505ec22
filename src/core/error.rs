// ディスパッチャーと周辺ユーティリティのエラー型定義

use thiserror::Error;

/// ディスパッチャー周辺で発生するエラー型
///
/// 個々の呼び出しの失敗はここには含まれない（[`InvocationError`] として結果マップに記録される）。
#[derive(Error, Debug)]
pub enum MulticallError {
    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("日付解析エラー: '{input}' - {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("日付範囲エラー: 開始日 {start} が終了日 {end} より後です")]
    InvertedDateRange { start: String, end: String },

    #[error("キャッシュ入出力エラー: {path} - {source}")]
    CacheIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("キャッシュ形式エラー: {path} - {source}")]
    CacheFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("キャッシュ構造エラー: {reason}")]
    CacheShape { reason: String },

    #[error("キャッシュにダウンロード日時がありません")]
    MissingDownloadDate,

    #[error("ダウンロード日時の解析エラー: '{value}' - {reason}")]
    InvalidDownloadDate { value: String, reason: String },

    #[error("ランタイム構築エラー: {source}")]
    Runtime {
        #[source]
        source: std::io::Error,
    },
}

impl MulticallError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// 日付解析エラーの作成
    pub fn invalid_date(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// 日付範囲エラーの作成
    pub fn inverted_date_range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::InvertedDateRange {
            start: start.into(),
            end: end.into(),
        }
    }

    /// キャッシュ入出力エラーの作成
    pub fn cache_io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::CacheIo {
            path: path.into(),
            source,
        }
    }

    /// キャッシュ形式エラーの作成
    pub fn cache_format(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CacheFormat {
            path: path.into(),
            source,
        }
    }

    pub fn cache_shape(reason: impl Into<String>) -> Self {
        Self::CacheShape {
            reason: reason.into(),
        }
    }

    pub fn invalid_download_date(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDownloadDate {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn runtime(source: std::io::Error) -> Self {
        Self::Runtime { source }
    }

    /// 非同期ランタイムの内側からブロッキング呼び出しされた場合のエラー
    pub fn runtime_context() -> Self {
        Self::Runtime {
            source: std::io::Error::other("非同期ランタイムの内側からは呼び出せません"),
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationError { .. } | Self::Runtime { .. } => ErrorSeverity::High,
            Self::InvalidDate { .. } | Self::InvertedDateRange { .. } => ErrorSeverity::Medium,
            Self::CacheIo { .. } => ErrorSeverity::Medium,
            Self::CacheFormat { .. } | Self::CacheShape { .. } => ErrorSeverity::High,
            Self::MissingDownloadDate | Self::InvalidDownloadDate { .. } => ErrorSeverity::Low,
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// 入力を直せば再実行できるものを回復可能とみなす。
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ConfigurationError { .. } | Self::Runtime { .. } => false,
            Self::InvalidDate { .. } | Self::InvertedDateRange { .. } => true,
            Self::CacheIo { .. } => true,
            Self::CacheFormat { .. } | Self::CacheShape { .. } => false,
            Self::MissingDownloadDate | Self::InvalidDownloadDate { .. } => true,
        }
    }
}

/// 個々の呼び出しの失敗
///
/// 結果マップの中でパラメーターごとに保持され、兄弟ワーカーには影響しない。
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("呼び出し失敗: {source}")]
    Failed {
        #[source]
        source: anyhow::Error,
    },

    #[error("ワーカーがパニックしました: {message}")]
    Panicked { message: String },

    #[error("ワーカーが完了前に中断されました")]
    Cancelled,
}

impl InvocationError {
    pub fn failed(source: anyhow::Error) -> Self {
        Self::Failed { source }
    }

    /// JoinErrorからの変換
    ///
    /// パニックのペイロードが文字列であればメッセージとして保持する。
    pub fn from_join_error(error: tokio::task::JoinError) -> Self {
        if !error.is_panic() {
            return Self::Cancelled;
        }
        let payload = error.into_panic();
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::Panicked { message }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Failed { .. } => ErrorSeverity::Medium,
            Self::Panicked { .. } => ErrorSeverity::High,
            Self::Cancelled => ErrorSeverity::Low,
        }
    }
}

impl From<anyhow::Error> for InvocationError {
    fn from(error: anyhow::Error) -> Self {
        InvocationError::Failed { source: error }
    }
}

impl From<tokio::task::JoinError> for InvocationError {
    fn from(error: tokio::task::JoinError) -> Self {
        InvocationError::from_join_error(error)
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 低重要度 - ログ出力程度
    Low,
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的
    Critical,
}

impl ErrorSeverity {
    pub const fn as_level(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// ディスパッチャー周辺の結果型
pub type MulticallResult<T> = std::result::Result<T, MulticallError>;
