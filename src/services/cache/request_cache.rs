// リクエスト結果のJSONキャッシュ
// 初回作成時のダウンロード日時を埋め込み、再読み込みでは保持する

use crate::core::{MulticallError, MulticallResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use std::path::Path;

/// ダウンロード日時を保持するキー
pub const DOWNLOAD_DATE_KEY: &str = "_download_date";

/// JSONで保存・再読み込みできるリクエストキャッシュ
#[derive(Debug, Clone, PartialEq)]
pub struct RequestCache {
    data: Map<String, Value>,
}

impl RequestCache {
    /// 新しいキャッシュを作成
    ///
    /// ダウンロード日時が無ければ現在時刻を埋め込む。
    pub fn new(data: Map<String, Value>) -> Self {
        Self::new_at(data, Utc::now())
    }

    /// 埋め込む時刻を指定して作成
    pub fn new_at(mut data: Map<String, Value>, now: DateTime<Utc>) -> Self {
        if !data.contains_key(DOWNLOAD_DATE_KEY) {
            data.insert(DOWNLOAD_DATE_KEY.to_string(), Value::String(now.to_rfc3339()));
        }
        Self { data }
    }

    pub fn empty() -> Self {
        Self::new(Map::new())
    }

    /// JSON値から作成（オブジェクト以外はエラー）
    pub fn from_value(value: Value) -> MulticallResult<Self> {
        match value {
            Value::Object(data) => Ok(Self::new(data)),
            other => Err(MulticallError::cache_shape(format!(
                "JSONオブジェクトが必要です: {}",
                json_kind(&other)
            ))),
        }
    }

    /// (キー, 値) の列から作成
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// 値を追加（ダウンロード日時の上書きは拒否）
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> MulticallResult<Option<Value>> {
        let key = key.into();
        if key == DOWNLOAD_DATE_KEY {
            return Err(MulticallError::cache_shape(format!(
                "{DOWNLOAD_DATE_KEY} は上書きできません"
            )));
        }
        Ok(self.data.insert(key, value))
    }

    /// 埋め込まれたダウンロード日時
    ///
    /// タイムゾーン無しの値はUTCとして扱う。
    pub fn download_date(&self) -> MulticallResult<DateTime<Utc>> {
        let value = self
            .data
            .get(DOWNLOAD_DATE_KEY)
            .ok_or(MulticallError::MissingDownloadDate)?;

        let raw = value.as_str().ok_or_else(|| {
            MulticallError::invalid_download_date(value.to_string(), "文字列ではありません")
        })?;

        match DateTime::parse_from_rfc3339(raw) {
            Ok(date_time) => Ok(date_time.with_timezone(&Utc)),
            Err(rfc_error) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
                .map_err(|_| MulticallError::invalid_download_date(raw, rfc_error.to_string())),
        }
    }

    /// JSONファイルから読み込む
    pub async fn from_json(path: impl AsRef<Path>) -> MulticallResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| MulticallError::cache_io(&path_str, e))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| MulticallError::cache_format(&path_str, e))?;

        tracing::debug!(path = %path_str, "Loaded request cache");
        Self::from_value(value)
    }

    /// JSONファイルへ保存
    pub async fn to_json(&self, path: impl AsRef<Path>) -> MulticallResult<()> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        // 親ディレクトリが存在しない場合は作成
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MulticallError::cache_io(&path_str, e))?;
        }

        let bytes = serde_json::to_vec(&self.data)
            .map_err(|e| MulticallError::cache_format(&path_str, e))?;
        tokio::fs::write(path, bytes)
            .await
            .map_err(|e| MulticallError::cache_io(&path_str, e))?;

        tracing::debug!(path = %path_str, entries = self.data.len(), "Saved request cache");
        Ok(())
    }
}

impl Default for RequestCache {
    fn default() -> Self {
        Self::empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
