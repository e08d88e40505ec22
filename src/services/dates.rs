// 日付範囲の正規化
// クエリ用の (開始日, 終了日) を YYYY-MM-DD 形式で返す

use crate::core::{MulticallError, MulticallResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

/// 開始日省略時に遡る既定の日数
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// 出力する日付形式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_ONLY_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 今日（UTC）を基準に日付範囲を正規化
///
/// 終了日の既定値は今日、開始日の既定値は終了日から `lookback_days` 日前。
pub fn formatted_dates(
    start: Option<&str>,
    end: Option<&str>,
    lookback_days: u32,
) -> MulticallResult<(String, String)> {
    formatted_dates_on(Utc::now().date_naive(), start, end, lookback_days)
}

/// 基準日を指定して日付範囲を正規化
pub fn formatted_dates_on(
    today: NaiveDate,
    start: Option<&str>,
    end: Option<&str>,
    lookback_days: u32,
) -> MulticallResult<(String, String)> {
    let end_date = match end {
        Some(raw) => parse_date(raw)?,
        None => today,
    };

    let start_date = match start {
        Some(raw) => parse_date(raw)?,
        None => TimeDelta::try_days(i64::from(lookback_days))
            .and_then(|delta| end_date.checked_sub_signed(delta))
            .ok_or_else(|| {
                MulticallError::invalid_date(
                    end_date.format(DATE_FORMAT).to_string(),
                    format!("{lookback_days}日前は表現できません"),
                )
            })?,
    };

    let start_str = start_date.format(DATE_FORMAT).to_string();
    let end_str = end_date.format(DATE_FORMAT).to_string();

    if start_date > end_date {
        return Err(MulticallError::inverted_date_range(start_str, end_str));
    }

    Ok((start_str, end_str))
}

/// 日付文字列を暦日に変換
///
/// タイムゾーン付きの時刻はその時刻自身のオフセットでの日付を採用する。
pub fn parse_date(raw: &str) -> MulticallResult<NaiveDate> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(MulticallError::invalid_date(raw, "空の日付です"));
    }

    for format in DATE_ONLY_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date);
        }
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(date_time.date());
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|date_time| date_time.date_naive())
        .map_err(|e| MulticallError::invalid_date(raw, e.to_string()))
}
