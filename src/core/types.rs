// ディスパッチに関連するデータ型定義

use super::error::{InvocationError, MulticallError, MulticallResult};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;

/// CPUコア数に掛ける既定の倍率
pub const DEFAULT_CPU_MULTIPLIER: usize = 5;

/// 同時に実行できる呼び出し本体の上限
///
/// 0は表現できないため、生成後は常に有効な値を持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerBudget(NonZeroUsize);

impl WorkerBudget {
    /// 任意の上限で作成（0は設定エラー）
    pub fn new(max_concurrent: usize) -> MulticallResult<Self> {
        NonZeroUsize::new(max_concurrent)
            .map(Self)
            .ok_or_else(|| MulticallError::configuration("ワーカー数は1以上である必要があります"))
    }

    /// CPU数 × 倍率 から作成
    pub fn from_cpu_count(cpu_count: usize, multiplier: usize) -> Self {
        let value = cpu_count.max(1).saturating_mul(multiplier.max(1));
        // max(1) 同士の積なので0にはならない
        Self(NonZeroUsize::new(value).unwrap_or(NonZeroUsize::MIN))
    }

    /// 検出したCPU数から既定値を作成
    pub fn detect() -> Self {
        Self::from_cpu_count(num_cpus::get(), DEFAULT_CPU_MULTIPLIER)
    }

    /// 逐次実行（上限1）
    pub const fn sequential() -> Self {
        Self(NonZeroUsize::MIN)
    }

    pub const fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for WorkerBudget {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for WorkerBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 単一パラメーターの呼び出し結果
pub type InvocationOutcome<T> = Result<T, InvocationError>;

/// パラメーターをキーとした呼び出し結果のマップ
///
/// 全ワーカーの終了後にのみ構築され、呼び出し元へ値として渡される。
#[derive(Debug)]
pub struct DispatchResults<P, T>
where
    P: Eq + Hash,
{
    outcomes: HashMap<P, InvocationOutcome<T>>,
}

impl<P, T> DispatchResults<P, T>
where
    P: Eq + Hash,
{
    /// 空の結果マップ
    pub fn empty() -> Self {
        Self {
            outcomes: HashMap::new(),
        }
    }

    /// 入力順の (パラメーター, 結果) 列から構築
    ///
    /// 重複したパラメーターは後に現れたものが残る。
    pub fn from_ordered<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, InvocationOutcome<T>)>,
    {
        Self {
            outcomes: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn contains(&self, param: &P) -> bool {
        self.outcomes.contains_key(param)
    }

    pub fn get(&self, param: &P) -> Option<&InvocationOutcome<T>> {
        self.outcomes.get(param)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&P, &InvocationOutcome<T>)> {
        self.outcomes.iter()
    }

    /// 成功した結果のみ
    pub fn successes(&self) -> impl Iterator<Item = (&P, &T)> {
        self.outcomes
            .iter()
            .filter_map(|(param, outcome)| outcome.as_ref().ok().map(|value| (param, value)))
    }

    /// 失敗した結果のみ
    pub fn failures(&self) -> impl Iterator<Item = (&P, &InvocationError)> {
        self.outcomes
            .iter()
            .filter_map(|(param, outcome)| outcome.as_ref().err().map(|error| (param, error)))
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.values().filter(|outcome| outcome.is_ok()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.values().filter(|outcome| outcome.is_err()).count()
    }

    pub fn into_inner(self) -> HashMap<P, InvocationOutcome<T>> {
        self.outcomes
    }

    /// 失敗を捨てて成功した値だけのマップに変換
    pub fn into_successes(self) -> HashMap<P, T> {
        self.outcomes
            .into_iter()
            .filter_map(|(param, outcome)| outcome.ok().map(|value| (param, value)))
            .collect()
    }
}

impl<P, T> IntoIterator for DispatchResults<P, T>
where
    P: Eq + Hash,
{
    type Item = (P, InvocationOutcome<T>);
    type IntoIter = std::collections::hash_map::IntoIter<P, InvocationOutcome<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

/// ディスパッチ全体のサマリー
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DispatchSummary {
    pub total_params: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_time_ms: u64,
    pub average_time_per_param_ms: f64,
}

impl DispatchSummary {
    pub fn new(total_params: usize, succeeded: usize, failed: usize, total_time_ms: u64) -> Self {
        let average_time_per_param_ms = if total_params > 0 {
            total_time_ms as f64 / total_params as f64
        } else {
            0.0
        };
        Self {
            total_params,
            succeeded,
            failed,
            total_time_ms,
            average_time_per_param_ms,
        }
    }
}
