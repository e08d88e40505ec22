// 設定管理の具象実装

use crate::core::{DispatchConfig, MulticallError, MulticallResult, WorkerBudget, DEFAULT_CPU_MULTIPLIER};

/// ワーカー上限を上書きする環境変数
pub const WORKER_BUDGET_ENV: &str = "MULTICALL_WORKER_BUDGET";

/// 進捗報告の有効/無効を切り替える環境変数
pub const PROGRESS_ENV: &str = "MULTICALL_PROGRESS";

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultDispatchConfig {
    budget: WorkerBudget,
    enable_progress: bool,
}

impl DefaultDispatchConfig {
    pub fn new(cpu_count: usize) -> Self {
        Self {
            budget: WorkerBudget::from_cpu_count(cpu_count, DEFAULT_CPU_MULTIPLIER),
            enable_progress: true,
        }
    }

    pub fn with_worker_budget(mut self, budget: WorkerBudget) -> Self {
        self.budget = budget;
        self
    }

    /// 上限を数値で指定（0は設定エラー）
    pub fn with_max_concurrent(self, max_concurrent: usize) -> MulticallResult<Self> {
        Ok(self.with_worker_budget(WorkerBudget::new(max_concurrent)?))
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }

    /// プロセス環境変数から設定を読み込む
    pub fn from_env() -> MulticallResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 未設定の変数は既定値のまま。
    pub fn from_lookup<F>(lookup: F) -> MulticallResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(WORKER_BUDGET_ENV) {
            let max_concurrent = raw.trim().parse::<usize>().map_err(|e| {
                MulticallError::configuration(format!("{WORKER_BUDGET_ENV}='{raw}' - {e}"))
            })?;
            config = config.with_max_concurrent(max_concurrent)?;
        }

        if let Some(raw) = lookup(PROGRESS_ENV) {
            config.enable_progress = parse_flag(&raw).ok_or_else(|| {
                MulticallError::configuration(format!("{PROGRESS_ENV}='{raw}' は真偽値ではありません"))
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl Default for DefaultDispatchConfig {
    fn default() -> Self {
        Self {
            budget: WorkerBudget::detect(),
            enable_progress: true,
        }
    }
}

impl DispatchConfig for DefaultDispatchConfig {
    fn worker_budget(&self) -> WorkerBudget {
        self.budget
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}
