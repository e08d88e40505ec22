pub mod implementations;

pub use implementations::{DefaultDispatchConfig, PROGRESS_ENV, WORKER_BUDGET_ENV};
