use crate::config::AppConfig;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ── Request Counters (lock-free) ──

pub struct ApiCounters {
    pub option_quotes: AtomicU64,
    pub scenario_quotes: AtomicU64,
    pub var_reports: AtomicU64,
    pub rejected_inputs: AtomicU64,
    pub internal_errors: AtomicU64,
}

impl ApiCounters {
    pub fn new() -> Self {
        Self {
            option_quotes: AtomicU64::new(0),
            scenario_quotes: AtomicU64::new(0),
            var_reports: AtomicU64::new(0),
            rejected_inputs: AtomicU64::new(0),
            internal_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            option_quotes: self.option_quotes.load(Ordering::Relaxed),
            scenario_quotes: self.scenario_quotes.load(Ordering::Relaxed),
            var_reports: self.var_reports.load(Ordering::Relaxed),
            rejected_inputs: self.rejected_inputs.load(Ordering::Relaxed),
            internal_errors: self.internal_errors.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CountersSnapshot {
    pub option_quotes: u64,
    pub scenario_quotes: u64,
    pub var_reports: u64,
    pub rejected_inputs: u64,
    pub internal_errors: u64,
}

// ── Application shared state ──
// Calculators are built per request; handlers share only config and counters.

pub struct AppState {
    pub config: AppConfig,
    pub counters: ApiCounters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            counters: ApiCounters::new(),
        })
    }
}
