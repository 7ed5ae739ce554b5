//! Process-wide execution counters on the Executor instance. No direct
//! teacher counterpart (`boa` has no evaluation-statistics feature), but
//! the counters are protected by a reader/writer lock for the same reason
//! the teacher locks shared state elsewhere: metric reads must never tear.

use serde::Serialize;
use std::sync::RwLock;

/// A point-in-time snapshot returned by `GetStats`. Plain data, cheap to
/// clone and serialize; informational only, never consulted by the
/// evaluator to decide an outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub total_executions: u64,
    pub total_time_us: u128,
    pub errors: u64,
}

#[derive(Debug, Default)]
struct Counters {
    total_executions: u64,
    total_time_us: u128,
    errors: u64,
}

/// Reader/writer-locked counters. Bumped once per `Execute` call
/// (`record`), read via `snapshot`, zeroed via `reset`.
#[derive(Debug, Default)]
pub struct Stats {
    inner: RwLock<Counters>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, elapsed_us: u128, is_error: bool) {
        let mut counters = self.inner.write().expect("stats lock poisoned");
        counters.total_executions += 1;
        counters.total_time_us += elapsed_us;
        if is_error {
            counters.errors += 1;
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let counters = self.inner.read().expect("stats lock poisoned");
        StatsSnapshot {
            total_executions: counters.total_executions,
            total_time_us: counters.total_time_us,
            errors: counters.errors,
        }
    }

    pub fn reset(&self) {
        let mut counters = self.inner.write().expect("stats lock poisoned");
        *counters = Counters::default();
    }
}
