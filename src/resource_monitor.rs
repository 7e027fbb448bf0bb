//! Observation of the agent's resource usage.
//!
//! Budgets are only reported, never enforced: a run that goes over its wall-clock budget or
//! an agent that goes over its memory limit produces a warning and the evaluation goes on.

use std::time::{Duration, Instant};

use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::{trace, warn};

use crate::configuration::Configuration;

/// Budget overruns noticed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overruns {
    /// The run took longer than its wall-clock budget.
    pub time: bool,
    /// The agent used more memory than allowed.
    pub memory: bool,
}

/// Watches a run's duration and its agent's memory against their budgets.
pub struct ResourceMonitor {
    started: Instant,
    time_budget: Duration,
    memory_limit_bytes: u64,
    system: System,
    overruns: Overruns,
}

impl ResourceMonitor {
    /// Budgets: `time_budget` for the whole run, `memory_limit_mb` per agent (0 is unlimited).
    pub fn new(time_budget: Duration, memory_limit_mb: u64) -> Self {
        ResourceMonitor {
            started: Instant::now(),
            time_budget,
            memory_limit_bytes: memory_limit_mb.saturating_mul(1_000_000),
            system: System::new(),
            overruns: Overruns::default(),
        }
    }

    /// Budget of `time_limit_seconds` per game for the whole run.
    pub fn from_config(config: &Configuration) -> Self {
        let games = u64::try_from(config.games_count).unwrap_or(u64::MAX);
        let time_budget = Duration::from_secs(config.time_limit_seconds.saturating_mul(games));
        Self::new(time_budget, config.memory_limit)
    }

    /// Sample the run duration and, if `pid` is given, the agent memory.
    pub fn observe(&mut self, pid: Option<u32>) {
        self.check_elapsed(self.started.elapsed());
        if let Some(pid) = pid {
            let pid = Pid::from_u32(pid);
            self.system
                .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
            if let Some(memory) = self.system.process(pid).map(|p| p.memory()) {
                trace!(%pid, memory, "agent memory");
                self.check_memory(memory);
            }
        }
    }

    /// Budget overruns noticed so far.
    pub fn overruns(&self) -> Overruns {
        self.overruns
    }

    fn check_elapsed(&mut self, elapsed: Duration) {
        if !self.overruns.time && elapsed > self.time_budget {
            warn!(?elapsed, budget = ?self.time_budget, "evaluation is over its time budget");
            self.overruns.time = true;
        }
    }

    fn check_memory(&mut self, bytes: u64) {
        if !self.overruns.memory && self.memory_limit_bytes > 0 && bytes > self.memory_limit_bytes {
            warn!(
                bytes,
                limit = self.memory_limit_bytes,
                "agent is over its memory limit"
            );
            self.overruns.memory = true;
        }
    }
}
