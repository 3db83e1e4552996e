/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::time::{Duration, Instant};

/// Wall-clock telemetry of a solver run.
///
/// Carries the overall timer, optional named phase timers and an advisory
/// time budget. The budget is never enforced:
/// [`is_time_out`](RunInfo::is_time_out) is an informational flag that
/// callers check at well-defined points.
#[derive(Clone, Debug)]
pub struct RunInfo {
    started: Instant,
    time_limit: Option<Duration>,
    phases: Vec<(String, Duration)>,
    open_phase: Option<(String, Instant)>,
}

impl Default for RunInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl RunInfo {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            time_limit: None,
            phases: Vec::new(),
            open_phase: None,
        }
    }

    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            time_limit: Some(limit),
            ..Self::new()
        }
    }

    /// Restarts the overall timer and drops all phase records.
    pub fn reset(&mut self) {
        self.started = Instant::now();
        self.phases.clear();
        self.open_phase = None;
    }

    /// Wall-clock time since construction or the last reset.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Whether the advisory time budget is exhausted. Always `false`
    /// without a budget.
    pub fn is_time_out(&self) -> bool {
        self.time_limit.is_some_and(|limit| self.elapsed() >= limit)
    }

    /// Starts a named phase timer; an open phase is closed first.
    pub fn start_phase(&mut self, name: impl Into<String>) {
        self.end_phase();
        self.open_phase = Some((name.into(), Instant::now()));
    }

    /// Closes the open phase, if any, recording its duration.
    pub fn end_phase(&mut self) {
        if let Some((name, started)) = self.open_phase.take() {
            self.phases.push((name, started.elapsed()));
        }
    }

    /// Recorded duration of phase `name`, if it was closed.
    pub fn phase(&self, name: &str) -> Option<Duration> {
        self.phases
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, d)| d)
    }

    /// All closed phases in recording order.
    pub fn phases(&self) -> &[(String, Duration)] {
        &self.phases
    }
}

impl core::fmt::Display for RunInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "elapsed: {:.3}s", self.elapsed().as_secs_f64())?;
        if let Some(limit) = self.time_limit {
            write!(
                f,
                " (budget {:.3}s{})",
                limit.as_secs_f64(),
                if self.is_time_out() { ", exhausted" } else { "" }
            )?;
        }
        for (name, duration) in &self.phases {
            write!(f, ", {}: {:.3}s", name, duration.as_secs_f64())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_no_budget_never_times_out() {
        let info = RunInfo::new();
        assert!(!info.is_time_out());
        assert!(info.time_limit().is_none());
    }

    #[test]
    fn test_zero_budget_times_out() {
        let info = RunInfo::with_time_limit(Duration::ZERO);
        assert!(info.is_time_out());
    }

    #[test]
    fn test_phases() {
        let mut info = RunInfo::new();
        info.start_phase("sort");
        info.start_phase("search"); // closes "sort"
        info.end_phase();
        assert!(info.phase("sort").is_some());
        assert!(info.phase("search").is_some());
        assert!(info.phase("missing").is_none());
        assert_eq!(info.phases().len(), 2);
    }
}
