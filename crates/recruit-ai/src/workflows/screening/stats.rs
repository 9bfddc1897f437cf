use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::domain::JobRunStats;

/// Per-job counters shared between the run loop and the shutdown report.
///
/// Clones share the same counters. Counts only ever grow; nothing resets them,
/// so a snapshot taken after an aborted job still shows its partial progress.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    jobs: Arc<Mutex<BTreeMap<String, JobRunStats>>>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create zeroed counters for `job_title` if none exist yet.
    pub fn register(&self, job_title: &str) {
        self.lock().entry(job_title.to_string()).or_default();
    }

    pub fn record(&self, job_title: &str, viewed_delta: u32, greeted_delta: u32) {
        let mut jobs = self.lock();
        let stats = jobs.entry(job_title.to_string()).or_default();
        stats.viewed = stats.viewed.saturating_add(viewed_delta);
        stats.greeted = stats.greeted.saturating_add(greeted_delta);
    }

    pub fn get(&self, job_title: &str) -> Option<JobRunStats> {
        self.lock().get(job_title).copied()
    }

    pub fn snapshot(&self) -> BTreeMap<String, JobRunStats> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, JobRunStats>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_merges_deltas_per_job() {
        let stats = RunStats::new();
        stats.record("A", 1, 0);
        stats.record("A", 1, 1);
        stats.record("B", 3, 0);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot["A"], JobRunStats { viewed: 2, greeted: 1 });
        assert_eq!(snapshot["B"], JobRunStats { viewed: 3, greeted: 0 });
    }

    #[test]
    fn register_creates_zeroed_entry_without_resetting() {
        let stats = RunStats::new();
        stats.register("A");
        assert_eq!(stats.get("A"), Some(JobRunStats::default()));

        stats.record("A", 2, 1);
        stats.register("A");
        assert_eq!(stats.get("A"), Some(JobRunStats { viewed: 2, greeted: 1 }));
    }

    #[test]
    fn clones_share_counters_and_snapshots_are_detached() {
        let stats = RunStats::new();
        let reader = stats.clone();
        stats.record("A", 1, 0);

        let before = reader.snapshot();
        stats.record("A", 1, 0);

        assert_eq!(before["A"].viewed, 1);
        assert_eq!(reader.get("A").map(|s| s.viewed), Some(2));
    }
}
