use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use recruit_ai::workflows::screening::{JobRunStats, RunStats};
use serde::Serialize;
use tracing::info;

/// End-of-run summary printed to stdout.
#[derive(Debug, Serialize)]
pub(crate) struct RunReport {
    pub(crate) generated_at: DateTime<Local>,
    pub(crate) interrupted: bool,
    pub(crate) jobs: BTreeMap<String, JobRunStats>,
}

impl RunReport {
    pub(crate) fn from_stats(stats: &RunStats, interrupted: bool) -> Self {
        Self {
            generated_at: Local::now(),
            interrupted,
            jobs: stats.snapshot(),
        }
    }

    pub(crate) fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub(crate) fn log(&self) {
        for (job_title, stats) in &self.jobs {
            info!(
                job_title = job_title.as_str(),
                viewed = stats.viewed,
                greeted = stats.greeted,
                "job totals"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_every_job_with_its_counters() {
        let stats = RunStats::new();
        stats.record("运营专员", 2, 1);
        stats.register("行政助理");

        let report = RunReport::from_stats(&stats, false);
        let json: serde_json::Value =
            serde_json::from_str(&report.to_json().expect("report serializes")).expect("json");

        assert_eq!(json["jobs"]["运营专员"]["viewed"], 2);
        assert_eq!(json["jobs"]["运营专员"]["greeted"], 1);
        assert_eq!(json["jobs"]["行政助理"]["viewed"], 0);
        assert_eq!(json["interrupted"], false);
        assert!(json["generated_at"].is_string());
    }
}
