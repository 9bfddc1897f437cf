//! Position-by-position traversal of one job's candidate list.

use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{AgeReading, JobRunStats};
use super::evaluation::{CandidateView, GateRejection, RequirementEvaluator, ScreeningOutcome};
use super::extraction::extract_candidate;
use super::oracle::{
    AuditContext, CandidateRepresentation, QualificationOracle, QualificationOracleAdapter,
};
use super::stats::RunStats;
use super::surface::{CandidatePresentation, CandidateSurface, SurfaceFault};
use crate::config::JobConfig;

/// What the loop does after a fault at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultDisposition {
    /// Move on to the next position.
    Continue,
    /// Stop consuming positions for the current job.
    AbortJob,
}

impl FaultDisposition {
    pub fn classify(fault: &SurfaceFault) -> Self {
        match fault {
            SurfaceFault::Interaction(_) | SurfaceFault::Load(_) => Self::Continue,
            SurfaceFault::Unclassified(_) => Self::AbortJob,
        }
    }
}

/// How a single position was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionOutcome {
    Seen,
    Rejected(GateRejection),
    Adjudicated { qualified: bool },
}

/// Terminal state of a job's loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum JobTermination {
    Done,
    Aborted(String),
}

/// Summary of one job's loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    pub job_title: String,
    pub last_position: u32,
    pub stats: JobRunStats,
    pub termination: JobTermination,
}

/// Drives the surface, the gates, and the oracle for each configured job.
pub struct CandidateScreener<S, O> {
    surface: S,
    adapter: QualificationOracleAdapter<O>,
    stats: RunStats,
    settle_delay: Duration,
}

impl<S, O> CandidateScreener<S, O>
where
    S: CandidateSurface,
    O: QualificationOracle,
{
    pub fn new(surface: S, adapter: QualificationOracleAdapter<O>, stats: RunStats) -> Self {
        Self {
            surface,
            adapter,
            stats,
            settle_delay: Duration::from_secs(1),
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn adapter(&self) -> &QualificationOracleAdapter<O> {
        &self.adapter
    }

    /// Process every job in order. A job that aborts never stops the next one.
    pub fn run_all(&mut self, jobs: &[JobConfig]) -> Vec<JobReport> {
        jobs.iter().map(|job| self.run_job(job)).collect()
    }

    /// Select the job on the surface and walk positions `1..=max_idx`.
    pub fn run_job(&mut self, job: &JobConfig) -> JobReport {
        let job_title = job.job_title.as_str();
        self.stats.register(job_title);
        info!(job_title, max_idx = job.max_idx, "screening job");

        if let Err(fault) = self.surface.select_job(job_title) {
            warn!(job_title, %fault, "could not select job; skipping it");
            return self.report(job_title, 0, JobTermination::Aborted(fault.to_string()));
        }

        let evaluator = RequirementEvaluator::new(&job.job_requirements);
        let criteria = job.job_requirements.free_text_criteria.as_str();
        let mut last_position = 0;
        let mut termination = JobTermination::Done;

        for position in 1..=job.max_idx {
            last_position = position;
            match self.process_position(job_title, position, &evaluator, criteria) {
                Ok(outcome) => debug!(job_title, position, ?outcome, "position resolved"),
                Err(fault) => match FaultDisposition::classify(&fault) {
                    FaultDisposition::Continue => {
                        warn!(job_title, position, %fault, "transient fault; trying next candidate");
                    }
                    FaultDisposition::AbortJob => {
                        warn!(job_title, position, %fault, "unrecoverable fault; stopping job");
                        termination = JobTermination::Aborted(fault.to_string());
                        break;
                    }
                },
            }
        }

        let report = self.report(job_title, last_position, termination);
        info!(
            job_title,
            viewed = report.stats.viewed,
            greeted = report.stats.greeted,
            "job finished"
        );
        report
    }

    fn process_position(
        &mut self,
        job_title: &str,
        position: u32,
        evaluator: &RequirementEvaluator,
        criteria: &str,
    ) -> Result<PositionOutcome, SurfaceFault> {
        let already_seen = match self.surface.is_position_already_seen(position) {
            Ok(seen) => seen,
            Err(SurfaceFault::Load(detail)) => {
                info!(position, %detail, "position not loaded yet; treating as unseen");
                self.refresh();
                false
            }
            Err(fault) => return Err(fault),
        };
        if already_seen {
            info!(position, "already viewed");
            self.scroll();
            return Ok(PositionOutcome::Seen);
        }

        let age = match self.surface.read_age(position) {
            Ok(age) => AgeReading::Known(age),
            Err(SurfaceFault::Load(detail)) => {
                warn!(position, %detail, "age not readable; loading more candidates");
                self.refresh();
                AgeReading::Unknown
            }
            Err(fault) => return Err(fault),
        };

        let card = self.surface.candidate_card(position)?;
        let parsed = extract_candidate(&card.card_text);
        let view = CandidateView {
            parsed: &parsed,
            age,
            raw_text: &card.card_text,
        };

        if let ScreeningOutcome::Reject(rejection) = evaluator.evaluate(&view) {
            info!(position, gate = rejection.gate.label(), detail = %rejection.detail, "not a match");
            self.scroll();
            return Ok(PositionOutcome::Rejected(rejection));
        }

        info!(position, candidate = parsed.display_name(), "gates passed; consulting oracle");
        let qualified = self.adjudicate(job_title, &card, parsed.name, criteria)?;
        self.scroll();
        Ok(PositionOutcome::Adjudicated { qualified })
    }

    fn adjudicate(
        &mut self,
        job_title: &str,
        card: &CandidatePresentation,
        name: Option<String>,
        criteria: &str,
    ) -> Result<bool, SurfaceFault> {
        let detail = self.surface.render_candidate_detail(card)?;
        let representation = CandidateRepresentation {
            name,
            text: detail.text,
            image_png: detail.image_png,
        };

        let verdict = self.adapter.qualify(
            &representation,
            criteria,
            AuditContext {
                job_title,
                position: card.position,
            },
        );
        self.stats.record(job_title, 1, 0);

        if verdict.is_qualified {
            if let Err(fault) = self.surface.perform_outreach(card) {
                self.dismiss_quietly(card);
                return Err(fault);
            }
            self.stats.record(job_title, 0, 1);
            info!(position = card.position, "qualified; outreach sent");
        } else {
            info!(position = card.position, reason = %verdict.reason, "not qualified");
        }

        self.surface.dismiss_detail(card)?;
        Ok(verdict.is_qualified)
    }

    fn dismiss_quietly(&mut self, card: &CandidatePresentation) {
        if let Err(fault) = self.surface.dismiss_detail(card) {
            debug!(position = card.position, %fault, "detail dismissal after fault failed");
        }
    }

    fn scroll(&mut self) {
        if let Err(fault) = self.surface.scroll_for_more() {
            debug!(%fault, "scroll failed");
        }
    }

    fn refresh(&mut self) {
        self.scroll();
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }
    }

    fn report(&self, job_title: &str, last_position: u32, termination: JobTermination) -> JobReport {
        JobReport {
            job_title: job_title.to_string(),
            last_position,
            stats: self.stats.get(job_title).unwrap_or_default(),
            termination,
        }
    }
}
