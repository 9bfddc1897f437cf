//! Candidate screening: field extraction, ordered requirement gates,
//! fail-closed adjudication, and the fault-tolerant run loop.

pub mod audit;
pub mod domain;
pub mod evaluation;
pub mod extraction;
pub mod oracle;
pub mod run;
pub mod stats;
pub mod surface;

#[cfg(test)]
mod tests;

pub use audit::{AuditEvent, AuditSink, CollectingAuditSink, TracingAuditSink, VerdictSource};
pub use domain::{
    AgeReading, EducationLevel, JobRequirements, JobRunStats, ParsedCandidate,
    QualificationVerdict, SalaryBound, OFF_THE_JOB_STATUS,
};
pub use evaluation::{
    CandidateView, Gate, GateKind, GateRejection, GateVerdict, RequirementEvaluator,
    ScreeningOutcome,
};
pub use extraction::extract_candidate;
pub use oracle::{
    AdjudicationRequest, AuditContext, CandidateRepresentation, LeadingClause, OracleFault,
    QualificationOracle, QualificationOracleAdapter,
};
pub use run::{CandidateScreener, FaultDisposition, JobReport, JobTermination, PositionOutcome};
pub use stats::RunStats;
pub use surface::{CandidateDetail, CandidatePresentation, CandidateSurface, SurfaceFault};
