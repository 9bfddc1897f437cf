//! Contract with the external qualification adjudicator.
//!
//! The adapter trusts the oracle's reasoning but not its bookkeeping: the
//! leading clause of `reason` decides `is_qualified`, and any fault becomes a
//! "not qualified" verdict instead of an error.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use super::audit::{AuditEvent, AuditSink, VerdictSource};
use super::domain::QualificationVerdict;

const PLACEHOLDER_NAME: &str = "候选人";
const QUALIFIED_CLAUSE: &str = "符合该职位";
const NOT_QUALIFIED_CLAUSE: &str = "不符合该职位";
const QUALIFIED_CLAUSE_EN: &str = "matches this position";
const NOT_QUALIFIED_CLAUSE_EN: &str = "does not match this position";

/// What the oracle sees of a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRepresentation {
    pub name: Option<String>,
    pub text: String,
    /// Rendered detail view, PNG encoded.
    pub image_png: Option<Vec<u8>>,
}

/// Single request sent to the oracle.
#[derive(Debug, Clone, Copy)]
pub struct AdjudicationRequest<'a> {
    pub criteria: &'a str,
    pub candidate: &'a CandidateRepresentation,
}

/// Failure of the oracle call itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleFault {
    #[error("oracle timed out after {0:?}")]
    Timeout(Duration),
    #[error("oracle transport failed: {0}")]
    Transport(String),
    #[error("oracle response could not be parsed: {0}")]
    Parse(String),
}

/// External adjudicator that renders a verdict with justification text.
pub trait QualificationOracle: Send + Sync {
    fn adjudicate(
        &self,
        request: &AdjudicationRequest<'_>,
    ) -> Result<QualificationVerdict, OracleFault>;
}

impl<O: QualificationOracle + ?Sized> QualificationOracle for Arc<O> {
    fn adjudicate(
        &self,
        request: &AdjudicationRequest<'_>,
    ) -> Result<QualificationVerdict, OracleFault> {
        (**self).adjudicate(request)
    }
}

/// Verdict announced by the first clause of a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingClause {
    Qualified,
    NotQualified,
}

impl LeadingClause {
    pub fn parse(reason: &str) -> Option<Self> {
        let clause = first_clause(reason).to_lowercase();
        if clause.contains(NOT_QUALIFIED_CLAUSE) || clause.contains(NOT_QUALIFIED_CLAUSE_EN) {
            Some(Self::NotQualified)
        } else if clause.contains(QUALIFIED_CLAUSE) || clause.contains(QUALIFIED_CLAUSE_EN) {
            Some(Self::Qualified)
        } else {
            None
        }
    }

    pub const fn is_qualified(self) -> bool {
        matches!(self, Self::Qualified)
    }
}

fn first_clause(reason: &str) -> &str {
    let trimmed = reason.trim_start();
    let end = trimmed
        .find(['，', '。', '；', '！', '：', ',', ';', '!', ':', '\n'])
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}

/// Fixed leading clause for a verdict, keyed only by the verdict.
pub fn leading_clause(name: Option<&str>, qualified: bool) -> String {
    let name = name
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != PLACEHOLDER_NAME)
        .unwrap_or_default();
    let verdict = if qualified {
        QUALIFIED_CLAUSE
    } else {
        NOT_QUALIFIED_CLAUSE
    };
    format!("{PLACEHOLDER_NAME}{name}{verdict}")
}

/// Identifies where an adjudication happened, for the audit trail.
#[derive(Debug, Clone, Copy)]
pub struct AuditContext<'a> {
    pub job_title: &'a str,
    pub position: u32,
}

/// Wraps an oracle with the consistency and fail-closed rules.
pub struct QualificationOracleAdapter<O> {
    oracle: O,
    audit: Arc<dyn AuditSink>,
}

impl<O: QualificationOracle> QualificationOracleAdapter<O> {
    pub fn new(oracle: O, audit: Arc<dyn AuditSink>) -> Self {
        Self { oracle, audit }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Adjudicate a candidate. Never fails: faults yield a "not qualified" verdict.
    pub fn qualify(
        &self,
        candidate: &CandidateRepresentation,
        criteria: &str,
        context: AuditContext<'_>,
    ) -> QualificationVerdict {
        let name = candidate.name.as_deref();

        let (verdict, source) = if criteria.trim().is_empty() {
            (
                fail_closed(name, "no screening criteria configured"),
                VerdictSource::FailClosed,
            )
        } else {
            let request = AdjudicationRequest {
                criteria,
                candidate,
            };
            match self.oracle.adjudicate(&request) {
                Ok(raw) => reconcile(raw),
                Err(fault) => {
                    warn!(
                        job_title = context.job_title,
                        position = context.position,
                        %fault,
                        "oracle call failed; treating candidate as not qualified"
                    );
                    (
                        fail_closed(name, &format!("qualification check failed ({fault})")),
                        VerdictSource::FailClosed,
                    )
                }
            }
        };

        self.audit.record(AuditEvent {
            job_title: context.job_title.to_string(),
            position: context.position,
            candidate: name.unwrap_or(PLACEHOLDER_NAME).to_string(),
            is_qualified: verdict.is_qualified,
            reason: verdict.reason.clone(),
            source,
            recorded_at: Utc::now(),
        });

        verdict
    }
}

/// Force the boolean to agree with the reason's leading clause.
pub fn reconcile(raw: QualificationVerdict) -> (QualificationVerdict, VerdictSource) {
    match LeadingClause::parse(&raw.reason) {
        Some(clause) if clause.is_qualified() == raw.is_qualified => (raw, VerdictSource::Oracle),
        Some(clause) => {
            debug!(
                reported = raw.is_qualified,
                corrected = clause.is_qualified(),
                "oracle verdict contradicted its reason; reason wins"
            );
            (
                QualificationVerdict {
                    is_qualified: clause.is_qualified(),
                    reason: raw.reason,
                },
                VerdictSource::Corrected,
            )
        }
        None => (
            QualificationVerdict::not_qualified(raw.reason),
            VerdictSource::UnrecognizedReason,
        ),
    }
}

fn fail_closed(name: Option<&str>, detail: &str) -> QualificationVerdict {
    QualificationVerdict::not_qualified(format!("{}，{detail}", leading_clause(name, false)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_clause_templates_follow_the_verdict() {
        assert_eq!(leading_clause(Some("张三"), true), "候选人张三符合该职位");
        assert_eq!(leading_clause(Some("张三"), false), "候选人张三不符合该职位");
        assert_eq!(leading_clause(None, true), "候选人符合该职位");
        assert_eq!(leading_clause(Some("  "), false), "候选人不符合该职位");
    }

    #[test]
    fn negative_clause_is_recognised_before_positive() {
        assert_eq!(
            LeadingClause::parse("候选人李四不符合该职位，因为期望薪资过高"),
            Some(LeadingClause::NotQualified)
        );
        assert_eq!(
            LeadingClause::parse("候选人李四符合该职位。五年相关经验"),
            Some(LeadingClause::Qualified)
        );
    }

    #[test]
    fn english_template_is_recognised() {
        assert_eq!(
            LeadingClause::parse("Candidate Li does not match this position; lacks a degree"),
            Some(LeadingClause::NotQualified)
        );
        assert_eq!(
            LeadingClause::parse("candidate Li matches this position, strong backend record"),
            Some(LeadingClause::Qualified)
        );
    }

    #[test]
    fn only_the_first_clause_counts() {
        assert_eq!(
            LeadingClause::parse("经验丰富，候选人符合该职位"),
            None,
            "a verdict phrase after the first clause must not be trusted"
        );
    }

    #[test]
    fn reconcile_prefers_reason_text() {
        let (verdict, source) = reconcile(QualificationVerdict {
            is_qualified: true,
            reason: "候选人王五不符合该职位，因为学历不满足本科要求".to_string(),
        });
        assert!(!verdict.is_qualified);
        assert_eq!(source, VerdictSource::Corrected);

        let (verdict, source) = reconcile(QualificationVerdict {
            is_qualified: false,
            reason: "候选人王五符合该职位，三年运营经验".to_string(),
        });
        assert!(verdict.is_qualified);
        assert_eq!(source, VerdictSource::Corrected);
    }

    #[test]
    fn unrecognised_reason_fails_closed() {
        let (verdict, source) = reconcile(QualificationVerdict {
            is_qualified: true,
            reason: "looks good".to_string(),
        });
        assert!(!verdict.is_qualified);
        assert_eq!(verdict.reason, "looks good");
        assert_eq!(source, VerdictSource::UnrecognizedReason);
    }
}
