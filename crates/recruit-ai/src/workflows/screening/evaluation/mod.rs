mod gates;
mod outcome;

pub use gates::{standard_gates, Gate};
pub use outcome::{GateKind, GateRejection, GateVerdict, ScreeningOutcome};

use super::domain::{AgeReading, JobRequirements, ParsedCandidate};
use super::extraction::extract_candidate;

/// Everything the gates may look at for one candidate.
#[derive(Debug, Clone, Copy)]
pub struct CandidateView<'a> {
    pub parsed: &'a ParsedCandidate,
    pub age: AgeReading,
    pub raw_text: &'a str,
}

impl<'a> CandidateView<'a> {
    /// View whose age comes from the parsed text rather than the list card.
    pub fn from_parsed(parsed: &'a ParsedCandidate, raw_text: &'a str) -> Self {
        Self {
            parsed,
            age: AgeReading::from(parsed.age),
            raw_text,
        }
    }
}

/// Ordered, short-circuiting gate sequence for one job.
pub struct RequirementEvaluator {
    gates: Vec<Box<dyn Gate>>,
}

impl RequirementEvaluator {
    pub fn new(requirements: &JobRequirements) -> Self {
        Self::with_gates(standard_gates(requirements))
    }

    pub fn with_gates(gates: Vec<Box<dyn Gate>>) -> Self {
        Self { gates }
    }

    /// Run the gates in order; the first failure decides the outcome.
    pub fn evaluate(&self, candidate: &CandidateView<'_>) -> ScreeningOutcome {
        for gate in &self.gates {
            if let GateVerdict::Fail(detail) = gate.check(candidate) {
                return ScreeningOutcome::Reject(GateRejection {
                    gate: gate.kind(),
                    detail,
                });
            }
        }

        ScreeningOutcome::AdjudicateCandidate
    }

    /// Like [`evaluate`](Self::evaluate), but previously viewed positions are skipped outright.
    pub fn screen(&self, already_seen: bool, candidate: &CandidateView<'_>) -> ScreeningOutcome {
        if already_seen {
            return ScreeningOutcome::Skip;
        }
        self.evaluate(candidate)
    }

    /// Extract fields from `raw_text` and evaluate them, using the parsed age.
    pub fn evaluate_text(&self, raw_text: &str) -> (ParsedCandidate, ScreeningOutcome) {
        let parsed = extract_candidate(raw_text);
        let outcome = self.evaluate(&CandidateView::from_parsed(&parsed, raw_text));
        (parsed, outcome)
    }
}
