use serde::{Deserialize, Serialize};

/// Identifies one deterministic gate in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    Age,
    SalaryCeiling,
    Education,
    EmploymentStatus,
    Keywords,
}

impl GateKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Age,
            Self::SalaryCeiling,
            Self::Education,
            Self::EmploymentStatus,
            Self::Keywords,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::SalaryCeiling => "salary ceiling",
            Self::Education => "education",
            Self::EmploymentStatus => "employment status",
            Self::Keywords => "keywords",
        }
    }
}

/// Result of a single gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    Pass,
    Fail(String),
}

/// First failing gate together with the evidence that failed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateRejection {
    pub gate: GateKind,
    pub detail: String,
}

impl GateRejection {
    pub fn summary(&self) -> String {
        format!("rejected at {} gate: {}", self.gate.label(), self.detail)
    }
}

/// Decision for one candidate position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningOutcome {
    /// The position was already viewed in an earlier session.
    Skip,
    Reject(GateRejection),
    /// Every deterministic gate passed; the oracle may be consulted.
    AdjudicateCandidate,
}

impl ScreeningOutcome {
    pub fn summary(&self) -> String {
        match self {
            Self::Skip => "already viewed".to_string(),
            Self::Reject(rejection) => rejection.summary(),
            Self::AdjudicateCandidate => "passed all gates".to_string(),
        }
    }
}
