use super::super::domain::{AgeReading, JobRequirements, SalaryBound, OFF_THE_JOB_STATUS};
use super::outcome::{GateKind, GateVerdict};
use super::CandidateView;

/// One deterministic pass/fail rule.
pub trait Gate: Send + Sync {
    fn kind(&self) -> GateKind;
    fn check(&self, candidate: &CandidateView<'_>) -> GateVerdict;
}

/// The five built-in gates in the order they must run.
pub fn standard_gates(requirements: &JobRequirements) -> Vec<Box<dyn Gate>> {
    vec![
        Box::new(AgeGate {
            lower: requirements.age_lower_bound,
            upper: requirements.age_upper_bound,
        }),
        Box::new(SalaryCeilingGate {
            maximum_salary: requirements.maximum_salary,
        }),
        Box::new(EducationGate {
            min_rank: requirements.min_education_rank,
        }),
        Box::new(EmploymentStatusGate {
            require_off_the_job: requirements.require_off_the_job,
        }),
        Box::new(KeywordGate {
            keywords: requirements.required_keywords.clone(),
        }),
    ]
}

pub(crate) struct AgeGate {
    lower: u32,
    upper: u32,
}

impl Gate for AgeGate {
    fn kind(&self) -> GateKind {
        GateKind::Age
    }

    fn check(&self, candidate: &CandidateView<'_>) -> GateVerdict {
        match candidate.age {
            AgeReading::Known(age) if (self.lower..=self.upper).contains(&age) => GateVerdict::Pass,
            AgeReading::Known(age) => GateVerdict::Fail(format!(
                "age {age} outside {}..={}",
                self.lower, self.upper
            )),
            AgeReading::Unknown => GateVerdict::Fail("age could not be read".to_string()),
        }
    }
}

pub(crate) struct SalaryCeilingGate {
    maximum_salary: i64,
}

impl Gate for SalaryCeilingGate {
    fn kind(&self) -> GateKind {
        GateKind::SalaryCeiling
    }

    fn check(&self, candidate: &CandidateView<'_>) -> GateVerdict {
        if self.maximum_salary <= 0 {
            return GateVerdict::Pass;
        }

        match candidate.parsed.salary_lower {
            Some(SalaryBound::Amount(lower))
                if lower > 0 && i64::from(lower) < self.maximum_salary =>
            {
                GateVerdict::Pass
            }
            Some(SalaryBound::Amount(lower)) => GateVerdict::Fail(format!(
                "expected minimum {lower} not below ceiling {}",
                self.maximum_salary
            )),
            Some(SalaryBound::Negotiable) => {
                GateVerdict::Fail("salary is negotiable, ceiling cannot be checked".to_string())
            }
            None => GateVerdict::Fail("salary expectation missing".to_string()),
        }
    }
}

pub(crate) struct EducationGate {
    min_rank: u8,
}

impl Gate for EducationGate {
    fn kind(&self) -> GateKind {
        GateKind::Education
    }

    fn check(&self, candidate: &CandidateView<'_>) -> GateVerdict {
        if self.min_rank == 0 {
            return GateVerdict::Pass;
        }

        match candidate.parsed.education {
            Some(level) if level.rank() >= self.min_rank => GateVerdict::Pass,
            Some(level) => GateVerdict::Fail(format!(
                "education {} (rank {}) below required rank {}",
                level,
                level.rank(),
                self.min_rank
            )),
            None => GateVerdict::Fail("education level missing".to_string()),
        }
    }
}

pub(crate) struct EmploymentStatusGate {
    require_off_the_job: bool,
}

impl Gate for EmploymentStatusGate {
    fn kind(&self) -> GateKind {
        GateKind::EmploymentStatus
    }

    fn check(&self, candidate: &CandidateView<'_>) -> GateVerdict {
        if !self.require_off_the_job {
            return GateVerdict::Pass;
        }

        match candidate.parsed.employment_status.as_deref() {
            Some(OFF_THE_JOB_STATUS) => GateVerdict::Pass,
            Some(other) => GateVerdict::Fail(format!("status {other:?} is not off the job")),
            None => GateVerdict::Fail("employment status missing".to_string()),
        }
    }
}

pub(crate) struct KeywordGate {
    keywords: Vec<String>,
}

impl Gate for KeywordGate {
    fn kind(&self) -> GateKind {
        GateKind::Keywords
    }

    fn check(&self, candidate: &CandidateView<'_>) -> GateVerdict {
        if self.keywords.is_empty()
            || self
                .keywords
                .iter()
                .any(|keyword| candidate.raw_text.contains(keyword.as_str()))
        {
            GateVerdict::Pass
        } else {
            GateVerdict::Fail(format!("none of {:?} present", self.keywords))
        }
    }
}
