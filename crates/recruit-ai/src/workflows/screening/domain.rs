use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal employment status shown for candidates who have left their last role.
pub const OFF_THE_JOB_STATUS: &str = "离职-随时到岗";

/// One bound of a candidate's salary expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryBound {
    Amount(u32),
    Negotiable,
}

impl SalaryBound {
    pub const fn amount(self) -> Option<u32> {
        match self {
            Self::Amount(value) => Some(value),
            Self::Negotiable => None,
        }
    }
}

/// Seven-step education scale, ordered from lowest to highest attainment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    MiddleSchoolOrBelow,
    HighSchool,
    Vocational,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationLevel {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::MiddleSchoolOrBelow,
            Self::HighSchool,
            Self::Vocational,
            Self::Associate,
            Self::Bachelor,
            Self::Master,
            Self::Doctorate,
        ]
    }

    /// Rank on the 1..=7 scale used by job requirements.
    pub const fn rank(self) -> u8 {
        match self {
            Self::MiddleSchoolOrBelow => 1,
            Self::HighSchool => 2,
            Self::Vocational => 3,
            Self::Associate => 4,
            Self::Bachelor => 5,
            Self::Master => 6,
            Self::Doctorate => 7,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MiddleSchoolOrBelow => "初中及以下",
            Self::HighSchool => "高中",
            Self::Vocational => "中专/中技",
            Self::Associate => "大专",
            Self::Bachelor => "本科",
            Self::Master => "硕士",
            Self::Doctorate => "博士",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "中专" | "中技" => Some(Self::Vocational),
            other => Self::ordered()
                .into_iter()
                .find(|level| level.label() == other),
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structured fields recovered from a candidate card's visible text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCandidate {
    pub salary_lower: Option<SalaryBound>,
    pub salary_upper: Option<SalaryBound>,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub education: Option<EducationLevel>,
    pub employment_status: Option<String>,
}

impl ParsedCandidate {
    pub fn education_rank(&self) -> Option<u8> {
        self.education.map(EducationLevel::rank)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("候选人")
    }
}

/// Age as read from the candidate list; `Unknown` never satisfies an age range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeReading {
    Known(u32),
    Unknown,
}

impl From<Option<u32>> for AgeReading {
    fn from(value: Option<u32>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl fmt::Display for AgeReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(age) => write!(f, "{age}"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Per-job screening rules applied before any adjudication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobRequirements {
    pub age_lower_bound: u32,
    pub age_upper_bound: u32,
    /// Zero or negative means no ceiling.
    pub maximum_salary: i64,
    /// Zero means no requirement.
    pub min_education_rank: u8,
    pub require_off_the_job: bool,
    #[serde(alias = "cv_required_keywords")]
    pub required_keywords: Vec<String>,
    #[serde(alias = "cv_requirements")]
    pub free_text_criteria: String,
}

impl Default for JobRequirements {
    fn default() -> Self {
        Self {
            age_lower_bound: 0,
            age_upper_bound: 100,
            maximum_salary: 0,
            min_education_rank: 0,
            require_off_the_job: false,
            required_keywords: Vec::new(),
            free_text_criteria: String::new(),
        }
    }
}

/// Adjudicator decision with its justification; `reason` is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationVerdict {
    pub is_qualified: bool,
    pub reason: String,
}

impl QualificationVerdict {
    pub fn not_qualified(reason: impl Into<String>) -> Self {
        Self {
            is_qualified: false,
            reason: reason.into(),
        }
    }
}

/// Counters accumulated for one job title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRunStats {
    pub viewed: u32,
    pub greeted: u32,
}
