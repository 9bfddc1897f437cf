use std::path::{Path, PathBuf};

use json_comments::StripComments;
use serde::{Deserialize, Serialize};

use crate::workflows::screening::JobRequirements;

/// Default number of list positions visited per job.
pub const DEFAULT_MAX_IDX: u32 = 120;

const MAX_EDUCATION_RANK: u8 = 7;

/// One job to screen candidates for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    pub job_title: String,
    /// Entry page for the session; only read from the first job.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_idx")]
    pub max_idx: u32,
    #[serde(default)]
    pub job_requirements: JobRequirements,
}

fn default_max_idx() -> u32 {
    DEFAULT_MAX_IDX
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JobsDocument {
    Many(Vec<JobConfig>),
    One(Box<JobConfig>),
}

/// Error raised while loading the job configuration file.
#[derive(Debug, thiserror::Error)]
pub enum JobConfigError {
    #[error("failed to read job configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid job configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("job configuration lists no jobs")]
    Empty,
    #[error("job #{index} has an empty job_title")]
    MissingTitle { index: usize },
    #[error("the first job ({job_title}) must provide a url")]
    MissingUrl { job_title: String },
    #[error("job {job_title}: max_idx must be at least 1")]
    InvalidMaxIdx { job_title: String },
    #[error("job {job_title}: age_lower_bound {lower} exceeds age_upper_bound {upper}")]
    InvertedAgeBounds {
        job_title: String,
        lower: u32,
        upper: u32,
    },
    #[error("job {job_title}: min_education_rank {rank} outside 0..=7")]
    InvalidEducationRank { job_title: String, rank: u8 },
}

/// Read and validate the job configuration at `path`.
pub fn load_jobs<P: AsRef<Path>>(path: P) -> Result<Vec<JobConfig>, JobConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| JobConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_jobs(&raw)
}

/// Parse a single job object or a list of jobs; comments are allowed.
pub fn parse_jobs(raw: &str) -> Result<Vec<JobConfig>, JobConfigError> {
    let stripped = StripComments::new(raw.as_bytes());
    let jobs = match serde_json::from_reader::<_, JobsDocument>(stripped)? {
        JobsDocument::Many(jobs) => jobs,
        JobsDocument::One(job) => vec![*job],
    };
    validate(&jobs)?;
    Ok(jobs)
}

fn validate(jobs: &[JobConfig]) -> Result<(), JobConfigError> {
    let first = jobs.first().ok_or(JobConfigError::Empty)?;

    for (index, job) in jobs.iter().enumerate() {
        if job.job_title.trim().is_empty() {
            return Err(JobConfigError::MissingTitle { index: index + 1 });
        }
        if job.max_idx == 0 {
            return Err(JobConfigError::InvalidMaxIdx {
                job_title: job.job_title.clone(),
            });
        }
        let requirements = &job.job_requirements;
        if requirements.age_lower_bound > requirements.age_upper_bound {
            return Err(JobConfigError::InvertedAgeBounds {
                job_title: job.job_title.clone(),
                lower: requirements.age_lower_bound,
                upper: requirements.age_upper_bound,
            });
        }
        if requirements.min_education_rank > MAX_EDUCATION_RANK {
            return Err(JobConfigError::InvalidEducationRank {
                job_title: job.job_title.clone(),
                rank: requirements.min_education_rank,
            });
        }
    }

    if first
        .url
        .as_deref()
        .map_or(true, |url| url.trim().is_empty())
    {
        return Err(JobConfigError::MissingUrl {
            job_title: first.job_title.clone(),
        });
    }

    Ok(())
}
