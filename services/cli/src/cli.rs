use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use recruit_ai::config::load_jobs;
use recruit_ai::error::AppError;
use recruit_ai::workflows::screening::extract_candidate;

use crate::runner;

const DEFAULT_JOB_CONFIG: &str = "params.json";

#[derive(Parser, Debug)]
#[command(
    name = "recruit-ai",
    about = "Screen recruiting-platform candidate lists against configured job requirements",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Screen every configured job against a recorded candidate list
    Run(RunArgs),
    /// Print the fields extracted from a candidate card's text as JSON
    Parse(ParseArgs),
    /// Load and validate a job configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    /// Job configuration file (JSON, comments allowed)
    #[arg(short = 'c', long = "config", default_value = DEFAULT_JOB_CONFIG)]
    pub(crate) config: PathBuf,
    /// CSV recording of the candidate list to replay
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// Write every greeting sent during the run to this CSV file
    #[arg(long)]
    pub(crate) outreach_log: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ParseArgs {
    /// Visible text of one candidate card
    pub(crate) text: String,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Job configuration file (JSON, comments allowed)
    #[arg(short = 'c', long = "config", default_value = DEFAULT_JOB_CONFIG)]
    pub(crate) config: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => runner::run(args).await,
        Command::Parse(args) => parse_card(args),
        Command::Validate(args) => validate_config(args),
    }
}

fn parse_card(args: ParseArgs) -> Result<(), AppError> {
    let parsed = extract_candidate(&args.text);
    let rendered = serde_json::to_string_pretty(&parsed).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn validate_config(args: ValidateArgs) -> Result<(), AppError> {
    let jobs = load_jobs(&args.config)?;

    println!("{}: {} job(s) valid", args.config.display(), jobs.len());
    for job in &jobs {
        let requirements = &job.job_requirements;
        println!(
            "- {} | positions 1..={} | age {}-{} | salary ceiling {} | education rank >= {} | off the job: {} | keywords: {} | criteria: {}",
            job.job_title,
            job.max_idx,
            requirements.age_lower_bound,
            requirements.age_upper_bound,
            if requirements.maximum_salary > 0 {
                requirements.maximum_salary.to_string()
            } else {
                "none".to_string()
            },
            requirements.min_education_rank,
            requirements.require_off_the_job,
            if requirements.required_keywords.is_empty() {
                "any".to_string()
            } else {
                requirements.required_keywords.join(" / ")
            },
            if requirements.free_text_criteria.trim().is_empty() {
                "missing (oracle verdicts fail closed)"
            } else {
                "present"
            },
        );
    }
    Ok(())
}
