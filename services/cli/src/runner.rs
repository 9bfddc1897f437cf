use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use recruit_ai::config::{load_jobs, AppConfig};
use recruit_ai::error::AppError;
use recruit_ai::telemetry;
use recruit_ai::workflows::replay::{OutreachLog, ReplaySurface};
use recruit_ai::workflows::screening::{
    CandidateScreener, JobReport, JobTermination, QualificationOracleAdapter, RunStats,
    TracingAuditSink,
};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::oracle_client::HttpQualificationOracle;
use crate::report::RunReport;

/// Conventional status for a process stopped by SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

pub(crate) async fn run(args: RunArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let jobs = load_jobs(&args.config)?;
    let surface = ReplaySurface::from_path(&args.candidates)?;
    if config.oracle.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; every adjudication will be rejected");
    }
    info!(
        environment = ?config.environment,
        url = jobs.first().and_then(|job| job.url.as_deref()).unwrap_or_default(),
        jobs = jobs.len(),
        candidates = %args.candidates.display(),
        "starting screening session"
    );

    let stats = RunStats::new();
    for job in &jobs {
        stats.register(&job.job_title);
    }

    let worker_stats = stats.clone();
    let oracle_config = config.oracle.clone();
    let settle_delay = config.screening.settle_delay;
    let outreach = surface.outreach_log();
    let worker = tokio::task::spawn_blocking(move || -> Result<Vec<JobReport>, AppError> {
        let oracle = HttpQualificationOracle::new(&oracle_config)?;
        let adapter = QualificationOracleAdapter::new(oracle, Arc::new(TracingAuditSink));
        let mut screener =
            CandidateScreener::new(surface, adapter, worker_stats).with_settle_delay(settle_delay);

        Ok(screener.run_all(&jobs))
    });

    tokio::select! {
        joined = worker => {
            let reports = joined.map_err(std::io::Error::other)??;
            for report in &reports {
                if let JobTermination::Aborted(reason) = &report.termination {
                    warn!(
                        job_title = report.job_title.as_str(),
                        last_position = report.last_position,
                        %reason,
                        "job ended early"
                    );
                }
            }
            emit_report(&RunReport::from_stats(&stats, false))?;
            if let Some(path) = &args.outreach_log {
                write_outreach_log(path, &outreach)?;
            }
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted; reporting progress so far");
            emit_report(&RunReport::from_stats(&stats, true))?;
            if let Some(path) = &args.outreach_log {
                write_outreach_log(path, &outreach)?;
            }
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }
}

fn emit_report(report: &RunReport) -> Result<(), AppError> {
    report.log();
    let rendered = report.to_json().map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

/// Write the greetings sent so far; also used when the run is interrupted.
fn write_outreach_log(path: &Path, outreach: &OutreachLog) -> Result<(), AppError> {
    let file = File::create(path)?;
    outreach.write_csv(file)?;
    info!(path = %path.display(), greetings = outreach.len(), "outreach log written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recruit_ai::workflows::screening::CandidateSurface;

    #[test]
    fn outreach_log_file_holds_greetings_recorded_so_far() {
        let recording = "seen,age,card_text\nfalse,28,10-15K 张三 28岁 本科\n";
        let mut surface = ReplaySurface::from_reader(recording.as_bytes()).expect("loads");
        let outreach = surface.outreach_log();
        surface.select_job("运营专员").expect("selects");
        let card = surface.candidate_card(1).expect("card");
        surface.render_candidate_detail(&card).expect("detail");
        surface.perform_outreach(&card).expect("greeting");

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("outreach.csv");
        write_outreach_log(&path, &outreach).expect("log written");

        let written = std::fs::read_to_string(&path).expect("log readable");
        assert!(written.starts_with("job_title,position,card_text"));
        assert!(written.contains("运营专员,1,"));
    }
}
