mod cli;
mod oracle_client;
mod prompts;
mod report;
mod runner;

use recruit_ai::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
