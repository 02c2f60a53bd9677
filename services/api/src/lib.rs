mod cli;
mod commands;
mod demo;
mod infra;
mod routes;
mod server;

use care_triage::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
