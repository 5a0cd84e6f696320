mod cli;
mod demo;
mod infra;
mod ledger;
mod routes;
mod server;

use lindle::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
