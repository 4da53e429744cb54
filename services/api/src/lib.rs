mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use municipal_eservices::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
