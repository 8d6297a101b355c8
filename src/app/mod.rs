//! Command-line entry point, HTTP server wiring, and operator commands.

mod cli;
mod demo;
mod roster;
pub mod routes;
mod server;

use crate::error::AppError;

pub use routes::{app_router, AppState};

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
