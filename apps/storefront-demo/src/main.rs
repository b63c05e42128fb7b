//! # Storefront Demo Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging)
//! 3. Run the session (see `storefront_demo::run`)

use std::process::ExitCode;

use clap::Parser;
use storefront_demo::Args;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    storefront_demo::init_tracing();

    match storefront_demo::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Storefront demo failed");
            ExitCode::FAILURE
        }
    }
}
