//! QA Board Service Entry Point
//!
//! Loads configuration, connects storage and serves the HTTP API until
//! a shutdown signal arrives.

use qa_board::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
