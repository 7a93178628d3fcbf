//! # Undercoverage
//!
//! An interactive command-line tool that compares how much coverage two
//! news outlets dedicate to a subject, backed by the newsapi.org article
//! archive.
//!
//! ## Usage
//!
//! ```sh
//! undercoverage
//! ```
//!
//! The tool prompts for a newsapi.org API key, validates it against the
//! source catalog, asks for two distinct sources (by name or id), fetches
//! a one-month baseline article total for each, and then repeatedly
//! prompts for search terms, printing what percentage of each outlet's
//! articles covered the term.
//!
//! ## Architecture
//!
//! 1. **Request building**: time-windowed, URL-encoded queries against
//!    `/v2/everything` and `/v2/sources` ([`request`], [`api`])
//! 2. **Response classification**: 200 parses as the success payload,
//!    anything else as a structured API error ([`api`], [`models`])
//! 3. **Interactive driver**: prompt loop over stdin with per-state error
//!    recovery ([`driver`])

use clap::Parser;
use std::error::Error;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod catalog;
mod cli;
mod driver;
mod models;
mod request;
mod utils;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // Logs go to stderr at warn by default so they never interleave with
    // the interactive prompts; RUST_LOG overrides.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let _args = Cli::parse();

    let api = api::NewsApiClient::new();
    let mut input = BufReader::new(tokio::io::stdin());
    driver::run(&api, &mut input).await
}
