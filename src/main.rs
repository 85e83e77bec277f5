//! `headcount` entrypoint: fast per-repository contributor counts.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use headcount::HeadcountArgs;
use headcount::count::count_repositories;
use headcount::github::{ContributorsClient, HeadcountError};
use headcount::output::write_count_report;

const DEFAULT_ARTIFACT_DIR: &str = "contributor-counts";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("headcount=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), HeadcountError> {
    let args = HeadcountArgs::parse();

    let token = args.resolve_token()?;
    let inputs = args.resolve_repositories()?;

    let client = ContributorsClient::new(&token, args.api_base.clone())?;
    let sink = args.artifact_sink(DEFAULT_ARTIFACT_DIR);

    let outcomes = count_repositories(&client, &inputs, sink.as_ref()).await;
    write_count_report(&mut io::stdout().lock(), &outcomes)
}
