use anyhow::Result;
use clap::Parser;
use script_runner::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG env var
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().command.execute().await
}
