//! Swaggy Sphere CLI

use std::process;

use clap::Parser;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();
    if let Err(error) = cli::run(cli).await {
        eprintln!("error: {error}");
        process::exit(1);
    }
}
