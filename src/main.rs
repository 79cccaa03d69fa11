//! Binary entry point for `tsync`.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("template_sync=info,tsync=info")),
        )
        .with_target(false)
        .init();

    let args = cli::Cli::parse();
    if let Err(err) = cli::run(args).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
