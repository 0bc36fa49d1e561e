use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mallas::cli;

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    init_logging(cli_opts.log_level());
    cli::run(cli_opts)
}

/// Logs go to stderr; `RUST_LOG` wins over the verbosity flags.
fn init_logging(level: tracing::Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mallas={}", level.as_str().to_lowercase())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
