use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use trellis_cli::{commands, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let stdout = std::io::stdout();
    commands::run(cli, &mut stdout.lock())
}

/// `RUST_LOG` wins when set; otherwise `-v` picks the level.
fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("handlebars=off,{}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
