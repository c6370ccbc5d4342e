//! CLI entry point for the pixel reassignment tool

use clap::Parser;
use pixel_reassign::io::cli::{Cli, FileProcessor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> pixel_reassign::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixel_reassign=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
