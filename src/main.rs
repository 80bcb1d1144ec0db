use anyhow::Result;
use clap::Parser;
use cv_autofill::cli::{handle_command, AutofillCli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON replies
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = AutofillCli::parse();
    handle_command(cli).await
}
