//! Binary crate for the `weather-webhook` server.

use clap::Parser;
use fulfillment_webhook::{cli, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    telemetry::init(cmd.log_format);
    cmd.run().await
}
