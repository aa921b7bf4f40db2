use anyhow::Context;
use clap::Parser;

use stockfetch_cli::cli::StatusArgs;
use stockfetch_cli::config::Config;
use stockfetch_cli::main_lib::{
    build_status_observer, init_tracing, open_status_view, StdoutReporter,
};
use stockfetch_core::status::StatusReporter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = StatusArgs::parse();
    let mut config = Config::from_env().context("Invalid configuration")?;
    config
        .apply_status_args(&args)
        .context("Invalid command-line arguments")?;
    init_tracing();

    let view = open_status_view(&config).context("Failed to open the price store")?;
    let observer = build_status_observer(&config, view);
    let reporter = StdoutReporter;

    if args.once {
        reporter.report(&observer.poll_once()?);
        return Ok(());
    }

    tracing::info!(
        "Polling run status every {}s",
        observer.interval().as_secs()
    );
    observer.run(&reporter, None).await;
    Ok(())
}
