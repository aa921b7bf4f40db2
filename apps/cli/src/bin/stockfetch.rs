use anyhow::Context;
use clap::Parser;

use stockfetch_cli::cli::FetchArgs;
use stockfetch_cli::config::Config;
use stockfetch_cli::main_lib::{build_fetch_service, init_tracing, open_store};
use stockfetch_core::fetch::FetchServiceTrait;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = FetchArgs::parse();
    let mut config = Config::from_env().context("Invalid configuration")?;
    config
        .apply_fetch_args(&args)
        .context("Invalid command-line arguments")?;
    init_tracing();

    let store = open_store(&config).context("Failed to open the price store")?;
    let service = build_fetch_service(&config, &store)?;

    let summary = service
        .run_full_fetch(args.start, args.end)
        .await
        .context("Fetch run aborted")?;
    tracing::info!(
        total = summary.total,
        completed = summary.completed,
        failed = summary.failed,
        "Run complete"
    );
    Ok(())
}
