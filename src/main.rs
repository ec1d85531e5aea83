use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use tcarchive::cli::Cli;
use tcarchive::config::init_config;
use tcarchive::errors::ArchiveError;
use tcarchive::interfaces::cli::{CliContext, run_cli_command};
use tcarchive::system::{init_logging, install_panic_hook};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    install_panic_hook();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ArchiveError>() {
                Some(archive_err) => eprintln!("{}", archive_err.format_colored()),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = init_config(cli.config.as_deref())?;
    let _guard = init_logging(&config.logging, cli.verbose)?;
    debug!(?config, "configuration loaded");

    let ctx = CliContext::new(config, cli.root);
    run_cli_command(&ctx, cli.command).await?;
    Ok(())
}
