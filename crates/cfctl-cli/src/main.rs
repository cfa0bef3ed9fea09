//! cfctl binary entrypoint.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use cfctl_api::HttpGateway;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cfctl_cli::CliError;
use cfctl_cli::cli::Cli;
use cfctl_cli::commands;
use cfctl_cli::context::Context;
use cfctl_cli::output::{OutputFormat, Prompter};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("FAILED");
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    let gateway = HttpGateway::with_timeouts(CONNECT_TIMEOUT, cli.request_timeout())?;
    let ctx = Context::new(Arc::new(gateway), Arc::new(config));

    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();
    let mut prompter = Prompter::new(io::stdin().lock(), io::stderr());

    commands::run(&ctx, &cli.command, &format, &mut stdout, &mut prompter).await
}
