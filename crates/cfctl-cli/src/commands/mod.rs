//! Command implementations.
//!
//! Every command declares its requirements; [`run`] evaluates them in order
//! and only then executes the command body with the resolved records.

pub mod quota;
pub mod restart;
pub mod scale;
pub mod service_auth_token;

use std::io::{BufRead, Write};

use cfctl_api::Gateway;
use tracing::debug;

pub use quota::QuotaCommand;
pub use restart::{AppRestarter, ApplicationRestarter, RestartCommand};
pub use scale::ScaleCommand;
pub use service_auth_token::ServiceAuthTokenCommand;

use crate::cli::Commands;
use crate::context::Context;
use crate::error::CliError;
use crate::output::{OutputFormat, Prompter};
use crate::requirements::Requirement;

/// The requirements `command` declares, in evaluation order.
#[must_use]
pub fn requirements(command: &Commands) -> Vec<Requirement> {
    match command {
        Commands::Scale(args) => scale::requirements(args),
        Commands::Restart { app } => restart::requirements(app),
        Commands::Quotas | Commands::CreateQuota(_) => quota::requirements(),
        Commands::SetQuota { org, .. } => quota::set_requirements(org),
        Commands::ServiceAuthTokens
        | Commands::CreateServiceAuthToken(_)
        | Commands::UpdateServiceAuthToken(_)
        | Commands::DeleteServiceAuthToken { .. } => service_auth_token::requirements(),
    }
}

/// Evaluate `command`'s requirements, then execute it.
///
/// # Errors
///
/// Returns the first failed requirement or the command's own error.
pub async fn run<G, W, R, E>(
    ctx: &Context<G>,
    command: &Commands,
    format: &OutputFormat,
    writer: &mut W,
    prompter: &mut Prompter<R, E>,
) -> Result<(), CliError>
where
    G: Gateway,
    W: Write,
    R: BufRead,
    E: Write,
{
    let resolved = ctx.evaluator().evaluate(&requirements(command)).await?;
    debug!(?command, "requirements met");

    match command {
        Commands::Scale(args) => {
            let restarter = ApplicationRestarter::new(ctx);
            ScaleCommand::new(ctx, &restarter)
                .execute(writer, format, &resolved, args)
                .await
        }
        Commands::Restart { .. } => {
            let restarter = ApplicationRestarter::new(ctx);
            RestartCommand::new(&restarter)
                .execute(writer, format, &resolved)
                .await
        }
        Commands::Quotas => QuotaCommand::new(ctx).list(writer, format).await,
        Commands::CreateQuota(args) => QuotaCommand::new(ctx).create(writer, format, args).await,
        Commands::SetQuota { quota, .. } => QuotaCommand::new(ctx)
            .set(writer, format, &resolved, quota)
            .await,
        Commands::ServiceAuthTokens => ServiceAuthTokenCommand::new(ctx).list(writer, format).await,
        Commands::CreateServiceAuthToken(args) => ServiceAuthTokenCommand::new(ctx)
            .create(writer, format, args)
            .await,
        Commands::UpdateServiceAuthToken(args) => ServiceAuthTokenCommand::new(ctx)
            .update(writer, format, args)
            .await,
        Commands::DeleteServiceAuthToken {
            label,
            provider,
            force,
        } => {
            ServiceAuthTokenCommand::new(ctx)
                .delete(writer, prompter, format, label, provider, *force)
                .await
        }
    }
}
