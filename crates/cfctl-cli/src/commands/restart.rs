//! Restart command implementation.
//!
//! A restart is a stop followed by a start. Scaling memory or disk reuses the
//! same path, so it lives behind the [`AppRestarter`] trait.

use std::future::Future;
use std::io::Write;

use cfctl_api::models::{STATE_STARTED, STATE_STOPPED};
use cfctl_api::{AppParams, Application, Gateway};
use serde::Serialize;
use tracing::info;

use crate::context::Context;
use crate::error::CliError;
use crate::output::{OutputFormat, TableDisplay};
use crate::requirements::{Requirement, Resolved};

/// Restarts an application.
pub trait AppRestarter: Send + Sync {
    /// Stop `app` (unless it is already stopped), then start it.
    fn restart(
        &self,
        app: &Application,
    ) -> impl Future<Output = Result<RestartReport, CliError>> + Send;
}

/// What a restart did.
#[derive(Debug, Clone, Serialize)]
pub struct RestartReport {
    /// App name.
    pub app: String,
    /// Org, space and user the restart ran as.
    #[serde(skip)]
    pub target: String,
    /// Whether a stop request was sent.
    pub stopped: bool,
    /// Desired state reported by the start request.
    pub state: String,
}

impl TableDisplay for RestartReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.stopped {
            writeln!(writer, "Stopping app {} in {}...", self.app, self.target)?;
            writeln!(writer, "OK")?;
            writeln!(writer)?;
        }
        writeln!(writer, "Starting app {} in {}...", self.app, self.target)?;
        writeln!(writer, "OK")?;
        Ok(())
    }
}

/// Restarts apps through the applications repository.
pub struct ApplicationRestarter<'a, G> {
    ctx: &'a Context<G>,
}

impl<'a, G: Gateway> ApplicationRestarter<'a, G> {
    /// Create a restarter.
    #[must_use]
    pub const fn new(ctx: &'a Context<G>) -> Self {
        Self { ctx }
    }
}

impl<G: Gateway> AppRestarter for ApplicationRestarter<'_, G> {
    async fn restart(&self, app: &Application) -> Result<RestartReport, CliError> {
        let stopped = if app.is_stopped() {
            false
        } else {
            info!(app = %app.name, "stopping app");
            self.ctx
                .apps
                .update(&app.guid, &AppParams::with_state(STATE_STOPPED))
                .await?;
            true
        };

        info!(app = %app.name, "starting app");
        let started = self
            .ctx
            .apps
            .update(&app.guid, &AppParams::with_state(STATE_STARTED))
            .await?;

        Ok(RestartReport {
            app: app.name.clone(),
            target: self.ctx.target_description(),
            stopped,
            state: started.state,
        })
    }
}

/// Preconditions of `restart APP`.
#[must_use]
pub fn requirements(app: &str) -> Vec<Requirement> {
    vec![
        Requirement::Login,
        Requirement::TargetedSpace,
        Requirement::Application(app.to_string()),
    ]
}

/// Restart command executor.
pub struct RestartCommand<'a, R> {
    restarter: &'a R,
}

impl<'a, R: AppRestarter> RestartCommand<'a, R> {
    /// Create a new restart command.
    #[must_use]
    pub const fn new(restarter: &'a R) -> Self {
        Self { restarter }
    }

    /// Restart the resolved app.
    ///
    /// # Errors
    ///
    /// Returns an error if the stop or start request fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        resolved: &Resolved,
    ) -> Result<(), CliError> {
        let app = resolved.application()?;
        let report = self.restarter.restart(app).await?;
        format.write(writer, &report)
    }
}
