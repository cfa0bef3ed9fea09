//! Scale command implementation.
//!
//! Without options the command shows the app's current limits. With any of
//! `-i`, `-m` or `-k` it sends one sparse update carrying exactly the supplied
//! fields, then restarts the app if memory or disk changed.

use std::io::Write;

use cfctl_api::{AppParams, Application, Gateway};
use serde::Serialize;
use tracing::info;

use super::restart::AppRestarter;
use crate::cli::ScaleArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::{ActionResult, OutputFormat, TableDisplay};
use crate::requirements::{Requirement, Resolved};
use crate::units;

/// Current limits of an app.
#[derive(Debug, Clone, Serialize)]
pub struct AppLimits {
    /// App name.
    pub name: String,
    /// Org, space and user the lookup ran as.
    #[serde(skip)]
    pub target: String,
    /// Number of instances.
    pub instances: u32,
    /// Memory per instance in megabytes.
    pub memory: u64,
    /// Disk quota per instance in megabytes.
    pub disk_quota: u64,
}

impl TableDisplay for AppLimits {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Showing current scale of app {} in {}...", self.name, self.target)?;
        writeln!(writer, "OK")?;
        writeln!(writer)?;
        writeln!(writer, "{:<12}{}", "memory:", units::megabytes(self.memory))?;
        writeln!(writer, "{:<12}{}", "disk:", units::megabytes(self.disk_quota))?;
        writeln!(writer, "{:<12}{}", "instances:", self.instances)?;
        Ok(())
    }
}

/// Preconditions of `scale APP`.
#[must_use]
pub fn requirements(args: &ScaleArgs) -> Vec<Requirement> {
    vec![
        Requirement::Login,
        Requirement::TargetedSpace,
        Requirement::Application(args.app.clone()),
    ]
}

/// Scale command executor.
pub struct ScaleCommand<'a, G, R> {
    ctx: &'a Context<G>,
    restarter: &'a R,
}

impl<'a, G: Gateway, R: AppRestarter> ScaleCommand<'a, G, R> {
    /// Create a new scale command.
    #[must_use]
    pub const fn new(ctx: &'a Context<G>, restarter: &'a R) -> Self {
        Self { ctx, restarter }
    }

    /// Show or change the resolved app's limits.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a size option is malformed, in which case
    /// nothing is sent. Otherwise returns the first failed request.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        resolved: &Resolved,
        args: &ScaleArgs,
    ) -> Result<(), CliError> {
        let app = resolved.application()?;

        if !args.any_set() {
            return format.write(writer, &self.limits(app));
        }

        let params = scale_params(args)?;
        info!(app = %app.name, ?params, "scaling app");
        let updated = self.ctx.apps.update(&app.guid, &params).await?;
        format.write(
            writer,
            &ActionResult::ok(format!(
                "Scaling app {} in {}...",
                app.name,
                self.ctx.target_description()
            )),
        )?;

        if params.requires_restart() {
            let report = self.restarter.restart(&updated).await?;
            if !format.is_json() {
                writeln!(writer)?;
            }
            format.write(writer, &report)?;
        }
        Ok(())
    }

    fn limits(&self, app: &Application) -> AppLimits {
        AppLimits {
            name: app.name.clone(),
            target: self.ctx.target_description(),
            instances: app.instances,
            memory: app.memory,
            disk_quota: app.disk_quota,
        }
    }
}

/// Build the sparse update for `args`, validating every size option before
/// anything is sent.
///
/// # Errors
///
/// Returns [`CliError::Validation`] naming the first malformed option.
pub fn scale_params(args: &ScaleArgs) -> Result<AppParams, CliError> {
    let size = |option: &str, value: Option<&str>| {
        value
            .map(|raw| {
                units::to_megabytes(raw)
                    .map_err(|e| CliError::Validation(format!("invalid value for {option}: {e}")))
            })
            .transpose()
    };

    Ok(AppParams {
        instances: args.instances,
        memory: size("memory", args.memory.as_deref())?,
        disk_quota: size("disk", args.disk.as_deref())?,
        ..AppParams::default()
    })
}
