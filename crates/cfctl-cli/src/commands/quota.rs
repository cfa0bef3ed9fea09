//! Quota command implementations: `quotas`, `create-quota`, `set-quota`.

use std::io::Write;

use cfctl_api::{Gateway, QuotaFields};
use serde::Serialize;
use tracing::info;

use crate::cli::CreateQuotaArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::{ActionResult, OutputFormat, TableDisplay, column_width};
use crate::requirements::{Requirement, Resolved};
use crate::units;

/// Listing of quota definitions.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaList {
    /// User the listing ran as.
    #[serde(skip)]
    pub username: String,
    /// Quotas in server order.
    pub quotas: Vec<QuotaFields>,
}

impl TableDisplay for QuotaList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Getting quotas as {}...", self.username)?;
        writeln!(writer, "OK")?;
        writeln!(writer)?;

        if self.quotas.is_empty() {
            writeln!(writer, "No quotas found")?;
            return Ok(());
        }

        let width = column_width("name", self.quotas.iter().map(|q| q.name.as_str()));
        writeln!(writer, "{:<width$}   {}", "name", "memory limit")?;
        for quota in &self.quotas {
            writeln!(writer, "{:<width$}   {}", quota.name, units::megabytes(quota.memory_limit))?;
        }
        Ok(())
    }
}

/// Preconditions of `quotas` and `create-quota`.
#[must_use]
pub fn requirements() -> Vec<Requirement> {
    vec![Requirement::Login]
}

/// Preconditions of `set-quota ORG QUOTA`.
#[must_use]
pub fn set_requirements(org: &str) -> Vec<Requirement> {
    vec![Requirement::Login, Requirement::Organization(org.to_string())]
}

/// Quota command executor.
pub struct QuotaCommand<'a, G> {
    ctx: &'a Context<G>,
}

impl<'a, G: Gateway> QuotaCommand<'a, G> {
    /// Create a new quota command.
    #[must_use]
    pub const fn new(ctx: &'a Context<G>) -> Self {
        Self { ctx }
    }

    /// List every quota definition.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails to load.
    pub async fn list<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        let quotas = self.ctx.quotas.find_all().await?;
        let list = QuotaList {
            username: self.ctx.username().to_string(),
            quotas,
        };
        format.write(writer, &list)
    }

    /// Define a new quota.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the memory limit is malformed, or the
    /// API error if creation fails.
    pub async fn create<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &CreateQuotaArgs,
    ) -> Result<(), CliError> {
        let memory_limit = units::to_megabytes(&args.memory)
            .map_err(|e| CliError::Validation(format!("invalid value for memory: {e}")))?;
        let quota = QuotaFields {
            name: args.name.clone(),
            memory_limit,
            total_services: args.services,
            total_routes: args.routes,
            non_basic_services_allowed: args.allow_paid_service_plans,
            ..QuotaFields::default()
        };

        info!(quota = %quota.name, memory_limit, "creating quota");
        self.ctx.quotas.create(&quota).await?;
        format.write(
            writer,
            &ActionResult::ok(format!(
                "Creating quota {} as {}...",
                quota.name,
                self.ctx.username()
            )),
        )
    }

    /// Bind the resolved org to the quota named `quota_name`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no quota has that name, or the API error if the
    /// update fails.
    pub async fn set<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        resolved: &Resolved,
        quota_name: &str,
    ) -> Result<(), CliError> {
        let org = resolved.organization()?;
        let quota = self.ctx.quotas.find_by_name(quota_name).await?;

        info!(org = %org.name, quota = %quota.name, "setting org quota");
        self.ctx.quotas.update(&org.guid, &quota.guid).await?;
        format.write(
            writer,
            &ActionResult::ok(format!(
                "Setting quota {} to org {} as {}...",
                quota.name,
                org.name,
                self.ctx.username()
            )),
        )
    }
}
