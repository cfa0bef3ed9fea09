//! Service auth token commands: list, create, update and delete.

use std::io::{BufRead, Write};

use cfctl_api::{Gateway, ServiceAuthTokenFields};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::AuthTokenArgs;
use crate::context::Context;
use crate::error::CliError;
use crate::output::{ActionResult, OutputFormat, Prompter, TableDisplay, column_width};
use crate::requirements::Requirement;

/// Listing of service auth tokens.
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokenList {
    /// User the listing ran as.
    #[serde(skip)]
    pub username: String,
    /// Tokens in server order, without their secrets.
    pub tokens: Vec<ServiceAuthTokenFields>,
}

impl TableDisplay for AuthTokenList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "Getting service auth tokens as {}...", self.username)?;
        writeln!(writer, "OK")?;
        writeln!(writer)?;

        if self.tokens.is_empty() {
            writeln!(writer, "No service auth tokens found")?;
            return Ok(());
        }

        let width = column_width("label", self.tokens.iter().map(|t| t.label.as_str()));
        writeln!(writer, "{:<width$}   {}", "label", "provider")?;
        for token in &self.tokens {
            writeln!(writer, "{:<width$}   {}", token.label, token.provider)?;
        }
        Ok(())
    }
}

/// Preconditions shared by every token command.
#[must_use]
pub fn requirements() -> Vec<Requirement> {
    vec![Requirement::Login]
}

/// Service auth token command executor.
pub struct ServiceAuthTokenCommand<'a, G> {
    ctx: &'a Context<G>,
}

impl<'a, G: Gateway> ServiceAuthTokenCommand<'a, G> {
    /// Create a new service auth token command.
    #[must_use]
    pub const fn new(ctx: &'a Context<G>) -> Self {
        Self { ctx }
    }

    /// List every token.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails to load.
    pub async fn list<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        let tokens = self.ctx.auth_tokens.find_all().await?;
        let list = AuthTokenList {
            username: self.ctx.username().to_string(),
            tokens,
        };
        format.write(writer, &list)
    }

    /// Register a new token.
    ///
    /// # Errors
    ///
    /// Returns the API error if creation fails.
    pub async fn create<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &AuthTokenArgs,
    ) -> Result<(), CliError> {
        let token = ServiceAuthTokenFields {
            label: args.label.clone(),
            provider: args.provider.clone(),
            token: args.token.clone(),
            ..ServiceAuthTokenFields::default()
        };

        info!(label = %token.label, provider = %token.provider, "creating service auth token");
        self.ctx.auth_tokens.create(&token).await?;
        format.write(writer, &self.action("Creating"))
    }

    /// Replace the secret of an existing token.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no token has that label and provider, or the API
    /// error if the update fails.
    pub async fn update<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &AuthTokenArgs,
    ) -> Result<(), CliError> {
        let mut token = self
            .ctx
            .auth_tokens
            .find_by_label_and_provider(&args.label, &args.provider)
            .await?;
        token.token.clone_from(&args.token);

        info!(label = %token.label, provider = %token.provider, "updating service auth token");
        self.ctx.auth_tokens.update(&token).await?;
        format.write(writer, &self.action("Updating"))
    }

    /// Delete a token, asking for confirmation through `prompter` unless
    /// `force`.
    ///
    /// A token that does not exist is reported as a warning and is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns the API error if the lookup or delete fails for any reason
    /// other than the token not existing.
    pub async fn delete<W, R, E>(
        &self,
        writer: &mut W,
        prompter: &mut Prompter<R, E>,
        format: &OutputFormat,
        label: &str,
        provider: &str,
        force: bool,
    ) -> Result<(), CliError>
    where
        W: Write,
        R: BufRead,
        E: Write,
    {
        let question = format!("Really delete service auth token {label} {provider}?");
        if !force && !prompter.confirm(&question)? {
            return Ok(());
        }

        let result = match self.ctx.auth_tokens.find_by_label_and_provider(label, provider).await {
            Ok(token) => {
                info!(label, provider, "deleting service auth token");
                self.ctx.auth_tokens.delete(&token).await?;
                self.action("Deleting")
            }
            Err(e) if e.is_not_found() => {
                warn!(label, provider, "service auth token does not exist");
                self.action("Deleting")
                    .with_warning(format!("Service Auth Token {label} {provider} does not exist."))
            }
            Err(e) => return Err(e.into()),
        };
        format.write(writer, &result)
    }

    fn action(&self, verb: &str) -> ActionResult {
        ActionResult::ok(format!("{verb} service auth token as {}...", self.ctx.username()))
    }
}
