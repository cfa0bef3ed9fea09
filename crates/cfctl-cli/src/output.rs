//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats, plus the
//! interactive prompt kept apart from both.

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Outcome of a mutating command.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// What was done, e.g. "Creating quota gold as admin...".
    pub message: String,
    /// Non-fatal remark shown after the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ActionResult {
    /// A successful action.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            warning: None,
        }
    }

    /// Attach a warning.
    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}

impl TableDisplay for ActionResult {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.message)?;
        writeln!(writer, "{}", if self.success { "OK" } else { "FAILED" })?;
        if let Some(ref warning) = self.warning {
            writeln!(writer)?;
            writeln!(writer, "{warning}")?;
        }
        Ok(())
    }
}

/// Width of a table column holding `header` and every value in full.
pub(crate) fn column_width<'a>(header: &str, values: impl IntoIterator<Item = &'a str>) -> usize {
    values
        .into_iter()
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or_default()
}

/// Yes/no questions asked on a channel separate from command output.
///
/// The binary reads answers from stdin and writes prompts to stderr, so a
/// `--format json` stdout stays parseable.
pub struct Prompter<R, E> {
    input: R,
    prompt: E,
}

impl<R: BufRead, E: Write> Prompter<R, E> {
    /// Create a prompter reading from `input` and asking on `prompt`.
    pub const fn new(input: R, prompt: E) -> Self {
        Self { input, prompt }
    }

    /// Ask `question`; anything but `y` or `yes` is a no, as is end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be written or the answer read.
    pub fn confirm(&mut self, question: &str) -> Result<bool, CliError> {
        write!(self.prompt, "{question}> ")?;
        self.prompt.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        let answer = answer.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    #[cfg(test)]
    pub(crate) const fn prompt(&self) -> &E {
        &self.prompt
    }
}
