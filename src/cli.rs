//! Clap adapter for metaconf.
//!
//! This module is the **optional integration layer** between metaconf's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`CheckArgs`] embeds into a host application's clap derive and maps, via
//! [`CheckArgs::into_action()`], onto a plain [`CheckAction`] the clap-free
//! core can serve. The rendering helpers turn core results into terminal text
//! or JSON — nothing here contains resolution or analysis logic.
//!
//! If you use a different CLI parser (or none), skip this module and construct
//! [`CheckAction`] values directly.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::types::{Directive, Issue};

/// Output encoding for `check`/`resolve` results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One finding or directive per line, for terminals.
    Text,
    /// A JSON array, for editor integrations.
    Json,
}

/// Clap-derived args for the metaconfig subcommand group.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Metaconf(CheckArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Output format (default: text).
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub action: CheckSubcommand,
}

/// Available metaconfig subcommands.
#[derive(Debug, Subcommand)]
pub enum CheckSubcommand {
    /// Analyze a metaconfig file and report inheritance issues.
    Check {
        /// The root metaconfig document.
        file: PathBuf,
    },
    /// Print the flattened directive stream for a metaconfig file.
    Resolve {
        /// The root metaconfig document.
        file: PathBuf,
    },
}

/// A metaconfig operation, independent of any CLI framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckAction {
    Check { file: PathBuf, format: OutputFormat },
    Resolve { file: PathBuf, format: OutputFormat },
}

impl CheckArgs {
    /// Convert clap-parsed args into a framework-agnostic `CheckAction`.
    /// An omitted `--format` means text output.
    pub fn into_action(self) -> CheckAction {
        let format = self.format.unwrap_or(OutputFormat::Text);
        match self.action {
            CheckSubcommand::Check { file } => CheckAction::Check { file, format },
            CheckSubcommand::Resolve { file } => CheckAction::Resolve { file, format },
        }
    }
}

/// Render analysis findings for output.
///
/// Text mode prints one finding per line in the issue's own
/// `severity: file:line: message` form; JSON mode emits the full structured
/// issue list.
pub fn render_issues(issues: &[Issue], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => issues
            .iter()
            .map(Issue::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(issues).expect("metaconf: issues serialize to JSON")
        }
    }
}

/// Render a flattened directive stream for output.
///
/// Text mode shows provenance per line: `depth file:line: raw-text`.
pub fn render_directives(directives: &[Directive], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => directives
            .iter()
            .map(|d| {
                format!(
                    "{} {}:{}: {}",
                    d.depth,
                    d.source_file.display(),
                    d.source_line,
                    d.raw
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(directives).expect("metaconf: directives serialize to JSON")
        }
    }
}
