//! Resolver and override analyzer for hierarchical metaconfig files. Point it
//! at a root document, get back the flattened configuration — or a list of
//! structured issues anchored to `(file, line)`.
//!
//! ```ignore
//! let mc = Metaconf::builder()
//!     .imports_dir("/proj/metaconfig")
//!     .build()?;
//!
//! let resolution = mc.resolve("/proj/board-a.mconf")?;
//! let issues = mc.analyze("/proj/board-a.mconf")?;
//! ```
//!
//! # The file format
//!
//! A metaconfig file is plain text, one directive per line, with a
//! leading-character grammar:
//!
//! ```text
//! !chip-esp32             import: splice in metaconfig/chip-esp32.mconf
//! CONFIG_UART_BAUD=115200 inclusion: set a key
//! CONFIG_BARE             inclusion with an empty value
//! -CONFIG_ADC_ENABLE      exclusion: remove/negate an inherited key
//! ```
//!
//! Files form an inheritance hierarchy through imports — typically chip
//! family → chip variant → board → product — with each level importing the
//! more generic one and adjusting a handful of settings.
//!
//! # Resolution
//!
//! [`Metaconf::resolve`] expands imports depth-first, splicing each imported
//! file's directives in at the position of its import line. Every resulting
//! [`Directive`] is tagged with the file it physically lives in, its 1-based
//! line there, and its inheritance depth (0 = the root document, N+1 = found
//! N import hops below it). Import targets are looked up in a single,
//! explicitly configured imports directory — `<dir>/<name>.<ext>` first, bare
//! `<dir>/<name>` as a fallback — never relative to the importing file.
//!
//! Resolution is deliberately forgiving: a missing import becomes a
//! [`MissingImport`](IssueKind::MissingImport) hint rather than an error, so
//! one absent ancestor never blocks editing the current file, and an import
//! cycle is cut at the re-entering edge with a
//! [`CyclicImport`](IssueKind::CyclicImport) issue while sibling branches
//! still resolve. Only real I/O failures abort a run.
//!
//! # The override discipline
//!
//! The analyzer enforces one rule: **changing an inherited setting requires
//! excluding it first, in the same file.**
//!
//! ```text
//! # metaconfig/chip-esp32.mconf
//! CONFIG_ADC_CAL_LUT_ENABLE=y
//!
//! # board-a.mconf
//! !chip-esp32
//! -CONFIG_ADC_CAL_LUT_ENABLE
//! CONFIG_ADC_CAL_LUT_ENABLE=n     ← sanctioned override
//! ```
//!
//! Dropping the exclusion line turns this into a
//! [`RedefinedWithoutExclusion`](IssueKind::RedefinedWithoutExclusion) error
//! citing both locations; keeping the exclusion but re-asserting the
//! inherited value (`=y`) is an
//! [`UnnecessaryRedefinition`](IssueKind::UnnecessaryRedefinition) — a no-op,
//! usually a copy-paste leftover. [`Metaconf::analyze`] runs the full
//! pipeline: resolve, sort the stream so the deepest (most generic) ancestors
//! are considered first, and walk it once with per-key history.
//! [`Metaconf::duplicate_lines`] is the simpler fallback mode — verbatim
//! [`DuplicateLine`](IssueKind::DuplicateLine) detection over the same
//! flattened stream, independent of key/value structure.
//!
//! All findings are non-fatal, user-visible diagnostics — never errors — and
//! every run produces a best-effort stream even in their presence.
//!
//! # Editor integration
//!
//! The core has no editor dependency; it exposes the pieces an integration
//! layer needs:
//!
//! - [`map_to_document`] projects issues onto the one document the user has
//!   open, grouping findings per key and anchoring them to physical line
//!   ranges. Issues anchored in ancestor files are not shown on a descendant.
//! - [`DiagnosticRegistry`] stores published diagnostics per document, gated
//!   by a monotonically increasing document version so a slow resolution run
//!   for a stale revision can never overwrite fresher results.
//! - [`Metaconf::locate_import_target`] is the extension-fallback lookup,
//!   exposed so jump-to-import does not duplicate it.
//!
//! Directives, issues, and line diagnostics are all `Serialize`, so they can
//! be handed to an editor process as JSON directly.
//!
//! # Clap adapter
//!
//! The `cli` module (behind the `clap` feature, on by default) provides
//! [`CheckArgs`] — a clap derive type giving a host application `check` and
//! `resolve` subcommands with `--format text|json` — bridged to the core via
//! [`CheckArgs::into_action()`]. To use metaconf without clap:
//!
//! ```toml
//! metaconf = { version = "...", default-features = false }
//! ```
//!
//! # Error handling
//!
//! Fallible operations return [`MetaconfError`]. The set is small on purpose:
//! an unreadable file (with its path) and a missing builder prerequisite.
//! Everything diagnostic-shaped flows through [`Issue`] instead.

pub mod error;
pub mod types;

mod analyze;
mod builder;
#[cfg(feature = "clap")]
mod cli;
mod diagnostics;
mod line;
mod order;
mod resolve;

#[cfg(test)]
mod fixtures;

pub use analyze::{analyze_overrides, find_duplicate_lines};
pub use builder::{Metaconf, MetaconfBuilder};
#[cfg(feature = "clap")]
pub use cli::{
    CheckAction, CheckArgs, CheckSubcommand, OutputFormat, render_directives, render_issues,
};
pub use diagnostics::{DiagnosticRegistry, LineDiagnostic, map_to_document};
pub use error::MetaconfError;
pub use line::{RawLine, classify, key_of};
pub use order::sort_for_analysis;
pub use resolve::{DEFAULT_EXTENSION, Resolver};
pub use types::{Directive, DirectiveKind, Issue, IssueKind, Resolution, Severity};
