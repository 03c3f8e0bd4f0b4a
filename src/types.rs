//! Shared data model: directives, issues, and the result of one resolution run.
//!
//! Everything here is `Serialize` so the editor-integration layer can ship
//! directives and diagnostics across a process boundary as JSON without
//! re-describing them.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// What a directive does to its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DirectiveKind {
    /// Sets the key to a value (`KEY=value`, or a bare `KEY`).
    Inclusion,
    /// Removes/negates the key (`-KEY`, no `=`).
    Exclusion,
}

/// One semantically meaningful configuration line after import expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    /// File the line is physically written in — never the importing file.
    pub source_file: PathBuf,
    /// 1-based line number within `source_file`.
    pub source_line: usize,
    /// Import distance from the root document: 0 for the root's own lines,
    /// N+1 for lines found inside a file imported N levels below it.
    pub depth: u32,
    pub kind: DirectiveKind,
    pub key: String,
    /// Substring after the first `=`, or empty if the line has none.
    pub value: String,
    /// The trimmed original line text, kept for exact-duplicate detection.
    pub raw: String,
}

/// The full result of expanding one root document.
///
/// Rebuilt from scratch on every resolution request — there is no caching
/// across edits, and the caller owns the whole thing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Flattened directive stream in document order (imports spliced in place).
    pub directives: Vec<Directive>,
    /// Structural findings from the expansion itself: missing imports, cycles.
    pub issues: Vec<Issue>,
}

/// Categories of analyzer and resolver findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    /// An inherited key was re-included without a prior same-file exclusion.
    RedefinedWithoutExclusion,
    /// A sanctioned override re-asserts the exact value it just excluded.
    UnnecessaryRedefinition,
    /// The same trimmed line text occurs more than once in the resolved stream.
    DuplicateLine,
    /// An import directive names a file that does not exist.
    MissingImport,
    /// An import re-enters a file that is still being expanded.
    CyclicImport,
}

impl IssueKind {
    /// The fixed severity of this category.
    pub fn severity(self) -> Severity {
        match self {
            IssueKind::RedefinedWithoutExclusion | IssueKind::CyclicImport => Severity::Error,
            IssueKind::UnnecessaryRedefinition | IssueKind::DuplicateLine => Severity::Warning,
            IssueKind::MissingImport => Severity::Hint,
        }
    }
}

/// How loudly a finding should be surfaced. Ordered: `Hint < Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hint,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hint => write!(f, "hint"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A finding, anchored to the line that triggered it.
///
/// The anchor is always the offending line's own file — a conflict with an
/// ancestor cites the ancestor in `message` but is anchored where the
/// override happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    /// File the issue is anchored to.
    pub file: PathBuf,
    /// 1-based line within `file`.
    pub line: usize,
    /// The configuration key involved, when the finding is per-key. Used by
    /// the diagnostic mapper to combine findings for the same key.
    pub key: Option<String>,
}

impl Issue {
    /// Build an issue, deriving its severity from the kind.
    pub fn new(
        kind: IssueKind,
        message: impl Into<String>,
        file: impl Into<PathBuf>,
        line: usize,
        key: Option<String>,
    ) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            message: message.into(),
            file: file.into(),
            line,
            key,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}:{}: {}",
            self.severity,
            self.file.display(),
            self.line,
            self.message
        )
    }
}
