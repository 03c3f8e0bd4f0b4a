//! Projecting issues onto a single open document, and the version-gated
//! store the editor layer keeps them in.
//!
//! The analyzer anchors every issue to the file the offending line physically
//! lives in. When the user is looking at one document, only issues anchored
//! *there* are shown — a conflict involving an ancestor is annotated on the
//! overriding file's line, not surfaced while viewing the ancestor. Multiple
//! findings for the same key combine into one message attached to that key's
//! physical line range, found by re-deriving keys from the document text with
//! the parser's own extraction rule.
//!
//! [`DiagnosticRegistry`] addresses the stale-overwrite hazard of overlapping
//! resolution runs: each run is tagged with the document version captured when
//! it started, and publishing an older version than the one already stored is
//! rejected. Last writer *by version* wins, not last writer by completion
//! time. The registry is plain owned state for the editor layer to hold; the
//! core never touches globals.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::line;
use crate::types::{Issue, Severity};

/// A diagnostic attached to a physical line range of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiagnostic {
    /// 1-based first line of the range.
    pub start_line: usize,
    /// 1-based last line of the range, inclusive.
    pub end_line: usize,
    pub severity: Severity,
    pub message: String,
}

/// Grouping identity for issues within one document.
#[derive(PartialEq)]
enum GroupKey<'a> {
    Key(&'a str),
    Line(usize),
}

/// Project `issues` onto the document at `document_path`.
///
/// Issues anchored in other files are dropped. Remaining issues are grouped —
/// per-key findings by key, keyless findings by anchor line — and each group
/// becomes one [`LineDiagnostic`] spanning the key's occurrences in
/// `document_text`, carrying the combined messages at the group's highest
/// severity. Results are ordered by start line.
pub fn map_to_document(
    issues: &[Issue],
    document_path: &Path,
    document_text: &str,
) -> Vec<LineDiagnostic> {
    let local: Vec<&Issue> = issues.iter().filter(|i| i.file == document_path).collect();

    // Group in first-seen order so combined messages read in analysis order.
    let mut groups: Vec<(GroupKey, Vec<&Issue>)> = Vec::new();
    for issue in local {
        let group_key = match &issue.key {
            Some(key) => GroupKey::Key(key.as_str()),
            None => GroupKey::Line(issue.line),
        };
        match groups.iter_mut().find(|(g, _)| *g == group_key) {
            Some((_, members)) => members.push(issue),
            None => groups.push((group_key, vec![issue])),
        }
    }

    let mut diagnostics: Vec<LineDiagnostic> = groups
        .into_iter()
        .map(|(group_key, members)| {
            let (start_line, end_line) = match group_key {
                GroupKey::Line(line) => (line, line),
                GroupKey::Key(key) => key_line_range(document_text, key)
                    .unwrap_or_else(|| (members[0].line, members[0].line)),
            };
            let severity = members
                .iter()
                .map(|i| i.severity)
                .max()
                .unwrap_or(Severity::Hint);
            let message = members
                .iter()
                .map(|i| i.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            LineDiagnostic {
                start_line,
                end_line,
                severity,
                message,
            }
        })
        .collect();

    diagnostics.sort_by_key(|d| d.start_line);
    diagnostics
}

/// The 1-based range of lines in `text` whose extracted key equals `key`,
/// or `None` when the key does not occur.
fn key_line_range(text: &str, key: &str) -> Option<(usize, usize)> {
    let mut range: Option<(usize, usize)> = None;
    for (index, line_text) in text.lines().enumerate() {
        if line::key_of(line_text).as_deref() == Some(key) {
            let line = index + 1;
            range = Some(match range {
                Some((start, _)) => (start, line),
                None => (line, line),
            });
        }
    }
    range
}

/// Per-document diagnostic store with monotonic version gating.
#[derive(Debug, Default)]
pub struct DiagnosticRegistry {
    documents: HashMap<PathBuf, (u64, Vec<LineDiagnostic>)>,
}

impl DiagnosticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store diagnostics for a document at the given version.
    ///
    /// Returns `false` — storing nothing — when `version` is older than the
    /// version already published for this document. Republishing the same
    /// version overwrites.
    pub fn publish(
        &mut self,
        document: impl Into<PathBuf>,
        version: u64,
        diagnostics: Vec<LineDiagnostic>,
    ) -> bool {
        let document = document.into();
        if let Some((current, _)) = self.documents.get(&document)
            && *current > version
        {
            return false;
        }
        self.documents.insert(document, (version, diagnostics));
        true
    }

    /// The currently published diagnostics for a document, if any.
    pub fn get(&self, document: &Path) -> Option<&[LineDiagnostic]> {
        self.documents
            .get(document)
            .map(|(_, diags)| diags.as_slice())
    }

    /// Drop a document's diagnostics entirely (e.g. on close).
    pub fn remove(&mut self, document: &Path) {
        self.documents.remove(document);
    }
}
