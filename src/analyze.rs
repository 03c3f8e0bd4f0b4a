//! Override discipline analysis over a precedence-sorted directive stream.
//!
//! The rule being enforced: a setting inherited from a base file may only be
//! changed by an overriding file if that file first explicitly excludes it
//! (`-KEY` before `KEY=new`). Silently shadowing an inherited value is treated
//! as a likely mistake — two ancestors, or an ancestor and the leaf,
//! disagreeing without an explicit acknowledgment.
//!
//! The analyzer walks the stream once, left to right, keeping a per-key
//! history of everything seen so far. All findings are non-fatal diagnostics;
//! the walk never stops early and every directive is appended to its key's
//! history regardless of outcome.
//!
//! [`find_duplicate_lines`] is the simpler fallback mode: verbatim text
//! duplication across the fully flattened stream, independent of key/value
//! structure.

use std::collections::HashMap;

use crate::types::{Directive, DirectiveKind, Issue, IssueKind};

/// Walk a precedence-sorted stream and report override violations.
///
/// For each `Inclusion` whose key already has an earlier `Inclusion` in
/// history:
///
/// - if history holds an `Exclusion` from the *same file* as the current
///   directive, the override is sanctioned; re-asserting the exact value of
///   the last inclusion is then flagged as
///   [`UnnecessaryRedefinition`](IssueKind::UnnecessaryRedefinition) — the
///   exclude/re-include pair is a no-op, likely a copy-paste leftover;
/// - otherwise the redefinition is unsanctioned:
///   [`RedefinedWithoutExclusion`](IssueKind::RedefinedWithoutExclusion),
///   citing both the inherited and the new location.
///
/// Exclusions never raise issues themselves; they only populate history so
/// later inclusions can see them.
pub fn analyze_overrides(sorted: &[Directive]) -> Vec<Issue> {
    let mut history: HashMap<&str, Vec<&Directive>> = HashMap::new();
    let mut issues = Vec::new();

    for directive in sorted {
        let entries = history.entry(directive.key.as_str()).or_default();

        if directive.kind == DirectiveKind::Inclusion
            && let Some(last_inclusion) = entries
                .iter()
                .rev()
                .find(|e| e.kind == DirectiveKind::Inclusion)
        {
            let sanctioned = entries.iter().any(|e| {
                e.kind == DirectiveKind::Exclusion && e.source_file == directive.source_file
            });

            if !sanctioned {
                issues.push(Issue::new(
                    IssueKind::RedefinedWithoutExclusion,
                    format!(
                        "'{key}' is already set to '{old}' by {old_file}:{old_line}; \
                         exclude it with '-{key}' before setting it to '{new}'",
                        key = directive.key,
                        old = last_inclusion.value,
                        old_file = last_inclusion.source_file.display(),
                        old_line = last_inclusion.source_line,
                        new = directive.value,
                    ),
                    directive.source_file.clone(),
                    directive.source_line,
                    Some(directive.key.clone()),
                ));
            } else if directive.value == last_inclusion.value {
                issues.push(Issue::new(
                    IssueKind::UnnecessaryRedefinition,
                    format!(
                        "'{key}' is re-included with the same value '{value}' it already \
                         has from {old_file}:{old_line}; the exclusion and re-inclusion \
                         are a no-op",
                        key = directive.key,
                        value = directive.value,
                        old_file = last_inclusion.source_file.display(),
                        old_line = last_inclusion.source_line,
                    ),
                    directive.source_file.clone(),
                    directive.source_line,
                    Some(directive.key.clone()),
                ));
            }
        }

        entries.push(directive);
    }

    issues
}

/// Flag every directive whose trimmed text occurs more than once in the
/// flattened stream. Catches verbatim copy-paste duplication even across
/// unrelated keys, including duplicates introduced via imports.
pub fn find_duplicate_lines(directives: &[Directive]) -> Vec<Issue> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for directive in directives {
        *counts.entry(directive.raw.as_str()).or_default() += 1;
    }

    directives
        .iter()
        .filter(|d| counts[d.raw.as_str()] > 1)
        .map(|d| {
            Issue::new(
                IssueKind::DuplicateLine,
                format!(
                    "Line '{}' appears {} times in the resolved stream",
                    d.raw,
                    counts[d.raw.as_str()]
                ),
                d.source_file.clone(),
                d.source_line,
                Some(d.key.clone()),
            )
        })
        .collect()
}
