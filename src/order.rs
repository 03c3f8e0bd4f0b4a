//! Precedence ordering for override analysis.
//!
//! Deeper imports are more generic ancestors (chip family → chip variant →
//! board → product): their settings establish the baseline, and shallower
//! files are validated afterward as overrides. So the analyzer wants depth
//! **descending** first, then source line ascending within equal depth. The
//! source file is a deterministic tertiary tie-break so two files sharing a
//! depth and line number always order the same way across runs.

use std::cmp::Reverse;

use crate::types::Directive;

/// Sort a flattened directive stream into analysis order: depth descending
/// (base-most ancestors first), then source line ascending, then source file.
pub fn sort_for_analysis(directives: &mut [Directive]) {
    directives.sort_by(|a, b| {
        (Reverse(a.depth), a.source_line, &a.source_file).cmp(&(
            Reverse(b.depth),
            b.source_line,
            &b.source_file,
        ))
    });
}
