//! Flat diagnostics with line/column ranges.

use crate::analysis::AnalyzedFile;
use mudz_common::{Diagnostic, Range};
use serde::Serialize;

/// A diagnostic together with its line/column range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocatedDiagnostic {
    pub diagnostic: Diagnostic,
    pub range: Range,
}

/// One diagnostic per sentinel node and per missing punctuation, in source
/// order.
pub fn collect_diagnostics(file: &AnalyzedFile) -> Vec<LocatedDiagnostic> {
    let mut out: Vec<LocatedDiagnostic> = file
        .parse_diagnostics
        .iter()
        .map(|parse| {
            let diagnostic = Diagnostic::error(
                &*file.file_name,
                parse.start,
                parse.length,
                parse.message.as_str(),
            );
            let range = file
                .line_map
                .range(parse.start, diagnostic.end(), &file.source);
            LocatedDiagnostic { diagnostic, range }
        })
        .collect();
    out.sort_by_key(|located| (located.diagnostic.start, located.diagnostic.length));
    out
}
