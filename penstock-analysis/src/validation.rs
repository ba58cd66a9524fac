//! Structural validation of a single document.
//!
//! Validation always records the parsed document in the index first, so the
//! index reflects the latest revision of every URI, then cross-checks the
//! document against the structural rules:
//!
//!     - pipe and system records must be JSON objects
//!     - records should declare an `_id`
//!     - `_id` must be a string
//!     - `_id` must be unique across the workspace
//!
//! Findings are computed fresh on every call; the caller publishes the full
//! set and thereby replaces whatever was reported before. Documents that are
//! neither pipes nor systems are inert: they are indexed (as `Unknown`) but
//! never produce findings. Malformed JSON produces no findings at all —
//! syntax errors belong to a dedicated checker, not this validator.

use std::ops::Range;

use lsp_types::DiagnosticSeverity;
use url::Url;

use crate::index::IdentityIndex;
use crate::parser::DocumentParser;
use crate::record::{record_type, RecordType};

/// One structural finding, located by byte offsets into the validated text.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub severity: DiagnosticSeverity,
    pub span: Range<usize>,
    pub message: String,
}

/// Validate `text` as the current content of `uri`, updating the index as a
/// side effect. An empty result means the document is clean.
pub fn validate<P: DocumentParser>(
    parser: &P,
    index: &mut IdentityIndex,
    uri: &Url,
    text: &str,
) -> Vec<Finding> {
    let Ok(parsed) = parser.parse_with_pointers(text) else {
        // Not valid JSON: nothing to report here, and the index keeps the
        // last good revision of this document.
        return Vec::new();
    };

    index.record_document(uri, &parsed.tree);

    let record_type = record_type(uri);
    if record_type == RecordType::Unknown {
        return Vec::new();
    }

    let whole_document = 0..text.len();
    let Some(object) = parsed.tree.as_object() else {
        return vec![Finding {
            severity: DiagnosticSeverity::ERROR,
            span: whole_document,
            message: format!("{record_type}: must be an Object."),
        }];
    };

    let Some(id) = object.get("_id") else {
        return vec![Finding {
            severity: DiagnosticSeverity::WARNING,
            span: whole_document,
            message: format!("{record_type}: missing \"_id\" field."),
        }];
    };

    let id_span = parsed
        .pointers
        .get("/_id")
        .map(|entry| entry.value.clone())
        .unwrap_or(whole_document);

    if !id.is_string() {
        return vec![Finding {
            severity: DiagnosticSeverity::WARNING,
            span: id_span,
            message: format!("{record_type}: \"_id\" field must be type string."),
        }];
    }

    let conflicts = index.find_id_conflicts(id, uri);
    if conflicts.is_empty() {
        return Vec::new();
    }
    let uris: Vec<&str> = conflicts.iter().map(Url::as_str).collect();
    vec![Finding {
        severity: DiagnosticSeverity::WARNING,
        span: id_span,
        message: format!(
            "{record_type}: must have a unique \"_id\" field, already defined in: {}",
            uris.join(",")
        ),
    }]
}
