//! Minimal text edits for document formatting.
//!
//! The canonical formatter produces a whole new document; replacing the
//! entire buffer on every format request would throw away cursor positions
//! and flood the undo stack. Instead the formatted text is line-diffed
//! against the original and only the changed regions are sent as edits.

use similar::{Algorithm, ChangeTag, TextDiff};

/// Text edit expressed as byte offsets over the original document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditSpan {
    pub start: usize,
    pub end: usize,
    pub new_text: String,
}

/// Compute a minimal set of line-based edits that turn `original` into
/// `formatted`. Empty when the texts already match.
pub fn minimal_edits(original: &str, formatted: &str) -> Vec<TextEditSpan> {
    if original == formatted {
        return Vec::new();
    }

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_lines(original, formatted);

    let mut edits: Vec<TextEditSpan> = Vec::new();
    let mut pending: Option<TextEditSpan> = None;
    // Byte offset into the original text; only old-side changes advance it.
    let mut cursor = 0usize;

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => {
                if let Some(edit) = pending.take() {
                    edits.push(edit);
                }
                cursor += change.value().len();
            }
            ChangeTag::Delete => {
                let len = change.value().len();
                let edit = pending.get_or_insert_with(|| TextEditSpan {
                    start: cursor,
                    end: cursor,
                    new_text: String::new(),
                });
                edit.end = cursor + len;
                cursor += len;
            }
            ChangeTag::Insert => {
                let edit = pending.get_or_insert_with(|| TextEditSpan {
                    start: cursor,
                    end: cursor,
                    new_text: String::new(),
                });
                edit.new_text.push_str(change.value());
            }
        }
    }

    if let Some(edit) = pending.take() {
        edits.push(edit);
    }
    edits
}
