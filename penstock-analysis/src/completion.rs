//! Completion candidates for record documents.
//!
//! Candidates are semantic: the server translates them into protocol
//! completion items. The static set covers the root keys every record
//! carries; on top of that, pipe documents get one candidate per sink
//! dataset the index currently knows about, which is the main thing an
//! author reaches for when wiring one pipe to another's output.

use lsp_types::CompletionItemKind;
use once_cell::sync::Lazy;

use crate::index::IdentityIndex;
use crate::record::RecordType;

/// One completion candidate, independent of the wire protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub label: String,
    pub detail: Option<String>,
    pub kind: CompletionItemKind,
    pub insert_text: Option<String>,
}

impl CompletionCandidate {
    fn new(label: impl Into<String>, kind: CompletionItemKind) -> Self {
        Self {
            label: label.into(),
            detail: None,
            kind,
            insert_text: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = Some(text.into());
        self
    }
}

static ROOT_KEY_CANDIDATES: Lazy<Vec<CompletionCandidate>> = Lazy::new(|| {
    vec![
        CompletionCandidate::new("\"_id\"", CompletionItemKind::PROPERTY)
            .with_detail("Unique identifier of the record")
            .with_insert_text("\"_id\": \"$1\""),
        CompletionCandidate::new("\"name\"", CompletionItemKind::PROPERTY)
            .with_detail("Name of the item")
            .with_insert_text("\"name\": \"$1\""),
        CompletionCandidate::new("\"version\"", CompletionItemKind::PROPERTY)
            .with_detail("Version of the item")
            .with_insert_text("\"version\": \"$1\""),
    ]
});

/// Completion candidates for a document of the given record type.
pub fn completion_items(
    index: &IdentityIndex,
    record_type: RecordType,
    include_datasets: bool,
) -> Vec<CompletionCandidate> {
    let mut items = ROOT_KEY_CANDIDATES.clone();
    if include_datasets && record_type == RecordType::Pipe {
        for dataset in index.datasets() {
            items.push(
                CompletionCandidate::new(format!("\"{dataset}\""), CompletionItemKind::VALUE)
                    .with_detail("sink dataset"),
            );
        }
    }
    items
}
