//! JSON-Pointer keyed source-offset map.
//!
//! The strict parser can record, for every node in the tree, where that node
//! came from in the source text: the span of the member key (when the node is
//! an object member) and the span of the value itself. Entries are keyed by
//! the node's JSON-Pointer path (RFC 6901), so a validator can ask for
//! `"/_id"` and highlight exactly the `_id` value in the editor.

use std::collections::HashMap;
use std::ops::Range;

/// Four-corner source offsets for one JSON node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEntry {
    /// Span of the member key token including its quotes. Absent for the
    /// root value and for array elements.
    pub key: Option<Range<usize>>,
    /// Span of the value: the full token for scalars (string quotes
    /// included), opening through closing bracket for containers.
    pub value: Range<usize>,
}

/// Mapping from JSON-Pointer paths to source offsets.
///
/// The root value lives at the empty pointer `""`. Duplicate object keys
/// overwrite their entry, matching the last-wins semantics of the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerMap {
    entries: HashMap<String, PointerEntry>,
}

impl PointerMap {
    /// Look up the entry for a pointer path such as `"/_id"` or `"/a/0"`.
    pub fn get(&self, pointer: &str) -> Option<&PointerEntry> {
        self.entries.get(pointer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, pointer: String, entry: PointerEntry) {
        self.entries.insert(pointer, entry);
    }
}

/// Escape one reference token per RFC 6901: `~` becomes `~0`, `/` becomes
/// `~1`.
pub fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_tilde_before_slash() {
        assert_eq!(escape_token("plain"), "plain");
        assert_eq!(escape_token("a/b"), "a~1b");
        assert_eq!(escape_token("t~"), "t~0");
        assert_eq!(escape_token("~/"), "~0~1");
    }

    #[test]
    fn insert_overwrites_existing_pointer() {
        let mut map = PointerMap::default();
        map.insert(
            "/a".to_string(),
            PointerEntry {
                key: None,
                value: 0..1,
            },
        );
        map.insert(
            "/a".to_string(),
            PointerEntry {
                key: Some(2..5),
                value: 7..9,
            },
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("/a").unwrap().value, 7..9);
    }
}
