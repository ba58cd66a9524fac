//! Record classification from document URIs.
//!
//! A document's record type is derived purely from the shape of its path:
//! files directly under a `pipes/` directory are pipe definitions, files
//! under `systems/` are system definitions, everything else is unknown.
//! Content plays no part in classification.

use std::fmt;
use std::path::Path;

use url::Url;

pub const PIPES_DIRECTORY: &str = "pipes";
pub const SYSTEMS_DIRECTORY: &str = "systems";

/// Workspace subdirectories that hold record definitions, in scan order.
pub const RECORD_DIRECTORIES: [&str; 2] = [PIPES_DIRECTORY, SYSTEMS_DIRECTORY];

/// Kind of record a document holds, per its containing directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Pipe,
    System,
    Unknown,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Pipe => write!(f, "Pipe"),
            RecordType::System => write!(f, "System"),
            RecordType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Classify a document URI by the base name of its parent directory.
pub fn record_type(uri: &Url) -> RecordType {
    let parent = Path::new(uri.path())
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str());
    match parent {
        Some(PIPES_DIRECTORY) => RecordType::Pipe,
        Some(SYSTEMS_DIRECTORY) => RecordType::System,
        _ => RecordType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn uri(path: &str) -> Url {
        Url::parse(&format!("file://{path}")).unwrap()
    }

    #[rstest]
    #[case("/workspace/pipes/events.json", RecordType::Pipe)]
    #[case("/workspace/systems/crm.json", RecordType::System)]
    #[case("/deep/nested/workspace/pipes/a.json", RecordType::Pipe)]
    #[case("/workspace/other/events.json", RecordType::Unknown)]
    #[case("/workspace/pipes/nested/events.json", RecordType::Unknown)]
    #[case("/pipes.json", RecordType::Unknown)]
    #[case("/systems/crm.json", RecordType::System)]
    fn classifies_by_parent_directory(#[case] path: &str, #[case] expected: RecordType) {
        assert_eq!(record_type(&uri(path)), expected);
    }

    #[test]
    fn display_matches_diagnostic_prefixes() {
        assert_eq!(RecordType::Pipe.to_string(), "Pipe");
        assert_eq!(RecordType::System.to_string(), "System");
        assert_eq!(RecordType::Unknown.to_string(), "Unknown");
    }
}
