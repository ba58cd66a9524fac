//! Initial workspace scan.
//!
//! Seeds the identity index from the record directories under a workspace
//! root. The scan is a strictly sequential loop, tolerant per entry: an
//! unreadable file or a parse failure skips that file and the scan carries
//! on — a half-indexed workspace is better than no index, and live
//! validation repairs individual entries as documents are opened.

use std::path::Path;

use ignore::WalkBuilder;
use url::Url;

use crate::index::IdentityIndex;
use crate::parser::DocumentParser;
use crate::record::RECORD_DIRECTORIES;

/// Outcome counts for one workspace scan, for the server log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Documents parsed and recorded in the index.
    pub indexed: usize,
    /// Entries skipped: unreadable, unparseable, or not addressable as a
    /// file URL.
    pub skipped: usize,
}

/// Scan `<root>/pipes` and `<root>/systems` for `.json` files and record
/// each one in the index. Missing directories are fine; files in nested
/// subdirectories are not record definitions and are left alone.
pub fn scan_workspace<P: DocumentParser>(
    parser: &P,
    index: &mut IdentityIndex,
    root: &Path,
) -> ScanSummary {
    let mut summary = ScanSummary::default();
    for directory in RECORD_DIRECTORIES {
        let dir = root.join(directory);
        if !dir.is_dir() {
            continue;
        }
        // Standard filters stay off: record directories are data, and
        // whether they are git-tracked must not change what gets indexed.
        let walk = WalkBuilder::new(&dir)
            .max_depth(Some(1))
            .standard_filters(false)
            .build();
        for entry in walk {
            let Ok(entry) = entry else {
                summary.skipped += 1;
                continue;
            };
            if !entry.file_type().map(|kind| kind.is_file()).unwrap_or(false) {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Ok(text) = std::fs::read_to_string(path) else {
                summary.skipped += 1;
                continue;
            };
            let Ok(value) = parser.parse_lenient(&text) else {
                summary.skipped += 1;
                continue;
            };
            let Ok(uri) = Url::from_file_path(path) else {
                summary.skipped += 1;
                continue;
            };
            index.record_document(&uri, &value);
            summary.indexed += 1;
        }
    }
    summary
}
