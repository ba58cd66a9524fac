//! Parse capabilities consumed by the analysis layer.
//!
//! Validation needs a strict parser that reports source offsets per node;
//! bulk indexing needs a lenient parser that copes with hand-edited files.
//! Both are injected through one trait so the pairing is explicit and tests
//! can substitute fakes for either capability.

use penstock_json::{ParseError, ParsedDocument};
use serde_json::Value;

/// The two parse capabilities the analysis layer depends on.
pub trait DocumentParser: Send + Sync {
    /// Strict parse with a JSON-Pointer offset map, for live validation.
    fn parse_with_pointers(&self, text: &str) -> Result<ParsedDocument, ParseError>;

    /// Lenient parse (comments, trailing commas), for workspace indexing.
    /// Must fail cleanly on anything worse; no ranges are produced.
    fn parse_lenient(&self, text: &str) -> Result<Value, ParseError>;
}

/// Production parser backed by penstock-json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl DocumentParser for JsonParser {
    fn parse_with_pointers(&self, text: &str) -> Result<ParsedDocument, ParseError> {
        penstock_json::parse_with_pointers(text)
    }

    fn parse_lenient(&self, text: &str) -> Result<Value, ParseError> {
        penstock_json::parse_lenient(text)
    }
}
