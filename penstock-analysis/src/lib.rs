//! Workspace analysis for penstock: record classification, the cross-document
//! identity index, structural validation, workspace scanning and completion
//! candidates.
//!
//! A penstock workspace holds JSON record definitions in two well-known
//! directories: `pipes/` and `systems/`. Every record declares its identity
//! in an `_id` field, and that identity must be unique across the whole
//! workspace. This crate keeps a live index of declared identities (and, for
//! pipes, the sink dataset each one writes to), validates individual
//! documents against the structural rules, and reports problems as findings
//! located by byte offsets, ready for an editor to render.
//!
//! Everything here is transport-agnostic: the language server crate owns the
//! protocol conversion, this crate owns the semantics. Parsing is consumed
//! through the [`parser::DocumentParser`] trait so tests can substitute
//! fakes, and so the "lenient for bulk indexing, strict for live
//! validation" split stays an explicit choice.

pub mod completion;
pub mod index;
pub mod parser;
pub mod record;
pub mod validation;
pub mod workspace;

pub use completion::{completion_items, CompletionCandidate};
pub use index::{IdentityIndex, IndexEntry};
pub use parser::{DocumentParser, JsonParser};
pub use record::{record_type, RecordType, RECORD_DIRECTORIES};
pub use validation::{validate, Finding};
pub use workspace::{scan_workspace, ScanSummary};
