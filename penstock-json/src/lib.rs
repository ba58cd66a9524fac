//! JSON parsing and canonical formatting for penstock workspaces.
//!
//! This crate provides the two text-level capabilities the rest of the
//! toolchain is built on:
//!
//!     1. Parsing. A logos-based lexer feeds a recursive-descent parser that
//!        produces a `serde_json::Value` tree. The strict entry points reject
//!        anything outside the JSON grammar and can record a JSON-Pointer to
//!        source-offset map for every node, so diagnostics can highlight the
//!        exact key or value they refer to. The lenient entry point tolerates
//!        comments and trailing commas and is used where precise ranges are
//!        not needed (bulk workspace indexing).
//!
//!     2. Canonical formatting. `format` renders any valid JSON document in
//!        a single canonical shape: object keys sorted lexicographically,
//!        two-space indentation, and a fixed newline placement driven by an
//!        explicit lexical state machine. The output is deterministic and
//!        idempotent, so two documents with the same logical content format
//!        identically regardless of their original key order or whitespace.
//!
//! Strict and lenient parsing are deliberately separate functions rather than
//! a flag on one entry point; callers choose a tolerance policy explicitly
//! and tests can exercise each policy in isolation.

pub mod error;
pub mod formatting;
pub mod lexing;
pub mod location;
pub mod parsing;
pub mod pointer;
pub mod tokens;

pub use error::ParseError;
pub use formatting::format;
pub use location::{Position, SourceLocation};
pub use parsing::{parse, parse_lenient, parse_with_pointers, ParsedDocument};
pub use pointer::{PointerEntry, PointerMap};
