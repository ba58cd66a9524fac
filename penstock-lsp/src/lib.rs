//! Language Server Protocol (LSP) implementation for penstock.
//!
//! This crate is the protocol shell over the analysis core: it owns the
//! tower-lsp plumbing, the per-document text cache, and the conversions
//! between the core's byte-offset findings and LSP positions. All semantics
//! live in penstock-analysis and penstock-json.
//!
//! Feature set:
//!
//!     1. Push diagnostics (textDocument/publishDiagnostics):
//!         - structural `_id` checks and cross-document uniqueness, published
//!           on open and on every change, full replacement per revision
//!
//!     2. Document Formatting (textDocument/formatting):
//!         - canonical JSON layout, delivered as minimal line-based edits
//!
//!     3. Completion (textDocument/completion):
//!         - root record keys, plus known sink dataset names inside pipes
//!
//!     4. Initial workspace scan on `initialized`, seeding the identity
//!        index from `pipes/` and `systems/`
//!
//! The server is generic over a client trait (so tests can record published
//! diagnostics) and an analysis provider trait (so tests can count and stub
//! dispatch).
//!
//! Usage:
//!
//!     $ penstock-lsp
//!
//! starts the server on stdin/stdout for editor integration.

pub mod features;
pub mod server;

pub use server::PenstockLanguageServer;
