#![forbid(unsafe_code)]
//! Incremental style-run scanning
//!
//! `stylescan` lexes a region of a text buffer into style runs, one style byte per position, and can restart at
//! any line without re-lexing what came before. The engine lives in two workspace crates:
//!
//! - `stylescan_core`: encodings, character decoding, character classes, keyword lists, packed states.
//! - `stylescan_syntax`: the document and accessor contracts and the lexical cursor ([`StyleContext`]).
//!
//! This crate adds scan configuration, a generic C-family lexer that exercises the cursor, and the `stylescan`
//! command-line tool.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod generic;
pub mod version;

pub use config::{ConfigError, ScanConfig};
pub use generic::GenericLexer;

pub use stylescan_core::{CodePage, Encoding, StateMask};
pub use stylescan_syntax::{
    Accessor, Document, LexAccessor, RecordingAccessor, ScanError, ScanRange, StyleContext, StyleRun, TextDocument,
};
