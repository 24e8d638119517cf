//! Incremental style-run scanning over a host-owned text buffer.
//!
//! Editors re-lex only the region that changed or became visible. This crate provides the machinery a grammar lexer
//! needs to do that correctly from any restart position:
//! - [`document`]: the host's text buffer contract and an in-memory implementation,
//! - [`accessor`]: the bounded, buffered view a scan reads through and commits style runs to,
//! - [`context`]: the lexical cursor ([`StyleContext`]) that walks characters and closes runs on state changes,
//! - [`restart`]: helpers for choosing a safe restart point and state.
//!
//! ## Notes
//! - This crate is scanning-only: it does not build syntax trees or know any particular language.
//! - Vocabulary (encodings, character classes, states) comes from `stylescan_core`.
//!
//! ## Examples
//! ```rust
//! use stylescan_core::Encoding;
//! use stylescan_syntax::{LexAccessor, StyleContext, TextDocument};
//!
//! let mut doc = TextDocument::new("ab\ncd", Encoding::EightBit);
//! {
//!     let mut styler = LexAccessor::new(&mut doc);
//!     let mut sc = StyleContext::new(0, 5, 1, &mut styler);
//!     while sc.more() {
//!         if sc.ch() == u32::from(b'\n') {
//!             sc.set_state(2);
//!         }
//!         sc.advance();
//!     }
//!     sc.finish();
//! }
//! assert_eq!(doc.styles(), &[1, 1, 2, 2, 2]);
//! ```

pub mod accessor;
pub mod context;
pub mod diagnostics;
pub mod document;
pub mod recording;
pub mod restart;

pub use accessor::{Accessor, LexAccessor};
pub use context::StyleContext;
pub use diagnostics::ScanError;
pub use document::{Document, StyledSpan, TextDocument};
pub use recording::{RecordingAccessor, StyleRun};
pub use restart::{ScanRange, back_to_line_start, restart_state};
