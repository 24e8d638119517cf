//! Provide the shared, pure vocabulary used by style-run scanners.
//!
//! This crate is intentionally small and dependency-free. It holds the pieces that both the lexical cursor and the
//! grammar lexers built on top of it need to agree on:
//! - text encodings and width-aware character decoding,
//! - ASCII character classes and keyword lists,
//! - packed lexer states and the style ids derived from them.
//!
//! ## Notes
//!
//! - No IO, no global state, no document types. Everything here is a function of its arguments.
//! - Characters are plain `u32` values so single-byte, UTF-8 and double-byte text share one representation.
//!
//! ## Examples
//! ```rust
//! use stylescan_core::decode::{decode, Decoded};
//! use stylescan_core::Encoding;
//!
//! assert_eq!(decode(Encoding::Utf8, "é".as_bytes()), Decoded { ch: 0xE9, width: 2 });
//! assert_eq!(decode(Encoding::EightBit, "é".as_bytes()), Decoded { ch: 0xC3, width: 1 });
//! ```

pub mod charset;
pub mod decode;
pub mod encoding;
pub mod state;
pub mod words;

pub use encoding::{CodePage, Encoding};
pub use state::{PackedState, StateMask, style_byte};
