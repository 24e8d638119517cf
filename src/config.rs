//! Scan configuration.
//!
//! A [`ScanConfig`] collects everything needed to run one scan over a document: how to decode it, which range to
//! cover, the state to start in, and the keywords the generic lexer recognises. The CLI builds one from its flags.

use stylescan_core::words::WordList;
use stylescan_core::{CodePage, Encoding, StateMask};
use stylescan_syntax::ScanRange;
use thiserror::Error;

/// Errors raised while turning user input into a [`ScanConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown encoding '{0}' (expected one of: utf8, 8bit, dbcs)")]
    UnknownEncoding(String),

    #[error("unsupported code page {0} (expected one of: 932, 936, 949, 950)")]
    UnknownCodePage(u32),

    #[error("a code page only applies to the dbcs encoding")]
    CodePageWithoutDbcs,

    #[error("the dbcs encoding needs a code page")]
    DbcsWithoutCodePage,
}

/// Resolve an encoding name and optional code page number.
pub fn encoding_from_name(name: &str, code_page: Option<u32>) -> Result<Encoding, ConfigError> {
    let encoding = match name.to_ascii_lowercase().as_str() {
        "utf8" | "utf-8" => Encoding::Utf8,
        "8bit" | "8-bit" | "latin1" => Encoding::EightBit,
        "dbcs" => {
            let number = code_page.ok_or(ConfigError::DbcsWithoutCodePage)?;
            let cp = CodePage::from_number(number).ok_or(ConfigError::UnknownCodePage(number))?;
            return Ok(Encoding::Dbcs(cp));
        }
        _ => return Err(ConfigError::UnknownEncoding(name.to_string())),
    };
    if code_page.is_some() {
        return Err(ConfigError::CodePageWithoutDbcs);
    }
    Ok(encoding)
}

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// How document bytes decode into characters
    pub encoding: Encoding,
    /// First byte to scan
    pub start: usize,
    /// Bytes to scan; `None` scans to the end of the document
    pub length: Option<usize>,
    /// State the cursor starts in; `None` resumes from the style before `start`
    pub initial_state: Option<u32>,
    /// Category bits of the initial state
    pub state_mask: StateMask,
    /// Keywords for the generic lexer, lower case
    pub keywords: WordList,
    /// Move the start back to its line start before scanning
    pub restart_at_line: bool,
    /// Read and style buffer size of the accessor
    pub buffer_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::Utf8,
            start: 0,
            length: None,
            initial_state: None,
            state_mask: StateMask::ALL,
            keywords: WordList::new(),
            restart_at_line: false,
            buffer_size: 4000,
        }
    }
}

impl ScanConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Scan from `start` to the end of the document
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_initial_state(mut self, state: u32) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn with_state_mask(mut self, mask: StateMask) -> Self {
        self.state_mask = mask;
        self
    }

    /// Set keywords from whitespace-separated text; words are lower-cased
    pub fn with_keywords(mut self, text: &str) -> Self {
        self.keywords.set(&text.to_ascii_lowercase());
        self
    }

    pub fn with_restart_at_line(mut self, restart: bool) -> Self {
        self.restart_at_line = restart;
        self
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// The range this config asks for in a document of `document_length` bytes.
    pub fn range(&self, document_length: usize) -> Result<ScanRange, stylescan_syntax::ScanError> {
        let length = self
            .length
            .unwrap_or_else(|| document_length.saturating_sub(self.start).max(1));
        ScanRange::new(self.start, length, document_length)
    }
}
