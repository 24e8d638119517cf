//! Errors reported when a scan request cannot be honoured.
//!
//! Scanning itself never fails: out-of-range reads return defaults. Only the request that sets a scan up is
//! validated, through [`crate::restart::ScanRange::new`].

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ScanError {
    #[error("scan range is empty")]
    #[diagnostic(code(stylescan::empty_range), help("request a length of at least one byte"))]
    EmptyRange,

    #[error("scan start {start} is past the end of the document ({length} bytes)")]
    #[diagnostic(
        code(stylescan::start_out_of_range),
        help("the last position a scan may start at is the document length")
    )]
    StartOutOfRange { start: usize, length: usize },
}
