//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! The `render_*` functions do the actual work and return the text to print, so they can be tested without a
//! terminal or a file on disk.

use std::fs;
use std::path::Path;

use miette::{GraphicalReportHandler, GraphicalTheme};
use stylescan_core::Encoding;
use stylescan_syntax::{
    Accessor, Document, LexAccessor, RecordingAccessor, ScanError, ScanRange, StyleContext, TextDocument,
    back_to_line_start, restart_state,
};

use super::{CliError, CliResult, ExitCode, ScanArgs};
use crate::config::ScanConfig;
use crate::generic::{GenericLexer, style};

// ============================================================================
// Commands
// ============================================================================

/// Print the line table.
pub fn lines(scan: &ScanArgs) -> CliResult<ExitCode> {
    let config = scan.to_config()?;
    let doc = read_document(&scan.file, config.encoding)?;
    print!("{}", render_lines(&doc));
    Ok(ExitCode::SUCCESS)
}

/// Walk a cursor and print what it sees.
pub fn walk(scan: &ScanArgs) -> CliResult<ExitCode> {
    let config = scan.to_config()?;
    let mut doc = read_document(&scan.file, config.encoding)?;
    let out = render_walk(&mut doc, &config).map_err(|e| CliError::usage(render_scan_error(&e)))?;
    print!("{out}");
    Ok(ExitCode::SUCCESS)
}

/// Lex with the generic lexer and print the runs.
pub fn runs(scan: &ScanArgs) -> CliResult<ExitCode> {
    let config = scan.to_config()?;
    let mut doc = read_document(&scan.file, config.encoding)?;
    let out = render_runs(&mut doc, &config).map_err(|e| CliError::usage(render_scan_error(&e)))?;
    print!("{out}");
    Ok(ExitCode::SUCCESS)
}

/// Read a file as a document.
pub fn read_document(path: &Path, encoding: Encoding) -> CliResult<TextDocument> {
    let bytes =
        fs::read(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))?;
    Ok(TextDocument::new(bytes, encoding))
}

// ============================================================================
// Rendering
// ============================================================================

/// One row per line: number, start, terminator offset and text.
pub fn render_lines(doc: &TextDocument) -> String {
    let mut out = String::new();
    for line in 0..doc.line_count() {
        let start = doc.line_start(line);
        let end = doc.line_end(line);
        out.push_str(&format!("{line} {start}..{end} {:?}\n", lossy(doc, start, end)));
    }
    out
}

/// A header (with any flag bits the mask stripped from the initial state), then one row per cursor position: offset, line, character, width, and `^`/`$` for line start/end.
pub fn render_walk(doc: &mut TextDocument, config: &ScanConfig) -> Result<String, ScanError> {
    let encoding = doc.encoding();
    let mut styler = LexAccessor::with_buffer_size(doc, config.buffer_size);
    let (range, state) = resolve_range(&styler, config)?;
    let mut sc = StyleContext::with_mask(range.start, range.length, state, &mut styler, config.state_mask);

    let packed = config.state_mask.split(state);
    let mut out = format!("range {}..{} state {}", range.start, sc.end_pos(), packed.category);
    if packed.flags != 0 {
        out.push_str(&format!(" flags {:#x}", packed.flags));
    }
    out.push('\n');
    while sc.more() {
        out.push_str(&format!(
            "{} L{} {} w{}{}{}\n",
            sc.current_pos(),
            sc.current_line(),
            describe_char(encoding, sc.ch()),
            sc.width(),
            if sc.at_line_start() { " ^" } else { "" },
            if sc.at_line_end() { " $" } else { "" },
        ));
        sc.advance();
    }
    sc.finish();
    Ok(out)
}

/// A header, then one row per committed run: inclusive bounds, style name and text.
///
/// When the range does not start at 0 and no initial state was given, the text before it is lexed first so the
/// resumed state matches what a full scan would have produced.
pub fn render_runs(doc: &mut TextDocument, config: &ScanConfig) -> Result<String, ScanError> {
    let lexer = GenericLexer::new(config.keywords.clone());
    let (range, state, runs) = {
        let mut styler = LexAccessor::with_buffer_size(&mut *doc, config.buffer_size);
        let range = resolve_range(&styler, config)?.0;
        if range.start > 0 && config.initial_state.is_none() {
            lexer.lex(&mut styler, 0, range.start, style::DEFAULT, config.state_mask);
        }
        let state = config
            .initial_state
            .unwrap_or_else(|| restart_state(&styler, range.start, style::DEFAULT));

        let mut recorder = RecordingAccessor::new(styler);
        lexer.lex(&mut recorder, range.start, range.length, state, config.state_mask);
        (range, state, recorder.into_runs())
    };

    let mut out = format!("range {}..{} state {}\n", range.start, range.end().min(doc.length()), state);
    for run in runs {
        out.push_str(&format!(
            "{}..={} {} {:?}\n",
            run.first,
            run.last,
            style::name(run.style),
            lossy(doc, run.first, run.last + 1)
        ));
    }
    Ok(out)
}

/// Render a scan error with its code and help text, without colour.
pub fn render_scan_error(err: &ScanError) -> String {
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    match handler.render_report(&mut out, err) {
        Ok(()) => out,
        Err(_) => err.to_string(),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// The requested range, widened to a line start if asked, and the state to start it in.
fn resolve_range<A: Accessor + ?Sized>(accessor: &A, config: &ScanConfig) -> Result<(ScanRange, u32), ScanError> {
    let mut range = config.range(accessor.length())?;
    if config.restart_at_line {
        range = back_to_line_start(accessor, range);
    }
    let state = config
        .initial_state
        .unwrap_or_else(|| restart_state(accessor, range.start, style::DEFAULT));
    Ok((range, state))
}

fn lossy(doc: &TextDocument, start: usize, end: usize) -> String {
    doc.text()
        .get(start..end)
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .unwrap_or_default()
}

/// Characters print as quoted chars where that is unambiguous, otherwise as hex.
fn describe_char(encoding: Encoding, ch: u32) -> String {
    let ascii_only = !matches!(encoding, Encoding::Utf8);
    if ascii_only && ch >= 0x80 {
        return format!("{ch:#x}");
    }
    match char::from_u32(ch) {
        Some(c) => format!("{c:?}"),
        None => format!("{ch:#x}"),
    }
}
