//! Snapshot tests for the CLI's rendered output
//!
//! Each test renders a small document the way the `stylescan` commands print it and pins the text inline.

use stylescan::cli::commands::{render_lines, render_runs, render_walk};
use stylescan::{CodePage, Encoding, ScanConfig, StateMask, TextDocument};

#[test]
fn test_lines_mixed_terminators() {
    let doc = TextDocument::new("one\r\ntwo\rthree\n", Encoding::Utf8);
    insta::assert_snapshot!(render_lines(&doc), @r#"
    0 0..3 "one"
    1 5..8 "two"
    2 9..14 "three"
    3 15..15 ""
    "#);
}

#[test]
fn test_walk_two_lines() {
    let mut doc = TextDocument::new("ab\ncd", Encoding::Utf8);
    let out = render_walk(&mut doc, &ScanConfig::new()).unwrap();
    insta::assert_snapshot!(out, @r"
    range 0..5 state 0
    0 L0 'a' w1 ^
    1 L0 'b' w1
    2 L0 '\n' w1 $
    3 L1 'c' w1 ^
    4 L1 'd' w1
    ");
}

#[test]
fn test_walk_utf8_widths() {
    let mut doc = TextDocument::new("é€\n", Encoding::Utf8);
    let out = render_walk(&mut doc, &ScanConfig::new()).unwrap();
    insta::assert_snapshot!(out, @r"
    range 0..6 state 0
    0 L0 'é' w2 ^
    2 L0 '€' w3
    5 L0 '\n' w1 $
    ");
}

#[test]
fn test_walk_dbcs() {
    let mut doc = TextDocument::new(vec![b'A', 0x82, 0xA0, b'\n', b'b'], Encoding::Dbcs(CodePage::ShiftJis));
    let config = ScanConfig::new().with_encoding(Encoding::Dbcs(CodePage::ShiftJis));
    let out = render_walk(&mut doc, &config).unwrap();
    insta::assert_snapshot!(out, @r"
    range 0..5 state 0
    0 L0 'A' w1 ^
    1 L0 0x82a0 w2
    3 L0 '\n' w1 $
    4 L1 'b' w1 ^
    ");
}

#[test]
fn test_walk_reports_stripped_flags() {
    let mut doc = TextDocument::new("ab", Encoding::Utf8);
    let config = ScanConfig::new().with_initial_state(0x45).with_state_mask(StateMask::new(0x3F));
    let out = render_walk(&mut doc, &config).unwrap();
    insta::assert_snapshot!(out, @r"
    range 0..2 state 5 flags 0x40
    0 L0 'a' w1 ^
    1 L0 'b' w1
    ");
}

#[test]
fn test_walk_lone_lead_byte_before_newline() {
    let mut doc = TextDocument::new(vec![b'a', 0x82, b'\n', b'b'], Encoding::Dbcs(CodePage::ShiftJis));
    let config = ScanConfig::new().with_encoding(Encoding::Dbcs(CodePage::ShiftJis));
    let out = render_walk(&mut doc, &config).unwrap();
    insta::assert_snapshot!(out, @r"
    range 0..4 state 0
    0 L0 'a' w1 ^
    1 L0 0x82 w1
    2 L0 '\n' w1 $
    3 L1 'b' w1 ^
    ");
}

#[test]
fn test_runs_keywords_comment_string() {
    let mut doc = TextDocument::new("if x1 // c\n\"s\"", Encoding::Utf8);
    let config = ScanConfig::new().with_keywords("IF");
    let out = render_runs(&mut doc, &config).unwrap();
    insta::assert_snapshot!(out, @r#"
    range 0..14 state 0
    0..=1 keyword "if"
    2..=2 default " "
    3..=4 word "x1"
    5..=5 default " "
    6..=10 comment "// c\n"
    11..=13 string "\"s\""
    "#);
}
