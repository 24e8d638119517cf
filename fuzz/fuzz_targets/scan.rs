#![no_main]

use libfuzzer_sys::fuzz_target;
use stylescan::generic::style;
use stylescan::{CodePage, Document, Encoding, GenericLexer, LexAccessor, StateMask, StyleContext, TextDocument};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, text)) = data.split_first() else {
        return;
    };
    let encoding = match selector % 4 {
        0 => Encoding::EightBit,
        1 => Encoding::Utf8,
        2 => Encoding::Dbcs(CodePage::ShiftJis),
        _ => Encoding::Dbcs(CodePage::Big5),
    };
    let start = usize::from(selector) % (text.len() + 1);

    // Walking and peeking must never panic and must always terminate.
    let mut doc = TextDocument::new(text, encoding);
    {
        let mut styler = LexAccessor::with_buffer_size(&mut doc, 16);
        let mut sc = StyleContext::new(start, text.len() + 1, 0, &mut styler);
        while sc.more() {
            let _ = sc.relative_character(3);
            let _ = sc.relative_character(-2);
            let _ = sc.matches_literal(b"/*x");
            sc.advance();
        }
        sc.finish();
    }

    // Lexing must leave every style inside the lexer's style set.
    let lexer = GenericLexer::default();
    {
        let mut styler = LexAccessor::new(&mut doc);
        lexer.lex(&mut styler, 0, text.len(), style::DEFAULT, StateMask::ALL);
    }
    assert!(doc.styles().iter().all(|&s| u32::from(s) <= style::OPERATOR));
    assert_eq!(doc.length(), text.len());
});
