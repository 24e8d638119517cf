//! Text encodings understood by the scanner.
//!
//! An [`Encoding`] decides how many bytes one logical character occupies. Single-byte text is the fast path; UTF-8
//! and the double-byte code pages are "variable width" and go through [`crate::decode`].

use std::fmt;

/// Double-byte code pages, identified by their Windows code page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodePage {
    /// Shift-JIS (932)
    ShiftJis,
    /// Simplified Chinese GBK (936)
    Gbk,
    /// Korean Unified Hangul Code (949)
    Korean,
    /// Traditional Chinese Big5 (950)
    Big5,
}

impl CodePage {
    /// Every supported code page.
    pub const ALL: [CodePage; 4] = [CodePage::ShiftJis, CodePage::Gbk, CodePage::Korean, CodePage::Big5];

    /// The Windows code page number.
    pub const fn number(self) -> u32 {
        match self {
            CodePage::ShiftJis => 932,
            CodePage::Gbk => 936,
            CodePage::Korean => 949,
            CodePage::Big5 => 950,
        }
    }

    /// Look up a code page by number.
    ///
    /// ## Examples
    /// ```rust
    /// use stylescan_core::CodePage;
    ///
    /// assert_eq!(CodePage::from_number(932), Some(CodePage::ShiftJis));
    /// assert_eq!(CodePage::from_number(1252), None);
    /// ```
    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|cp| cp.number() == number)
    }

    /// Whether `byte` starts a two-byte character in this code page.
    pub const fn is_lead_byte(self, byte: u8) -> bool {
        match self {
            CodePage::ShiftJis => matches!(byte, 0x81..=0x9F | 0xE0..=0xFC),
            CodePage::Gbk | CodePage::Korean | CodePage::Big5 => matches!(byte, 0x81..=0xFE),
        }
    }

    /// Whether `byte` can follow a lead byte as the second half of a two-byte character.
    pub const fn is_trail_byte(self, byte: u8) -> bool {
        match self {
            CodePage::ShiftJis => matches!(byte, 0x40..=0x7E | 0x80..=0xFC),
            CodePage::Gbk => matches!(byte, 0x40..=0x7E | 0x80..=0xFE),
            CodePage::Korean => matches!(byte, 0x41..=0x5A | 0x61..=0x7A | 0x81..=0xFE),
            CodePage::Big5 => matches!(byte, 0x40..=0x7E | 0xA1..=0xFE),
        }
    }
}

/// Encoding class of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// One byte per character.
    #[default]
    EightBit,
    /// UTF-8, one to four bytes per character.
    Utf8,
    /// A double-byte code page, one or two bytes per character.
    Dbcs(CodePage),
}

impl Encoding {
    /// Whether one character may span more than one byte.
    pub const fn is_variable_width(self) -> bool {
        !matches!(self, Encoding::EightBit)
    }

    /// Widest character, in bytes.
    pub const fn max_width(self) -> usize {
        match self {
            Encoding::EightBit => 1,
            Encoding::Utf8 => 4,
            Encoding::Dbcs(_) => 2,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::EightBit => write!(f, "8-bit"),
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Dbcs(cp) => write!(f, "dbcs-{}", cp.number()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_page_numbers_round_trip() {
        for cp in CodePage::ALL {
            assert_eq!(CodePage::from_number(cp.number()), Some(cp));
        }
    }

    #[test]
    fn test_shift_jis_lead_bytes() {
        assert!(CodePage::ShiftJis.is_lead_byte(0x81));
        assert!(CodePage::ShiftJis.is_lead_byte(0x9F));
        assert!(CodePage::ShiftJis.is_lead_byte(0xE0));
        // Half-width katakana are single bytes in Shift-JIS.
        assert!(!CodePage::ShiftJis.is_lead_byte(0xA0));
        assert!(!CodePage::ShiftJis.is_lead_byte(b'A'));
    }

    #[test]
    fn test_gbk_lead_bytes() {
        assert!(CodePage::Gbk.is_lead_byte(0x81));
        assert!(CodePage::Gbk.is_lead_byte(0xFE));
        assert!(!CodePage::Gbk.is_lead_byte(0x80));
        assert!(!CodePage::Gbk.is_lead_byte(0xFF));
    }

    #[test]
    fn test_trail_bytes_exclude_line_ends() {
        for cp in CodePage::ALL {
            assert!(!cp.is_trail_byte(b'\n'), "{cp:?}");
            assert!(!cp.is_trail_byte(b'\r'), "{cp:?}");
            assert!(!cp.is_trail_byte(0), "{cp:?}");
        }
        assert!(CodePage::ShiftJis.is_trail_byte(0x40));
        assert!(!CodePage::ShiftJis.is_trail_byte(0x7F));
        assert!(!CodePage::ShiftJis.is_trail_byte(0xFD));
        assert!(CodePage::Gbk.is_trail_byte(0xFE));
        assert!(!CodePage::Korean.is_trail_byte(0x40));
        assert!(CodePage::Korean.is_trail_byte(b'z'));
        assert!(!CodePage::Big5.is_trail_byte(0x80));
        assert!(CodePage::Big5.is_trail_byte(0xA1));
    }

    #[test]
    fn test_variable_width() {
        assert!(!Encoding::EightBit.is_variable_width());
        assert!(Encoding::Utf8.is_variable_width());
        assert!(Encoding::Dbcs(CodePage::Big5).is_variable_width());
    }

    #[test]
    fn test_display() {
        assert_eq!(Encoding::EightBit.to_string(), "8-bit");
        assert_eq!(Encoding::Utf8.to_string(), "utf-8");
        assert_eq!(Encoding::Dbcs(CodePage::Korean).to_string(), "dbcs-949");
    }
}
