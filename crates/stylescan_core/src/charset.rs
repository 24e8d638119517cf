//! ASCII character classes for grammar lexers.
//!
//! Grammar lexers classify characters constantly (is this a word character, an operator, a digit?). A
//! [`CharacterSet`] answers those questions with one bit test for ASCII and a fixed answer for everything above it,
//! which is enough for languages whose non-ASCII characters only ever continue identifiers.

/// A set of ASCII characters plus a single answer for all characters ≥ 0x80.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterSet {
    bits: u128,
    value_after: bool,
}

impl CharacterSet {
    /// An empty set that also rejects every non-ASCII character.
    pub const fn new() -> Self {
        Self {
            bits: 0,
            value_after: false,
        }
    }

    /// Add `a`..=`z`.
    pub const fn with_lower(self) -> Self {
        self.with_range(b'a', b'z')
    }

    /// Add `A`..=`Z`.
    pub const fn with_upper(self) -> Self {
        self.with_range(b'A', b'Z')
    }

    /// Add `0`..=`9`.
    pub const fn with_digits(self) -> Self {
        self.with_range(b'0', b'9')
    }

    /// Add every byte of `chars`. Non-ASCII bytes are ignored.
    pub const fn with_chars(mut self, chars: &str) -> Self {
        let bytes = chars.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] < 0x80 {
                self.bits |= 1u128 << bytes[i];
            }
            i += 1;
        }
        self
    }

    /// Set the answer given for characters ≥ 0x80.
    pub const fn with_value_after(mut self, value_after: bool) -> Self {
        self.value_after = value_after;
        self
    }

    const fn with_range(mut self, first: u8, last: u8) -> Self {
        let mut b = first;
        while b <= last {
            self.bits |= 1u128 << b;
            b += 1;
        }
        self
    }

    /// Whether `ch` belongs to the set.
    pub const fn contains(&self, ch: u32) -> bool {
        if ch < 0x80 {
            self.bits & (1u128 << ch) != 0
        } else {
            self.value_after
        }
    }
}

pub const fn is_a_digit(ch: u32) -> bool {
    ch >= b'0' as u32 && ch <= b'9' as u32
}

pub const fn is_line_end(ch: u32) -> bool {
    ch == b'\n' as u32 || ch == b'\r' as u32
}

/// Lower-case ASCII letters; every other value is returned unchanged.
pub const fn make_lower_case(ch: u32) -> u32 {
    if ch >= b'A' as u32 && ch <= b'Z' as u32 {
        ch - b'A' as u32 + b'a' as u32
    } else {
        ch
    }
}
