//! Width-aware character decoding.
//!
//! Characters are reported as `u32` values:
//! - UTF-8: the Unicode scalar value,
//! - double-byte code pages: `lead << 8 | trail`,
//! - single-byte text: the byte itself.
//!
//! ## Notes
//!
//! - Bytes that do not start a well-formed character decode as themselves with width 1, so a scanner walking
//!   forward always makes progress, even through garbage.
//! - Positions at or past the end of the text decode as [`Decoded::END`]. Its width is 1 so the one-past-end
//!   sentinel position is reachable by an ordinary forward step.

use crate::encoding::{CodePage, Encoding};

/// Character value reported for positions at or past the end of the text.
pub const END_OF_TEXT: u32 = 0;

/// A decoded character and the number of bytes it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub ch: u32,
    pub width: usize,
}

impl Decoded {
    /// What every position past the end of the text decodes to.
    pub const END: Decoded = Decoded {
        ch: END_OF_TEXT,
        width: 1,
    };

    const fn byte(byte: u8) -> Self {
        Decoded {
            ch: byte as u32,
            width: 1,
        }
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or `None` if `lead` cannot start one.
pub const fn utf8_sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Whether `byte` is a UTF-8 continuation byte.
pub const fn is_utf8_trail(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decode the character at the front of `bytes`.
///
/// `bytes` holds the text from the character's position onward; it may be shorter than the widest character
/// near the end of the text. An empty slice means the position is past the end.
pub fn decode(encoding: Encoding, bytes: &[u8]) -> Decoded {
    let Some(&lead) = bytes.first() else {
        return Decoded::END;
    };
    match encoding {
        Encoding::EightBit => Decoded::byte(lead),
        Encoding::Utf8 => decode_utf8(lead, bytes),
        Encoding::Dbcs(cp) => decode_dbcs(cp, lead, bytes),
    }
}

fn decode_utf8(lead: u8, bytes: &[u8]) -> Decoded {
    let Some(len) = utf8_sequence_len(lead) else {
        return Decoded::byte(lead);
    };
    // from_utf8 rejects overlong forms and surrogates, which the lead-byte table alone does not.
    let ch = bytes
        .get(..len)
        .and_then(|seq| std::str::from_utf8(seq).ok())
        .and_then(|s| s.chars().next());
    match ch {
        Some(c) => Decoded {
            ch: u32::from(c),
            width: len,
        },
        None => Decoded::byte(lead),
    }
}

fn decode_dbcs(cp: CodePage, lead: u8, bytes: &[u8]) -> Decoded {
    match bytes.get(1) {
        Some(&trail) if cp.is_lead_byte(lead) && cp.is_trail_byte(trail) => Decoded {
            ch: (u32::from(lead) << 8) | u32::from(trail),
            width: 2,
        },
        _ => Decoded::byte(lead),
    }
}

/// Decode the character at `pos` in a text of `length` bytes read through `byte_at`.
///
/// Only positions inside `[pos, length)` are requested from `byte_at`, and never more than
/// [`Encoding::max_width`] of them.
pub fn decode_at(encoding: Encoding, pos: usize, length: usize, mut byte_at: impl FnMut(usize) -> u8) -> Decoded {
    if pos >= length {
        return Decoded::END;
    }
    let available = (length - pos).min(encoding.max_width());
    let mut window = [0u8; 4];
    for (i, slot) in window.iter_mut().take(available).enumerate() {
        *slot = byte_at(pos + i);
    }
    decode(encoding, &window[..available])
}

/// Start of the character that ends at `pos`, or `None` when `pos` is the start of the text.
///
/// `byte_at` must return 0 for positions outside the text; 0 is never a lead or trail byte.
pub fn previous_char_start(encoding: Encoding, pos: usize, mut byte_at: impl FnMut(usize) -> u8) -> Option<usize> {
    if pos == 0 {
        return None;
    }
    let start = match encoding {
        Encoding::EightBit => pos - 1,
        Encoding::Utf8 => previous_utf8(pos, &mut byte_at),
        Encoding::Dbcs(cp) => previous_dbcs(cp, pos, &mut byte_at),
    };
    Some(start)
}

fn previous_utf8(pos: usize, byte_at: &mut impl FnMut(usize) -> u8) -> usize {
    let mut start = pos - 1;
    while start > 0 && pos - start < 4 && is_utf8_trail(byte_at(start)) {
        start -= 1;
    }
    let width = pos - start;
    let mut window = [0u8; 4];
    for (i, slot) in window.iter_mut().take(width).enumerate() {
        *slot = byte_at(start + i);
    }
    // Accept the candidate only when decoding forward from it lands exactly on `pos`.
    if decode(Encoding::Utf8, &window[..width]).width == width {
        start
    } else {
        pos - 1
    }
}

fn previous_dbcs(cp: CodePage, pos: usize, byte_at: &mut impl FnMut(usize) -> u8) -> usize {
    // The byte after a non-lead byte always starts a character, so back up to the start of the run of lead-byte
    // values before `pos` and decode forward from there.
    let mut sync = pos - 1;
    while sync > 0 && cp.is_lead_byte(byte_at(sync - 1)) {
        sync -= 1;
    }
    let mut start = sync;
    loop {
        let window = [byte_at(start), byte_at(start + 1)];
        let width = decode(Encoding::Dbcs(cp), &window).width;
        if start + width >= pos {
            return start;
        }
        start += width;
    }
}
