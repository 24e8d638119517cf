//! Packed lexer states.
//!
//! A lexer state is an opaque `u32` owned by the grammar lexer. Many grammars pack extra flag bits above their
//! enumerated categories (for example "inside a preprocessor block"). A [`StateMask`] names the category bits; the
//! cursor applies it once, to the initial state, and never again.
//!
//! ## Notes
//!
//! - The mask is **not** reapplied on later state changes. A lexer that sets flag bits mid-scan owns them.
//! - Documents store one style byte per position, so only the low 8 bits of a state reach the document
//!   (see [`style_byte`]).
//!
//! ## Examples
//! ```rust
//! use stylescan_core::{PackedState, StateMask};
//!
//! let mask = StateMask::new(0x3F);
//! let packed = PackedState::new(5, 0x40).pack();
//! assert_eq!(mask.apply(packed), 5);
//! assert_eq!(mask.split(packed), PackedState::new(5, 0x40));
//! ```

/// The category bits of a packed lexer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateMask(u32);

impl StateMask {
    /// Keep every bit.
    pub const ALL: StateMask = StateMask(u32::MAX);

    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Strip the flag bits from `state`.
    pub const fn apply(self, state: u32) -> u32 {
        state & self.0
    }

    /// Separate `state` into its category and flag bits.
    pub const fn split(self, state: u32) -> PackedState {
        PackedState {
            category: state & self.0,
            flags: state & !self.0,
        }
    }
}

impl Default for StateMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// A lexer state split into its enumerated category and the flag bits stored beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedState {
    pub category: u32,
    pub flags: u32,
}

impl PackedState {
    pub const fn new(category: u32, flags: u32) -> Self {
        Self { category, flags }
    }

    pub const fn pack(self) -> u32 {
        self.category | self.flags
    }
}

/// The style id a document stores for `state`: its low 8 bits.
pub const fn style_byte(state: u32) -> u8 {
    (state & 0xFF) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keeps_every_bit() {
        assert_eq!(StateMask::ALL.apply(0xDEAD_BEEF), 0xDEAD_BEEF);
        assert_eq!(StateMask::default(), StateMask::ALL);
    }

    #[test]
    fn test_split_and_pack_are_inverse() {
        let mask = StateMask::new(0x1F);
        for state in [0u32, 0x1F, 0x20, 0x3F, 0x1234] {
            assert_eq!(mask.split(state).pack(), state);
        }
    }

    #[test]
    fn test_split_separates_flags() {
        let split = StateMask::new(0x0F).split(0x13);
        assert_eq!(split.category, 0x03);
        assert_eq!(split.flags, 0x10);
    }

    #[test]
    fn test_style_byte_truncates() {
        assert_eq!(style_byte(7), 7);
        assert_eq!(style_byte(0x1_07), 7);
    }
}
