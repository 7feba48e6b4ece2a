//! Core types for truncation-aware text.
//!
//! Style is split in two:
//! - [`TextStyle`] is cosmetic (attributes, alignment) and never changes
//!   where lines break.
//! - [`WrapMetrics`] holds everything that can move a line break. It is the
//!   subset shared by the visible pass and the shadow measurement pass.

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const INVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

// =============================================================================
// Text Alignment / Wrapping
// =============================================================================

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextAlign {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// Text wrap mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextWrap {
    /// Break only at explicit newlines.
    NoWrap = 0,
    /// Break at word boundaries, falling back to graphemes for long words.
    #[default]
    Word = 1,
    /// Break at any grapheme boundary.
    Char = 2,
}

impl From<u8> for TextWrap {
    fn from(value: u8) -> Self {
        match value {
            0 => TextWrap::NoWrap,
            2 => TextWrap::Char,
            _ => TextWrap::Word,
        }
    }
}

// =============================================================================
// Style
// =============================================================================

/// Cosmetic text style. Forwarded unchanged to both render passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub attrs: Attr,
    pub align: TextAlign,
}

/// Properties that affect where lines wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapMetrics {
    pub wrap: TextWrap,
    /// Extra cells after every visible grapheme.
    pub letter_spacing: u16,
    /// Cells occupied by a tab character.
    pub tab_width: u8,
}

impl Default for WrapMetrics {
    fn default() -> Self {
        Self {
            wrap: TextWrap::Word,
            letter_spacing: 0,
            tab_width: 4,
        }
    }
}

bitflags::bitflags! {
    /// Which wrap metrics are mirrored into the shadow measurement pass.
    ///
    /// Metrics that are not mirrored fall back to their defaults in the
    /// shadow pass. Line limits and callbacks have no flag: they can never
    /// reach the shadow pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShadowProps: u8 {
        const WRAP = 1 << 0;
        const LETTER_SPACING = 1 << 1;
        const TAB_WIDTH = 1 << 2;
    }
}

impl Default for ShadowProps {
    fn default() -> Self {
        ShadowProps::all()
    }
}

impl WrapMetrics {
    /// Project these metrics onto the set mirrored into the shadow pass.
    pub fn mirrored(self, props: ShadowProps) -> WrapMetrics {
        let base = WrapMetrics::default();
        WrapMetrics {
            wrap: if props.contains(ShadowProps::WRAP) { self.wrap } else { base.wrap },
            letter_spacing: if props.contains(ShadowProps::LETTER_SPACING) {
                self.letter_spacing
            } else {
                base.letter_spacing
            },
            tab_width: if props.contains(ShadowProps::TAB_WIDTH) {
                self.tab_width
            } else {
                base.tab_width
            },
        }
    }
}
