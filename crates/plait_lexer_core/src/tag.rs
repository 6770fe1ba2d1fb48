//! Simple token tags.

/// Atomic token kind produced by the classifier.
///
/// Values are grouped in ranges with gaps for future expansion:
///
/// | Range | Category        |
/// |-------|-----------------|
/// | 0-5   | Delimiters      |
/// | 8-13  | Atoms           |
/// | 16-19 | Runs            |
/// | 32    | Configured      |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SimpleTag {
    // === Delimiters (0-5) ===
    /// `{`
    LeftBrace = 0,
    /// `}`
    RightBrace = 1,
    /// `[`
    LeftBracket = 2,
    /// `]`
    RightBracket = 3,
    /// `(`
    LeftParen = 4,
    /// `)`
    RightParen = 5,

    // === Atoms (8-13) ===
    /// `'`
    SingleQuote = 8,
    /// `"`
    DoubleQuote = 9,
    /// `\`
    Backslash = 10,
    /// `/`
    Slash = 11,
    /// `*`
    Asterisk = 12,
    /// `.`
    Dot = 13,

    // === Runs (16-19) ===
    /// Maximal run of ASCII decimal digits.
    Digits = 16,
    /// Maximal run of characters with no other class.
    Text = 17,
    /// Maximal run of whitespace other than `\n` and `\r`.
    Whitespace = 18,
    /// `\n`, `\r`, or `\r\n`.
    Newline = 19,

    // === Configured (32) ===
    /// One character from the configured symbol set.
    Symbol = 32,
}

impl SimpleTag {
    /// Fixed text of a single-character tag.
    ///
    /// Returns `None` for runs, newlines and configured symbols, whose text
    /// varies.
    pub const fn lexeme(self) -> Option<&'static str> {
        match self {
            SimpleTag::LeftBrace => Some("{"),
            SimpleTag::RightBrace => Some("}"),
            SimpleTag::LeftBracket => Some("["),
            SimpleTag::RightBracket => Some("]"),
            SimpleTag::LeftParen => Some("("),
            SimpleTag::RightParen => Some(")"),
            SimpleTag::SingleQuote => Some("'"),
            SimpleTag::DoubleQuote => Some("\""),
            SimpleTag::Backslash => Some("\\"),
            SimpleTag::Slash => Some("/"),
            SimpleTag::Asterisk => Some("*"),
            SimpleTag::Dot => Some("."),
            SimpleTag::Digits
            | SimpleTag::Text
            | SimpleTag::Whitespace
            | SimpleTag::Newline
            | SimpleTag::Symbol => None,
        }
    }

    /// Whether tokens of this tag are maximal runs that more input could
    /// extend.
    pub const fn is_run(self) -> bool {
        matches!(
            self,
            SimpleTag::Digits | SimpleTag::Text | SimpleTag::Whitespace
        )
    }

    pub const fn is_opening(self) -> bool {
        matches!(
            self,
            SimpleTag::LeftBrace | SimpleTag::LeftBracket | SimpleTag::LeftParen
        )
    }

    pub const fn is_closing(self) -> bool {
        matches!(
            self,
            SimpleTag::RightBrace | SimpleTag::RightBracket | SimpleTag::RightParen
        )
    }
}

/// One classified unit: tag, absolute start offset, byte length.
///
/// The token's text is `text[start - base..start - base + len]` of the slice
/// the classifier ran over, where `base` is the absolute offset of that
/// slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SimpleToken {
    pub tag: SimpleTag,
    pub start: u32,
    pub len: u32,
}

impl SimpleToken {
    /// Absolute end offset (exclusive).
    #[inline]
    pub const fn end(&self) -> u32 {
        self.start + self.len
    }

    /// This token's text within `text`, which begins at absolute `base`.
    pub fn text<'a>(&self, text: &'a str, base: u32) -> &'a str {
        let start = (self.start - base) as usize;
        &text[start..start + self.len as usize]
    }
}
