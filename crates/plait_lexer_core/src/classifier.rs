//! Stateless character classifier.
//!
//! Classification priority for the character at the current position:
//!
//! 1. single-character atoms `{ } [ ] ( ) ' " \ / * .`
//! 2. newline: `\n`, or `\r` merged with a following `\n`
//! 3. whitespace run (excluding `\n` and `\r`)
//! 4. ASCII digit run
//! 5. one configured symbol character
//! 6. text run, up to the next character of any other class
//!
//! A run continues while the next character has the same class, so the
//! token starting at any position can be computed without looking behind
//! it. The streaming engine relies on this to resume mid-input.

use crate::symbols::SymbolSet;
use crate::tag::{SimpleTag, SimpleToken};

/// Class of a single character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// Single-character atom with its tag.
    Atom(SimpleTag),
    /// `\n` or `\r`.
    Newline,
    Whitespace,
    Digit,
    Symbol,
    Text,
}

/// Class of `c` under `symbols`.
#[inline]
pub fn classify_char(c: char, symbols: &SymbolSet) -> CharClass {
    match c {
        '{' => CharClass::Atom(SimpleTag::LeftBrace),
        '}' => CharClass::Atom(SimpleTag::RightBrace),
        '[' => CharClass::Atom(SimpleTag::LeftBracket),
        ']' => CharClass::Atom(SimpleTag::RightBracket),
        '(' => CharClass::Atom(SimpleTag::LeftParen),
        ')' => CharClass::Atom(SimpleTag::RightParen),
        '\'' => CharClass::Atom(SimpleTag::SingleQuote),
        '"' => CharClass::Atom(SimpleTag::DoubleQuote),
        '\\' => CharClass::Atom(SimpleTag::Backslash),
        '/' => CharClass::Atom(SimpleTag::Slash),
        '*' => CharClass::Atom(SimpleTag::Asterisk),
        '.' => CharClass::Atom(SimpleTag::Dot),
        '\n' | '\r' => CharClass::Newline,
        '0'..='9' => CharClass::Digit,
        c if c.is_whitespace() => CharClass::Whitespace,
        c if symbols.contains(c) => CharClass::Symbol,
        _ => CharClass::Text,
    }
}

/// Classify the single token starting at byte `pos` of `text`.
///
/// `base` is the absolute offset of `text[0]`. Returns `None` at the end of
/// `text`. `pos` must be a char boundary. Offsets past `u32::MAX` saturate.
pub fn token_at(text: &str, pos: usize, base: u32, symbols: &SymbolSet) -> Option<SimpleToken> {
    let rest = &text[pos..];
    let mut chars = rest.chars();
    let first = chars.next()?;
    let (tag, len) = match classify_char(first, symbols) {
        CharClass::Atom(tag) => (tag, 1),
        CharClass::Newline => {
            let len = if rest.starts_with("\r\n") { 2 } else { 1 };
            (SimpleTag::Newline, len)
        }
        CharClass::Symbol => (SimpleTag::Symbol, first.len_utf8()),
        class @ (CharClass::Whitespace | CharClass::Digit | CharClass::Text) => {
            let tag = match class {
                CharClass::Whitespace => SimpleTag::Whitespace,
                CharClass::Digit => SimpleTag::Digits,
                _ => SimpleTag::Text,
            };
            let len = rest
                .char_indices()
                .find(|&(_, c)| classify_char(c, symbols) != class)
                .map_or(rest.len(), |(i, _)| i);
            (tag, len)
        }
    };
    Some(SimpleToken {
        tag,
        start: offset(base, pos),
        len: offset(0, len),
    })
}

/// Saturating `base + delta` in the `u32` offset space.
#[inline]
fn offset(base: u32, delta: usize) -> u32 {
    base.saturating_add(u32::try_from(delta).unwrap_or(u32::MAX))
}

/// Classify all of `text` (absolute base 0).
pub fn classify(text: &str, symbols: &SymbolSet) -> Vec<SimpleToken> {
    Classifier::new(text, symbols).collect()
}

/// Iterator of simple tokens over a text slice.
#[derive(Clone, Debug)]
pub struct Classifier<'a> {
    text: &'a str,
    pos: usize,
    base: u32,
    symbols: &'a SymbolSet,
}

impl<'a> Classifier<'a> {
    /// Classifier over `text`, offsets starting at 0.
    pub fn new(text: &'a str, symbols: &'a SymbolSet) -> Self {
        Self::with_base(text, 0, symbols)
    }

    /// Classifier over `text`, whose first byte sits at absolute `base`.
    pub fn with_base(text: &'a str, base: u32, symbols: &'a SymbolSet) -> Self {
        Classifier {
            text,
            pos: 0,
            base,
            symbols,
        }
    }

    /// The classified text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Absolute offset of `text[0]`.
    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn symbols(&self) -> &'a SymbolSet {
        self.symbols
    }

    /// Byte position of the next token in `text`.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Continue classification from byte `pos` (a char boundary).
    pub fn seek(&mut self, pos: usize) {
        debug_assert!(self.text.is_char_boundary(pos), "seek to non-boundary {pos}");
        self.pos = pos;
    }

    /// Produce the next simple token, or `None` at end of text.
    #[inline]
    pub fn next_token(&mut self) -> Option<SimpleToken> {
        let token = token_at(self.text, self.pos, self.base, self.symbols)?;
        self.pos += token.len as usize;
        Some(token)
    }

    /// Whether `token` touches the end of the text and could change if more
    /// text followed: a run, or a lone `\r` that a `\n` would join.
    pub fn may_extend(&self, token: &SimpleToken) -> bool {
        let local_end = (token.end() - self.base) as usize;
        if local_end != self.text.len() {
            return false;
        }
        token.tag.is_run() || (token.tag == SimpleTag::Newline && self.text.ends_with('\r'))
    }
}

impl Iterator for Classifier<'_> {
    type Item = SimpleToken;

    fn next(&mut self) -> Option<SimpleToken> {
        self.next_token()
    }
}
