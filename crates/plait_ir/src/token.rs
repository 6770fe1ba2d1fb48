//! Semantic tokens.
//!
//! [`TokenKind`] is the public sum type produced by the assembler (and
//! extended by the pattern matcher with [`TokenKind::Composite`]). Container
//! variants (`Block`, `Error`, `Composite`) own their children; every other
//! variant is a leaf.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{Lexeme, Span};

/// Bracket family of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Delimiter {
    /// `{ }`
    Brace,
    /// `[ ]`
    Bracket,
    /// `( )`
    Paren,
}

impl Delimiter {
    /// Opening character.
    pub const fn open(self) -> char {
        match self {
            Delimiter::Brace => '{',
            Delimiter::Bracket => '[',
            Delimiter::Paren => '(',
        }
    }

    /// Closing character.
    pub const fn close(self) -> char {
        match self {
            Delimiter::Brace => '}',
            Delimiter::Bracket => ']',
            Delimiter::Paren => ')',
        }
    }

    /// Delimiter whose opening character is `c`.
    pub const fn from_open(c: char) -> Option<Delimiter> {
        match c {
            '{' => Some(Delimiter::Brace),
            '[' => Some(Delimiter::Bracket),
            '(' => Some(Delimiter::Paren),
            _ => None,
        }
    }
}

/// Integer or floating numeric literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericKind {
    Integer,
    Float,
}

/// Quote character of a string literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quote {
    /// `'`
    Single,
    /// `"`
    Double,
}

impl Quote {
    pub const fn char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

/// Line comments end before the next newline; block comments end after
/// their closing delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommentKind {
    Line,
    Block,
}

/// What made an input region malformed.
///
/// The `Display` text is the message carried by an `Error` token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexErrorKind {
    /// An opening delimiter never saw its closer.
    #[error("unclosed delimiter `{}`", .0.open())]
    UnclosedDelimiter(Delimiter),
    /// A closing delimiter with no enclosing opener of its kind.
    #[error("unexpected closing delimiter `{}`", .0.close())]
    StrayCloser(Delimiter),
    /// A block comment still open at end of input.
    #[error("unterminated block comment")]
    UnterminatedComment,
}

/// Semantic token kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// Run of text characters (identifier-like).
    Ident,
    /// Whitespace run or a single newline.
    Whitespace,
    /// One symbol character, or an atom with no structural role here.
    Symbol,
    /// Configured multi-character operator.
    Operator,
    Numeric(NumericKind),
    /// Quoted string, quotes and escapes included verbatim.
    String(Quote),
    Comment(CommentKind),
    /// Matched delimiter pair with its assembled contents.
    Block {
        delimiter: Delimiter,
        children: Vec<Token>,
    },
    /// Malformed region. For unclosed blocks `children` holds what was
    /// assembled inside the block before recovery.
    Error {
        kind: LexErrorKind,
        children: Vec<Token>,
    },
    /// Run of tokens folded by a named pattern.
    Composite {
        name: Arc<str>,
        children: Vec<Token>,
    },
}

impl TokenKind {
    /// Payload-free discriminant.
    pub fn tag(&self) -> TokenTag {
        match self {
            TokenKind::Ident => TokenTag::Ident,
            TokenKind::Whitespace => TokenTag::Whitespace,
            TokenKind::Symbol => TokenTag::Symbol,
            TokenKind::Operator => TokenTag::Operator,
            TokenKind::Numeric(NumericKind::Integer) => TokenTag::Integer,
            TokenKind::Numeric(NumericKind::Float) => TokenTag::Float,
            TokenKind::String(_) => TokenTag::String,
            TokenKind::Comment(_) => TokenTag::Comment,
            TokenKind::Block { .. } => TokenTag::Block,
            TokenKind::Error { .. } => TokenTag::Error,
            TokenKind::Composite { .. } => TokenTag::Composite,
        }
    }

    /// Children of a container kind, empty for leaves.
    pub fn children(&self) -> &[Token] {
        match self {
            TokenKind::Block { children, .. }
            | TokenKind::Error { children, .. }
            | TokenKind::Composite { children, .. } => children,
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Token>> {
        match self {
            TokenKind::Block { children, .. }
            | TokenKind::Error { children, .. }
            | TokenKind::Composite { children, .. } => Some(children),
            _ => None,
        }
    }
}

/// Compact discriminant of [`TokenKind`], used by selectors and summaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenTag {
    Ident = 0,
    Whitespace = 1,
    Symbol = 2,
    Operator = 3,
    Integer = 4,
    Float = 5,
    String = 6,
    Comment = 7,
    Block = 8,
    Error = 9,
    Composite = 10,
}

impl TokenTag {
    /// Human-readable name, as used in match traces.
    pub const fn name(self) -> &'static str {
        match self {
            TokenTag::Ident => "Ident",
            TokenTag::Whitespace => "Whitespace",
            TokenTag::Symbol => "Symbol",
            TokenTag::Operator => "Operator",
            TokenTag::Integer => "Integer",
            TokenTag::Float => "Float",
            TokenTag::String => "String",
            TokenTag::Comment => "Comment",
            TokenTag::Block => "Block",
            TokenTag::Error => "Error",
            TokenTag::Composite => "Composite",
        }
    }
}

impl fmt::Display for TokenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A semantic token: kind, absolute span, and a view of its text.
///
/// Trees nest as deep as the input does. Drop is iterative, and clone,
/// comparison, hashing and `Debug` grow the stack per level.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: Lexeme,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, text: Lexeme) -> Self {
        Token { kind, span, text }
    }

    #[inline]
    pub fn tag(&self) -> TokenTag {
        self.kind.tag()
    }

    /// The token's text.
    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Children of a container token, empty for leaves.
    #[inline]
    pub fn children(&self) -> &[Token] {
        self.kind.children()
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace)
    }

    /// Whether this whitespace token is a line break.
    pub fn is_newline(&self) -> bool {
        self.is_whitespace() && matches!(self.text(), "\n" | "\r" | "\r\n")
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error { .. })
    }

    /// Delimiter of a block token.
    pub fn delimiter(&self) -> Option<Delimiter> {
        match self.kind {
            TokenKind::Block { delimiter, .. } => Some(delimiter),
            _ => None,
        }
    }

    /// Text between a block's delimiters.
    pub fn inner_text(&self) -> Option<&str> {
        match self.kind {
            // Delimiters are single ASCII bytes.
            TokenKind::Block { .. } => self.text().get(1..self.text().len() - 1),
            _ => None,
        }
    }

    /// Text between a string's quotes, escapes left as written.
    pub fn string_value(&self) -> Option<&str> {
        match self.kind {
            TokenKind::String(_) => self.text().get(1..self.text().len() - 1),
            _ => None,
        }
    }

    /// Error message of an error token.
    pub fn error_message(&self) -> Option<String> {
        match &self.kind {
            TokenKind::Error { kind, .. } => Some(kind.to_string()),
            _ => None,
        }
    }

    /// Number of error tokens in this token's tree, itself included.
    pub fn error_count(&self) -> usize {
        plait_stack::ensure_sufficient_stack(|| {
            usize::from(self.is_error())
                + self
                    .children()
                    .iter()
                    .map(Token::error_count)
                    .sum::<usize>()
        })
    }
}

impl Drop for Token {
    fn drop(&mut self) {
        let Some(children) = self.kind.children_mut() else {
            return;
        };
        let mut work = std::mem::take(children);
        while let Some(mut token) = work.pop() {
            if let Some(children) = token.kind.children_mut() {
                work.append(children);
            }
        }
    }
}

impl Clone for Token {
    fn clone(&self) -> Self {
        plait_stack::ensure_sufficient_stack(|| Token {
            kind: self.kind.clone(),
            span: self.span,
            text: self.text.clone(),
        })
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        plait_stack::ensure_sufficient_stack(|| {
            self.span == other.span && self.text == other.text && self.kind == other.kind
        })
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        plait_stack::ensure_sufficient_stack(|| {
            self.kind.hash(state);
            self.span.hash(state);
            self.text.hash(state);
        });
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        plait_stack::ensure_sufficient_stack(|| self.fmt_node(f))
    }
}

impl Token {
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Block { delimiter, children } => {
                write!(f, "Block({delimiter:?}) @ {} {:?}", self.span, children)
            }
            TokenKind::Error { kind, children } if !children.is_empty() => {
                write!(f, "Error({kind:?}) @ {} {:?}", self.span, children)
            }
            TokenKind::Composite { name, children } => {
                write!(f, "Composite({name}) @ {} {:?}", self.span, children)
            }
            kind => write!(f, "{kind:?} @ {} {:?}", self.span, self.text),
        }
    }
}

#[cfg(test)]
mod tests;
