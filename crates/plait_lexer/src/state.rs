//! Resumable assembly state.

use plait_ir::{Delimiter, LexErrorKind, Lexeme, Quote, Span, Token, TokenKind};
use plait_lexer_core::SimpleTag;
use smallvec::SmallVec;

/// What the engine is in the middle of.
///
/// `scanned` counts bytes from the start of the construct that were already
/// searched for its terminator, so resuming never rescans them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Normal,
    InString {
        quote: Quote,
        scanned: usize,
        /// The last scanned character was an escaping backslash.
        escaped: bool,
    },
    InLineComment {
        scanned: usize,
    },
    InBlockComment {
        /// Index into the configured comment styles.
        style: usize,
        scanned: usize,
    },
}

/// Public view of [`Mode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Normal,
    InString,
    InLineComment,
    InBlockComment,
}

/// An open block waiting for its closer.
#[derive(Clone, Debug)]
pub(crate) struct Frame {
    pub delimiter: Delimiter,
    /// Absolute offset of the opener.
    pub start: u32,
    pub open: Lexeme,
    pub children: Vec<Token>,
}

impl Frame {
    fn text_with(&self, close: Option<&Lexeme>) -> Lexeme {
        let mut parts: Vec<&Lexeme> = Vec::with_capacity(self.children.len() + 2);
        parts.push(&self.open);
        parts.extend(self.children.iter().map(|child| &child.text));
        parts.extend(close);
        Lexeme::join(&parts)
    }

    /// Wrap as a matched block closed by `close`, which ends at `end`.
    pub fn into_block(self, close: &Lexeme, end: u32) -> Token {
        let text = self.text_with(Some(close));
        Token::new(
            TokenKind::Block {
                delimiter: self.delimiter,
                children: self.children,
            },
            Span::new(self.start, end),
            text,
        )
    }

    /// Recover as an unclosed-delimiter error keeping the children.
    pub fn into_unclosed(self) -> Token {
        let text = self.text_with(None);
        let end = self
            .children
            .last()
            .map_or(self.start + 1, |child| child.span.end);
        Token::new(
            TokenKind::Error {
                kind: LexErrorKind::UnclosedDelimiter(self.delimiter),
                children: self.children,
            },
            Span::new(self.start, end),
            text,
        )
    }
}

/// State threaded through [`ChunkedLexer::process`] calls.
///
/// One value per session: create it with [`ChunkedLexer::start`] (or
/// `ParseState::new`), pass it to every chunk of the same input, and
/// [`reset`](Self::reset) it before reusing it for another input.
///
/// [`ChunkedLexer::process`]: crate::ChunkedLexer::process
/// [`ChunkedLexer::start`]: crate::ChunkedLexer::start
#[derive(Clone, Debug)]
pub struct ParseState {
    pub(crate) mode: Mode,
    pub(crate) stack: SmallVec<[Frame; 8]>,
    /// Text received but not yet assembled.
    pub(crate) pending: String,
    /// Absolute offset of `pending[0]`.
    pub(crate) offset: u32,
    /// Set when all of `pending` is one run that more text could extend.
    pub(crate) run: Option<SimpleTag>,
    pub(crate) finished: bool,
}

impl Default for ParseState {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseState {
    pub fn new() -> Self {
        ParseState {
            mode: Mode::Normal,
            stack: SmallVec::new(),
            pending: String::new(),
            offset: 0,
            run: None,
            finished: false,
        }
    }

    /// Return to the initial state, dropping anything open.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Number of open blocks.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Bytes held back until more input arrives.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Absolute offset where the next unassembled text starts.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Whether the final chunk has been processed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn mode_kind(&self) -> ModeKind {
        match self.mode {
            Mode::Normal => ModeKind::Normal,
            Mode::InString { .. } => ModeKind::InString,
            Mode::InLineComment { .. } => ModeKind::InLineComment,
            Mode::InBlockComment { .. } => ModeKind::InBlockComment,
        }
    }

    /// Nothing open and nothing held back.
    pub(crate) fn is_settled(&self) -> bool {
        self.mode == Mode::Normal && self.stack.is_empty() && self.pending.is_empty()
    }

    /// Deliver `token` to the innermost open block, or to `out`.
    pub(crate) fn emit(&mut self, token: Token, out: &mut Vec<Token>) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(token),
            None => out.push(token),
        }
    }
}
