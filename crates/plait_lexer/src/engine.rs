//! The assembly step machine.
//!
//! Each [`Engine::step`] makes one decision at the current position and
//! either emits a token, opens or closes a block, or switches mode. When
//! the decision depends on text past the end of the buffer and the buffer
//! is not final, the step returns [`Step::Blocked`] without side effects
//! beyond the saved mode, and [`Engine::mark`] tells the caller where the
//! undecided construct starts.
//!
//! The shared buffer that emitted lexemes view is built from the text on
//! the first emission, so a step that blocks at once copies nothing.

use std::ops::Range;
use std::sync::Arc;

use memchr::{memchr2, memmem};
use plait_ir::{
    CommentKind, Delimiter, LexErrorKind, Lexeme, NumericKind, Quote, Span, Token, TokenKind,
};
use plait_lexer_core::{Classifier, Lookahead, SimpleTag, SimpleToken};
use tracing::{debug, trace};

use crate::config::{LexerConfig, Prefix};
use crate::state::{Frame, Mode, ParseState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Progress,
    /// Needs text past the end of a non-final buffer.
    Blocked,
    /// Nothing left to assemble.
    Exhausted,
}

pub(crate) struct Engine<'a> {
    config: &'a LexerConfig,
    shared: Option<Arc<str>>,
    la: Lookahead<'a>,
    base: u32,
    is_final: bool,
    mark: usize,
    run: Option<SimpleTag>,
}

impl<'a> Engine<'a> {
    /// Engine over `text`, whose first byte sits at absolute `base`.
    pub fn new(config: &'a LexerConfig, text: &'a str, base: u32, is_final: bool) -> Self {
        let classifier = Classifier::with_base(text, base, config.symbols());
        Engine {
            config,
            shared: None,
            la: Lookahead::new(classifier),
            base,
            is_final,
            mark: 0,
            run: None,
        }
    }

    /// Engine whose lexemes view `buf` itself.
    pub fn with_shared(
        config: &'a LexerConfig,
        buf: &'a Arc<str>,
        base: u32,
        is_final: bool,
    ) -> Self {
        let mut engine = Self::new(config, buf, base, is_final);
        engine.shared = Some(Arc::clone(buf));
        engine
    }

    /// Start of the construct being decided; everything before it is
    /// assembled.
    pub fn mark(&self) -> usize {
        self.mark
    }

    /// Tag of the run the last step blocked on, when that run spans all of
    /// the text after [`mark`](Self::mark).
    pub fn blocked_run(&self) -> Option<SimpleTag> {
        self.run
    }

    #[cfg(test)]
    pub fn is_shared(&self) -> bool {
        self.shared.is_some()
    }

    fn buffer(&mut self) -> Arc<str> {
        let text = self.la.text();
        Arc::clone(self.shared.get_or_insert_with(|| Arc::from(text)))
    }

    #[inline]
    fn text(&self) -> &'a str {
        self.la.text()
    }

    #[inline]
    fn abs(&self, pos: usize) -> u32 {
        self.base.saturating_add(u32::try_from(pos).unwrap_or(u32::MAX))
    }

    fn local(&self, token: SimpleToken) -> Range<usize> {
        let start = (token.start - self.base) as usize;
        start..start + token.len as usize
    }

    fn leaf(&mut self, kind: TokenKind, range: Range<usize>) -> Token {
        let span = Span::new(self.abs(range.start), self.abs(range.end));
        Token::new(kind, span, Lexeme::new(self.buffer(), range))
    }

    /// Emit a leaf covering `range` and continue after it.
    fn advance(
        &mut self,
        state: &mut ParseState,
        out: &mut Vec<Token>,
        kind: TokenKind,
        range: Range<usize>,
    ) -> Step {
        let end = range.end;
        let token = self.leaf(kind, range);
        state.emit(token, out);
        self.la.seek(end);
        Step::Progress
    }

    pub fn step(&mut self, state: &mut ParseState, out: &mut Vec<Token>) -> Step {
        self.run = None;
        match state.mode {
            Mode::Normal => self.step_normal(state, out),
            Mode::InString {
                quote,
                scanned,
                escaped,
            } => self.scan_string(state, out, quote, scanned, escaped),
            Mode::InLineComment { scanned } => self.scan_line_comment(state, out, scanned),
            Mode::InBlockComment { style, scanned } => {
                self.scan_block_comment(state, out, style, scanned)
            }
        }
    }

    fn step_normal(&mut self, state: &mut ParseState, out: &mut Vec<Token>) -> Step {
        let pos = self.la.pos();
        self.mark = pos;
        let rest = &self.text()[pos..];
        if rest.is_empty() {
            return Step::Exhausted;
        }

        match self.config.comment_at(rest, self.is_final) {
            Prefix::Partial => return Step::Blocked,
            Prefix::Match(style) => {
                let comment = &self.config.comment_styles()[style];
                let scanned = comment.start.len();
                state.mode = if comment.is_line() {
                    Mode::InLineComment { scanned }
                } else {
                    Mode::InBlockComment { style, scanned }
                };
                trace!(offset = self.abs(pos), start = %comment.start, "comment");
                return Step::Progress;
            }
            Prefix::None => {}
        }

        match self.config.operator_at(rest, self.is_final) {
            Prefix::Partial => return Step::Blocked,
            Prefix::Match(index) => {
                let len = self.config.operators()[index].len();
                return self.advance(state, out, TokenKind::Operator, pos..pos + len);
            }
            Prefix::None => {}
        }

        let Some(token) = self.la.peek(0) else {
            return Step::Exhausted;
        };
        if !self.is_final && self.la.may_extend(&token) {
            if token.tag.is_run() {
                self.run = Some(token.tag);
            }
            return Step::Blocked;
        }
        let range = self.local(token);

        match token.tag {
            SimpleTag::LeftBrace => self.open(state, Delimiter::Brace, range),
            SimpleTag::LeftBracket => self.open(state, Delimiter::Bracket, range),
            SimpleTag::LeftParen => self.open(state, Delimiter::Paren, range),
            SimpleTag::RightBrace => self.close(state, out, Delimiter::Brace, range),
            SimpleTag::RightBracket => self.close(state, out, Delimiter::Bracket, range),
            SimpleTag::RightParen => self.close(state, out, Delimiter::Paren, range),
            SimpleTag::SingleQuote | SimpleTag::DoubleQuote => {
                let quote = if token.tag == SimpleTag::SingleQuote {
                    Quote::Single
                } else {
                    Quote::Double
                };
                state.mode = Mode::InString {
                    quote,
                    scanned: 1,
                    escaped: false,
                };
                trace!(offset = token.start, "string");
                Step::Progress
            }
            SimpleTag::Digits => self.number(state, out, range),
            SimpleTag::Dot => self.dot(state, out, range),
            SimpleTag::Text => self.advance(state, out, TokenKind::Ident, range),
            SimpleTag::Whitespace | SimpleTag::Newline => {
                self.advance(state, out, TokenKind::Whitespace, range)
            }
            SimpleTag::Backslash | SimpleTag::Slash | SimpleTag::Asterisk | SimpleTag::Symbol => {
                self.advance(state, out, TokenKind::Symbol, range)
            }
        }
    }

    fn open(&mut self, state: &mut ParseState, delimiter: Delimiter, range: Range<usize>) -> Step {
        let end = range.end;
        let start = self.abs(range.start);
        trace!(offset = start, depth = state.stack.len(), ?delimiter, "open block");
        state.stack.push(Frame {
            delimiter,
            start,
            open: Lexeme::new(self.buffer(), range),
            children: Vec::new(),
        });
        self.la.seek(end);
        Step::Progress
    }

    fn close(
        &mut self,
        state: &mut ParseState,
        out: &mut Vec<Token>,
        delimiter: Delimiter,
        range: Range<usize>,
    ) -> Step {
        let Some(index) = state
            .stack
            .iter()
            .rposition(|frame| frame.delimiter == delimiter)
        else {
            debug!(offset = self.abs(range.start), ?delimiter, "stray closing delimiter");
            let kind = TokenKind::Error {
                kind: LexErrorKind::StrayCloser(delimiter),
                children: Vec::new(),
            };
            return self.advance(state, out, kind, range);
        };

        unwind(state, out, index + 1);
        let end = range.end;
        let close = Lexeme::new(self.buffer(), range);
        if let Some(frame) = state.stack.pop() {
            trace!(offset = frame.start, depth = index, ?delimiter, "close block");
            let block = frame.into_block(&close, self.abs(end));
            state.emit(block, out);
        }
        self.la.seek(end);
        Step::Progress
    }

    /// Digit run, possibly the integer part of a float.
    fn number(&mut self, state: &mut ParseState, out: &mut Vec<Token>, digits: Range<usize>) -> Step {
        let integer = TokenKind::Numeric(NumericKind::Integer);
        match self.la.peek(1) {
            Some(dot) if dot.tag == SimpleTag::Dot => match self.la.peek(2) {
                Some(fraction) if fraction.tag == SimpleTag::Digits => {
                    if !self.is_final && self.la.may_extend(&fraction) {
                        return Step::Blocked;
                    }
                    let end = self.local(fraction).end;
                    let kind = TokenKind::Numeric(NumericKind::Float);
                    self.advance(state, out, kind, digits.start..end)
                }
                Some(_) => self.advance(state, out, integer, digits),
                None if self.is_final => self.advance(state, out, integer, digits),
                None => Step::Blocked,
            },
            Some(_) => self.advance(state, out, integer, digits),
            None if self.is_final => self.advance(state, out, integer, digits),
            None => Step::Blocked,
        }
    }

    /// Dot not preceded by digits: a float's decimal point or a symbol.
    fn dot(&mut self, state: &mut ParseState, out: &mut Vec<Token>, dot: Range<usize>) -> Step {
        match self.la.peek(1) {
            Some(fraction) if fraction.tag == SimpleTag::Digits => {
                if !self.is_final && self.la.may_extend(&fraction) {
                    return Step::Blocked;
                }
                let end = self.local(fraction).end;
                let kind = TokenKind::Numeric(NumericKind::Float);
                self.advance(state, out, kind, dot.start..end)
            }
            Some(_) => self.advance(state, out, TokenKind::Symbol, dot),
            None if self.is_final => self.advance(state, out, TokenKind::Symbol, dot),
            None => Step::Blocked,
        }
    }

    fn scan_string(
        &mut self,
        state: &mut ParseState,
        out: &mut Vec<Token>,
        quote: Quote,
        scanned: usize,
        mut escaped: bool,
    ) -> Step {
        let text = self.text();
        let bytes = text.as_bytes();
        let start = self.mark;
        let mut at = start + scanned;
        let closing = match quote {
            Quote::Single => b'\'',
            Quote::Double => b'"',
        };

        loop {
            if escaped {
                // Backslash escapes exactly one character.
                let Some(c) = text[at..].chars().next() else {
                    break;
                };
                at += c.len_utf8();
                escaped = false;
            }
            match memchr2(closing, b'\\', &bytes[at..]) {
                Some(found) if bytes[at + found] == b'\\' => {
                    at += found + 1;
                    escaped = true;
                }
                Some(found) => {
                    state.mode = Mode::Normal;
                    let end = at + found + 1;
                    return self.advance(state, out, TokenKind::String(quote), start..end);
                }
                None => {
                    at = bytes.len();
                    break;
                }
            }
        }

        if self.is_final {
            trace!(offset = self.abs(start), "unterminated string, rescanning after quote");
            state.mode = Mode::Normal;
            return self.advance(state, out, TokenKind::Symbol, start..start + 1);
        }
        state.mode = Mode::InString {
            quote,
            scanned: at - start,
            escaped,
        };
        Step::Blocked
    }

    fn scan_line_comment(
        &mut self,
        state: &mut ParseState,
        out: &mut Vec<Token>,
        scanned: usize,
    ) -> Step {
        let bytes = self.text().as_bytes();
        let start = self.mark;
        let from = start + scanned;
        let kind = TokenKind::Comment(CommentKind::Line);
        match memchr2(b'\n', b'\r', &bytes[from..]) {
            Some(found) => {
                state.mode = Mode::Normal;
                self.advance(state, out, kind, start..from + found)
            }
            None if self.is_final => {
                state.mode = Mode::Normal;
                self.advance(state, out, kind, start..bytes.len())
            }
            None => {
                state.mode = Mode::InLineComment {
                    scanned: bytes.len() - start,
                };
                Step::Blocked
            }
        }
    }

    fn scan_block_comment(
        &mut self,
        state: &mut ParseState,
        out: &mut Vec<Token>,
        style: usize,
        scanned: usize,
    ) -> Step {
        let config = self.config;
        let Some(close) = config.comment_styles()[style].end.as_deref() else {
            return self.scan_line_comment(state, out, scanned);
        };
        let bytes = self.text().as_bytes();
        let start = self.mark;
        let from = start + scanned;
        match memmem::find(&bytes[from..], close.as_bytes()) {
            Some(found) => {
                state.mode = Mode::Normal;
                let end = from + found + close.len();
                self.advance(state, out, TokenKind::Comment(CommentKind::Block), start..end)
            }
            None if self.is_final => {
                debug!(offset = self.abs(start), "unterminated block comment");
                state.mode = Mode::Normal;
                let kind = TokenKind::Error {
                    kind: LexErrorKind::UnterminatedComment,
                    children: Vec::new(),
                };
                self.advance(state, out, kind, start..bytes.len())
            }
            None => {
                // The closer may straddle the boundary: keep its possible head.
                let searched = (bytes.len() - start).saturating_sub(close.len() - 1);
                state.mode = Mode::InBlockComment {
                    style,
                    scanned: scanned.max(searched),
                };
                Step::Blocked
            }
        }
    }

    /// Close every open block at end of input.
    pub fn finish(&mut self, state: &mut ParseState, out: &mut Vec<Token>) {
        unwind(state, out, 0);
    }
}

/// Pop frames above `depth` as unclosed-delimiter errors, innermost first.
fn unwind(state: &mut ParseState, out: &mut Vec<Token>, depth: usize) {
    while state.stack.len() > depth {
        let Some(frame) = state.stack.pop() else {
            break;
        };
        debug!(offset = frame.start, delimiter = ?frame.delimiter, "unclosed delimiter");
        let error = frame.into_unclosed();
        state.emit(error, out);
    }
}
