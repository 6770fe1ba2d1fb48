//! Whole-input assembly.

use std::collections::VecDeque;
use std::sync::Arc;

use plait_ir::{Span, SpanError, Token};

use crate::config::LexerConfig;
use crate::engine::{Engine, Step};
use crate::state::ParseState;

/// Pull-based assembler over a complete input.
///
/// Yields top-level tokens in order. Tokens produced inside an open block
/// are held until the block closes, so a block is yielded only once it is
/// complete.
pub struct Assembler<'a> {
    engine: Engine<'a>,
    state: ParseState,
    queue: VecDeque<Token>,
    scratch: Vec<Token>,
    done: bool,
}

impl<'a> Assembler<'a> {
    pub fn new(source: &'a Arc<str>, config: &'a LexerConfig) -> Self {
        Assembler {
            engine: Engine::with_shared(config, source, 0, true),
            state: ParseState::new(),
            queue: VecDeque::new(),
            scratch: Vec::new(),
            done: false,
        }
    }
}

impl Iterator for Assembler<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.done {
                return None;
            }
            match self.engine.step(&mut self.state, &mut self.scratch) {
                Step::Progress => {}
                // A final buffer never blocks.
                Step::Blocked | Step::Exhausted => {
                    self.engine.finish(&mut self.state, &mut self.scratch);
                    self.done = true;
                }
            }
            self.queue.extend(self.scratch.drain(..));
        }
    }
}

/// Assemble `source` into its token tree.
///
/// Offsets are `u32`: past 4 GiB they saturate at `u32::MAX`. Use
/// [`try_lex`] to reject such input instead.
pub fn lex(source: &str, config: &LexerConfig) -> Vec<Token> {
    lex_shared(Arc::from(source), config)
}

/// Assemble a source already held in a shared buffer; tokens view it
/// without copying. Offsets saturate as in [`lex`].
pub fn lex_shared(source: Arc<str>, config: &LexerConfig) -> Vec<Token> {
    let tokens: Vec<Token> = Assembler::new(&source, config).collect();
    tracing::debug!(bytes = source.len(), tokens = tokens.len(), "lexed");
    tokens
}

/// [`lex`], failing when `source` does not fit the `u32` offset space.
pub fn try_lex(source: &str, config: &LexerConfig) -> Result<Vec<Token>, SpanError> {
    input_span(source.len())?;
    Ok(lex(source, config))
}

fn input_span(len: usize) -> Result<Span, SpanError> {
    Span::try_from_range(0..len)
}
