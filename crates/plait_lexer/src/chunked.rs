//! Resumable chunk-at-a-time assembly.

use plait_ir::Token;
use plait_lexer_core::token_at;
use tracing::debug;

use crate::config::LexerConfig;
use crate::engine::{Engine, Step};
use crate::state::ParseState;

/// Why a chunk was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StreamFault {
    #[error("the session already received its final chunk")]
    SessionFinished,
    #[error("input exceeds the 4 GiB offset space")]
    OffsetOverflow,
}

/// Outcome of one [`ChunkedLexer::process`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamStatus {
    /// Every token so far is emitted and nothing is open.
    Continue,
    /// A token or block is still open; more input is required.
    NeedMoreData,
    /// The final chunk was consumed and the session is finished.
    Complete,
    /// The chunk was rejected; nothing was consumed.
    Error(StreamFault),
}

/// Tokens completed by one chunk, with the session status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkOutput {
    pub tokens: Vec<Token>,
    pub status: StreamStatus,
}

impl ChunkOutput {
    fn fault(fault: StreamFault) -> Self {
        ChunkOutput {
            tokens: Vec::new(),
            status: StreamStatus::Error(fault),
        }
    }
}

/// Assembler fed one chunk at a time.
///
/// Text that could still change meaning with more input (a trailing run,
/// an open string or comment, a possible comment start) is held in the
/// [`ParseState`] and assembled once the deciding text arrives, so the
/// concatenated output of a session equals [`lex`](crate::lex) of the
/// concatenated chunks, whatever the chunk boundaries.
#[derive(Clone, Debug, Default)]
pub struct ChunkedLexer {
    config: LexerConfig,
}

impl ChunkedLexer {
    pub fn new(config: LexerConfig) -> Self {
        ChunkedLexer { config }
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Fresh session state.
    pub fn start(&self) -> ParseState {
        ParseState::new()
    }

    /// Assemble `chunk`, the next piece of the session's input.
    ///
    /// With `is_final` set, everything still open is flushed exactly as at
    /// the end of a whole input and the session is finished.
    pub fn process(&self, state: &mut ParseState, chunk: &str, is_final: bool) -> ChunkOutput {
        if state.finished {
            return ChunkOutput::fault(StreamFault::SessionFinished);
        }
        let fits = u32::try_from(state.pending.len() + chunk.len())
            .ok()
            .and_then(|len| state.offset.checked_add(len))
            .is_some();
        if !fits {
            return ChunkOutput::fault(StreamFault::OffsetOverflow);
        }

        let mut text = std::mem::take(&mut state.pending);
        text.push_str(chunk);
        if !is_final && self.extends_run(state, chunk) {
            state.pending = text;
            return finish_chunk(state, chunk, Vec::new(), false);
        }

        let mut tokens = Vec::new();
        let (consumed, run) = {
            let mut engine = Engine::new(&self.config, &text, state.offset, is_final);
            loop {
                match engine.step(state, &mut tokens) {
                    Step::Progress => {}
                    Step::Blocked => break,
                    Step::Exhausted => {
                        if is_final {
                            engine.finish(state, &mut tokens);
                        }
                        break;
                    }
                }
            }
            (engine.mark(), engine.blocked_run())
        };

        state.run = run;
        text.drain(..consumed);
        state.pending = text;
        // Fits: checked above.
        state.offset += u32::try_from(consumed).unwrap_or(0);
        finish_chunk(state, chunk, tokens, is_final)
    }

    /// Whether `chunk` only lengthens the run that fills the pending text.
    ///
    /// The engine would block on the same run again, so the chunk is
    /// appended without classifying the run from its start.
    fn extends_run(&self, state: &ParseState, chunk: &str) -> bool {
        let Some(tag) = state.run else {
            return false;
        };
        token_at(chunk, 0, 0, self.config.symbols())
            .is_some_and(|token| token.tag == tag && token.len as usize == chunk.len())
    }
}

/// Status bookkeeping shared by both paths of `process`.
fn finish_chunk(
    state: &mut ParseState,
    chunk: &str,
    tokens: Vec<Token>,
    is_final: bool,
) -> ChunkOutput {
    let status = if is_final {
        state.finished = true;
        StreamStatus::Complete
    } else if state.is_settled() {
        StreamStatus::Continue
    } else {
        StreamStatus::NeedMoreData
    };
    debug!(
        chunk = chunk.len(),
        tokens = tokens.len(),
        pending = state.pending.len(),
        depth = state.stack.len(),
        ?status,
        "processed chunk"
    );
    ChunkOutput { tokens, status }
}
