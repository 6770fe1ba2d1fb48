//! Assembler for plait.
//!
//! Turns the classifier's simple tokens into the semantic token tree:
//! blocks, strings, comments, numbers, operators, and in-band `Error`
//! tokens for malformed input. Assembly never fails and never drops text:
//! the concatenated text of the output equals the input.
//!
//! # Execution modes
//!
//! ```text
//!                      ┌─ Assembler (pull, whole input) ─┐
//! &str ─ Classifier ──►│            Engine               │──► Token
//!                      └─ ChunkedLexer (resumable)  ─────┘
//! ```
//!
//! Both modes drive one step machine (`engine`). The chunked mode keeps
//! the machine's state in a [`ParseState`] between calls and stops whenever
//! a decision depends on text it has not seen yet, so its output is
//! identical to the plain mode for every way of splitting the input.

mod assembler;
mod chunked;
mod config;
mod engine;
mod state;

pub use assembler::{lex, lex_shared, try_lex, Assembler};
pub use chunked::{ChunkOutput, ChunkedLexer, StreamFault, StreamStatus};
pub use config::{CommentStyle, ConfigError, LexerConfig, LexerConfigBuilder, DEFAULT_SYMBOLS};
pub use state::{ModeKind, ParseState};
