//! Plait: a lossless, nesting-aware tokenizer.
//!
//! ```text
//! bytes ─ ChunkDecoder ─┐
//!                       ├─ Classifier ─ Assembler / ChunkedLexer ─ PatternMatcher
//! &str ─────────────────┘
//! ```
//!
//! - [`lex`] / [`tokenize`]: whole input to a token tree
//! - [`ChunkedLexer`]: the same output, one chunk at a time
//! - [`drive`]: bytes from any reader through a chunked session
//! - [`PatternMatcher`]: fold selector sequences into composites
//!
//! Every token keeps its exact text, so [`reconstruct`] of any output
//! returns the input.

use std::sync::Once;

pub use plait_ir::{
    expand, flatten, reconstruct, visit, walk_errors, CommentKind, Delimiter, LexErrorKind,
    Lexeme, NumericKind, Quote, Span, SpanError, Token, TokenKind, TokenTag,
};
pub use plait_lexer::{
    lex, lex_shared, try_lex, Assembler, ChunkOutput, ChunkedLexer, CommentStyle, ConfigError,
    LexerConfig, LexerConfigBuilder, ModeKind, ParseState, StreamFault, StreamStatus,
};
pub use plait_lexer_core::{classify, Classifier, SimpleTag, SimpleToken, SymbolSet};
pub use plait_patterns::{
    Attempt, FailureReason, MatchTrace, Outcome, PatternDef, PatternError, PatternMatcher,
    PatternSet, Selector, SelectorStep,
};
pub use plait_stream::{
    drive, read_all, ChunkDecoder, DriveSummary, Encoding, StreamError, StreamOptions,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; later calls are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Tokenize `source` with the default configuration.
pub fn tokenize(source: &str) -> Vec<Token> {
    lex(source, &LexerConfig::default())
}

/// Tokenize `source`, then fold `patterns` over the result.
pub fn tokenize_with_patterns(
    source: &str,
    config: &LexerConfig,
    patterns: &PatternMatcher,
) -> Vec<Token> {
    let tokens = lex(source, config);
    tracing::debug!(tokens = tokens.len(), "tokenized");
    patterns.apply(&tokens)
}
