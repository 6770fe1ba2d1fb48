//! Low-level character classifier for plait.
//!
//! Maps text to [`SimpleToken`]s: single-character atoms (delimiters,
//! quotes, backslash, slash, asterisk, dot), newlines, whitespace runs,
//! digit runs, configured symbol characters, and text runs. The classifier
//! is stateless: a token depends only on the characters it covers and the
//! one character after it. It never fails and always covers its input.
//!
//! # Pipeline
//!
//! ```text
//! &str → Classifier → SimpleToken → (plait_lexer) Assembler → Token
//! ```

mod classifier;
mod lookahead;
mod symbols;
mod tag;

pub use classifier::{classify, classify_char, token_at, CharClass, Classifier};
pub use lookahead::Lookahead;
pub use symbols::SymbolSet;
pub use tag::{SimpleTag, SimpleToken};
