//! Pattern matching over plait token trees.
//!
//! A [`PatternDef`] names one or more alternatives, each a sequence of
//! [`Selector`]s. The [`PatternMatcher`] walks a token sequence and folds
//! every run matching a pattern into a `Composite` token, recursing into
//! block contents so composites appear at any depth.
//!
//! # Match order
//!
//! At each position, patterns are tried by priority (highest first), then
//! by their longest alternative (longest first), then in declaration order.
//! Within a pattern, alternatives are tried as declared. The first full
//! match wins; without a match the position advances by one token.
//!
//! # Diagnostics
//!
//! [`PatternMatcher::apply_with_trace`] also returns a [`MatchTrace`] of
//! every attempt with per-selector outcomes. Its
//! [`near_misses`](MatchTrace::near_misses) are failed attempts that got
//! past at least one selector.

mod edits;
mod matcher;
mod pattern;
mod selector;
mod trace;

pub use matcher::PatternMatcher;
pub use pattern::{PatternDef, PatternError, PatternSet};
pub use selector::Selector;
pub use trace::{Attempt, FailureReason, MatchTrace, Outcome, SelectorStep};
