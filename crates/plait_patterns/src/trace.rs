//! Match diagnostics.

use std::fmt;
use std::sync::Arc;

use plait_ir::{Span, TokenTag};
use rustc_hash::FxHashMap;

/// Why an attempt failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// The token at the selector's position was rejected.
    SelectorMismatch,
    /// The sequence ran out of tokens before the selector.
    InputExhausted,
}

/// One selector evaluated against one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorStep {
    /// Index of the selector in its alternative.
    pub selector: usize,
    /// Rendered selector, e.g. `Block(())`.
    pub description: String,
    pub tag: TokenTag,
    pub span: Span,
    pub passed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Matched {
        /// Tokens folded, captured whitespace included.
        consumed: usize,
    },
    Failed {
        reason: FailureReason,
        /// Index of the failing selector.
        selector: usize,
    },
}

/// One (pattern, alternative, position) attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    pub pattern: Arc<str>,
    pub alternative: usize,
    /// Index of the first token in its sequence.
    pub position: usize,
    /// Absolute offset of that token.
    pub offset: u32,
    /// Block nesting depth of the sequence; 0 at top level.
    pub depth: usize,
    pub steps: Vec<SelectorStep>,
    pub outcome: Outcome,
}

impl Attempt {
    pub fn is_match(&self) -> bool {
        matches!(self.outcome, Outcome::Matched { .. })
    }

    /// Selectors that passed before the outcome was decided.
    pub fn passed(&self) -> usize {
        self.steps.iter().filter(|step| step.passed).count()
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{} at {} (depth {}): ",
            self.pattern, self.alternative, self.offset, self.depth
        )?;
        match self.outcome {
            Outcome::Matched { consumed } => write!(f, "matched {consumed} tokens"),
            Outcome::Failed {
                reason: FailureReason::InputExhausted,
                selector,
            } => write!(f, "input exhausted before selector {selector}"),
            Outcome::Failed {
                reason: FailureReason::SelectorMismatch,
                selector,
            } => match self.steps.last() {
                Some(step) => write!(
                    f,
                    "selector {selector} `{}` rejected {} at {}",
                    step.description, step.tag, step.span
                ),
                None => write!(f, "selector {selector} rejected"),
            },
        }
    }
}

/// Every attempt made by one [`apply_with_trace`] call.
///
/// [`apply_with_trace`]: crate::PatternMatcher::apply_with_trace
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchTrace {
    attempts: Vec<Attempt>,
}

impl MatchTrace {
    pub(crate) fn new(attempts: Vec<Attempt>) -> Self {
        MatchTrace { attempts }
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Successful attempts.
    pub fn matches(&self) -> impl Iterator<Item = &Attempt> {
        self.attempts.iter().filter(|a| a.is_match())
    }

    /// Failed attempts that passed at least one selector.
    pub fn near_misses(&self) -> Vec<&Attempt> {
        self.attempts
            .iter()
            .filter(|a| !a.is_match() && a.passed() > 0)
            .collect()
    }

    /// Number of matches per pattern name.
    pub fn match_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for attempt in self.matches() {
            *counts.entry(&*attempt.pattern).or_insert(0) += 1;
        }
        counts
    }
}
