//! Folding matched runs into composites.

use plait_ir::{Token, TokenKind};
use plait_stack::ensure_sufficient_stack;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::edits::EditList;
use crate::pattern::{PatternDef, PatternSet};
use crate::selector::Selector;
use crate::trace::{Attempt, FailureReason, MatchTrace, Outcome, SelectorStep};

/// Applies a [`PatternSet`] to token sequences.
#[derive(Clone, Debug, Default)]
pub struct PatternMatcher {
    set: PatternSet,
    parallel: bool,
}

impl PatternMatcher {
    pub fn new(set: PatternSet) -> Self {
        PatternMatcher {
            set,
            parallel: false,
        }
    }

    /// Match the contents of sibling blocks on the rayon pool. The result
    /// is identical either way.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.set
    }

    /// Fold every matched run of `tokens`, at every depth.
    pub fn apply(&self, tokens: &[Token]) -> Vec<Token> {
        let out = self.level(tokens, 0, None);
        debug!(tokens = tokens.len(), out = out.len(), "patterns applied");
        out
    }

    /// [`apply`](Self::apply), recording every attempt.
    pub fn apply_with_trace(&self, tokens: &[Token]) -> (Vec<Token>, MatchTrace) {
        let mut attempts = Vec::new();
        let out = self.level(tokens, 0, Some(&mut attempts));
        debug!(
            tokens = tokens.len(),
            attempts = attempts.len(),
            "patterns applied with trace"
        );
        (out, MatchTrace::new(attempts))
    }

    /// Match one sequence: block contents first, then this level.
    fn level(
        &self,
        tokens: &[Token],
        depth: usize,
        mut attempts: Option<&mut Vec<Attempt>>,
    ) -> Vec<Token> {
        ensure_sufficient_stack(|| {
            let recording = attempts.is_some();
            let blocks = tokens
                .iter()
                .filter(|t| matches!(t.kind, TokenKind::Block { .. }))
                .count();
            let descended: Vec<(Token, Vec<Attempt>)> = if self.parallel && blocks > 1 {
                tokens
                    .par_iter()
                    .map(|token| self.descend(token, depth, recording))
                    .collect()
            } else {
                tokens
                    .iter()
                    .map(|token| self.descend(token, depth, recording))
                    .collect()
            };

            let mut working = Vec::with_capacity(descended.len());
            for (token, inner) in descended {
                working.push(token);
                if let Some(attempts) = attempts.as_deref_mut() {
                    attempts.extend(inner);
                }
            }

            let mut edits = EditList::new();
            let mut pos = 0;
            while pos < working.len() {
                match self.match_at(&working, pos, depth, attempts.as_deref_mut()) {
                    Some((def, consumed)) => {
                        let offset = working[pos].span.start;
                        trace!(pattern = %def.name, offset, depth, "matched");
                        edits.fold(pos, consumed, def.priority, def.name.clone());
                        pos += consumed;
                    }
                    None => pos += 1,
                }
            }
            edits.commit(working)
        })
    }

    /// Rebuild a block with its contents matched.
    fn descend(&self, token: &Token, depth: usize, recording: bool) -> (Token, Vec<Attempt>) {
        let TokenKind::Block {
            delimiter,
            children,
        } = &token.kind
        else {
            return (token.clone(), Vec::new());
        };
        let mut attempts = Vec::new();
        let children = self.level(children, depth + 1, recording.then_some(&mut attempts));
        let block = Token::new(
            TokenKind::Block {
                delimiter: *delimiter,
                children,
            },
            token.span,
            token.text.clone(),
        );
        (block, attempts)
    }

    /// First pattern alternative matching at `pos`, with the token count.
    fn match_at(
        &self,
        tokens: &[Token],
        pos: usize,
        depth: usize,
        mut attempts: Option<&mut Vec<Attempt>>,
    ) -> Option<(&PatternDef, usize)> {
        for def in &self.set {
            for (index, alternative) in def.alternatives.iter().enumerate() {
                let mut steps = Vec::new();
                let record = attempts.is_some().then_some(&mut steps);
                let result = match_sequence(alternative, def.skip_whitespace, tokens, pos, record);
                if let Some(attempts) = attempts.as_deref_mut() {
                    attempts.push(Attempt {
                        pattern: def.name.clone(),
                        alternative: index,
                        position: pos,
                        offset: tokens[pos].span.start,
                        depth,
                        steps,
                        outcome: match result {
                            Ok(consumed) => Outcome::Matched { consumed },
                            Err((reason, selector)) => Outcome::Failed { reason, selector },
                        },
                    });
                }
                if let Ok(consumed) = result {
                    return Some((def, consumed));
                }
            }
        }
        None
    }
}

/// Match `selectors` against `tokens[pos..]`.
///
/// The first selector applies to `tokens[pos]` itself. With `skip_whitespace`,
/// whitespace before each later selector is stepped over and counted in the
/// result.
fn match_sequence(
    selectors: &[Selector],
    skip_whitespace: bool,
    tokens: &[Token],
    pos: usize,
    mut steps: Option<&mut Vec<SelectorStep>>,
) -> Result<usize, (FailureReason, usize)> {
    let mut at = pos;
    for (index, selector) in selectors.iter().enumerate() {
        if skip_whitespace && index > 0 {
            while tokens.get(at).is_some_and(Token::is_whitespace) {
                at += 1;
            }
        }
        let Some(token) = tokens.get(at) else {
            return Err((FailureReason::InputExhausted, index));
        };
        let passed = selector.matches(token);
        if let Some(steps) = steps.as_deref_mut() {
            steps.push(SelectorStep {
                selector: index,
                description: selector.to_string(),
                tag: token.tag(),
                span: token.span,
                passed,
            });
        }
        if !passed {
            return Err((FailureReason::SelectorMismatch, index));
        }
        at += 1;
    }
    Ok(at - pos)
}

#[cfg(test)]
mod tests;
