//! Deferred folds applied in one pass.
//!
//! Matching only records which runs to fold; the token vector is rebuilt
//! once at commit, so indices recorded during matching stay valid.

use std::sync::Arc;

use plait_ir::{Lexeme, Token, TokenKind};

#[derive(Clone, Debug)]
struct Fold {
    start: usize,
    len: usize,
    priority: i32,
    name: Arc<str>,
}

/// Pending folds over one token sequence.
#[derive(Clone, Debug, Default)]
pub(crate) struct EditList {
    folds: Vec<Fold>,
}

impl EditList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `len` tokens starting at `start` into `Composite(name)`.
    pub fn fold(&mut self, start: usize, len: usize, priority: i32, name: Arc<str>) {
        if len > 0 {
            self.folds.push(Fold {
                start,
                len,
                priority,
                name,
            });
        }
    }

    /// Apply every fold to `tokens`.
    ///
    /// Folds are applied by position; of two overlapping folds the one
    /// starting first wins, and at equal starts the higher priority wins.
    pub fn commit(mut self, tokens: Vec<Token>) -> Vec<Token> {
        if self.folds.is_empty() {
            return tokens;
        }
        self.folds
            .sort_by(|a, b| a.start.cmp(&b.start).then(b.priority.cmp(&a.priority)));

        let mut out = Vec::with_capacity(tokens.len());
        let mut rest = tokens.into_iter();
        let mut at = 0;
        for fold in self.folds {
            if fold.start < at {
                continue;
            }
            out.extend(rest.by_ref().take(fold.start - at));
            let children: Vec<Token> = rest.by_ref().take(fold.len).collect();
            at = fold.start + children.len();
            if let Some(composite) = composite(fold.name, children) {
                out.push(composite);
            }
        }
        out.extend(rest);
        out
    }
}

/// Wrap `children` (non-empty) in a composite token.
fn composite(name: Arc<str>, children: Vec<Token>) -> Option<Token> {
    let (first, last) = (children.first()?, children.last()?);
    let span = first.span.merge(last.span);
    let parts: Vec<&Lexeme> = children.iter().map(|child| &child.text).collect();
    let text = Lexeme::join(&parts);
    Some(Token::new(TokenKind::Composite { name, children }, span, text))
}
