//! Token predicates.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use plait_ir::{Delimiter, Token, TokenTag};

type Predicate = dyn Fn(&Token) -> bool + Send + Sync;

/// Predicate over a single token.
///
/// Selectors compose: `a | b` (union), `a & b` (intersection) and `!a`
/// (negation) build new selectors without evaluating anything.
#[derive(Clone)]
pub enum Selector {
    /// Token of the given kind.
    Tag(TokenTag),
    /// Token whose text is exactly this.
    Text(Arc<str>),
    /// Block with the given delimiter.
    Block(Delimiter),
    Any,
    Whitespace,
    Union(Box<Selector>, Box<Selector>),
    Intersection(Box<Selector>, Box<Selector>),
    Not(Box<Selector>),
    /// Named user predicate.
    Custom {
        name: Arc<str>,
        predicate: Arc<Predicate>,
    },
}

impl Selector {
    pub fn tag(tag: TokenTag) -> Self {
        Selector::Tag(tag)
    }

    pub fn text(text: &str) -> Self {
        Selector::Text(Arc::from(text))
    }

    pub fn block(delimiter: Delimiter) -> Self {
        Selector::Block(delimiter)
    }

    pub fn custom(
        name: &str,
        predicate: impl Fn(&Token) -> bool + Send + Sync + 'static,
    ) -> Self {
        Selector::Custom {
            name: Arc::from(name),
            predicate: Arc::new(predicate),
        }
    }

    /// Matches tokens either selector matches.
    #[must_use]
    pub fn union(self, other: Selector) -> Self {
        Selector::Union(Box::new(self), Box::new(other))
    }

    /// Matches tokens both selectors match.
    #[must_use]
    pub fn intersection(self, other: Selector) -> Self {
        Selector::Intersection(Box::new(self), Box::new(other))
    }

    /// Matches tokens this selector rejects.
    #[must_use]
    pub fn negate(self) -> Self {
        Selector::Not(Box::new(self))
    }

    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Selector::Tag(tag) => token.tag() == *tag,
            Selector::Text(text) => token.text() == &**text,
            Selector::Block(delimiter) => token.delimiter() == Some(*delimiter),
            Selector::Any => true,
            Selector::Whitespace => token.is_whitespace(),
            Selector::Union(a, b) => a.matches(token) || b.matches(token),
            Selector::Intersection(a, b) => a.matches(token) && b.matches(token),
            Selector::Not(inner) => !inner.matches(token),
            Selector::Custom { predicate, .. } => predicate(token),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(tag) => write!(f, "{tag}"),
            Selector::Text(text) => write!(f, "{text:?}"),
            Selector::Block(delimiter) => {
                write!(f, "Block({}{})", delimiter.open(), delimiter.close())
            }
            Selector::Any => f.write_str("_"),
            Selector::Whitespace => f.write_str("whitespace"),
            Selector::Union(a, b) => write!(f, "({a} | {b})"),
            Selector::Intersection(a, b) => write!(f, "({a} & {b})"),
            Selector::Not(inner) => write!(f, "!{inner}"),
            Selector::Custom { name, .. } => write!(f, "{name}"),
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({self})")
    }
}

impl BitOr for Selector {
    type Output = Selector;

    fn bitor(self, rhs: Selector) -> Selector {
        self.union(rhs)
    }
}

impl BitAnd for Selector {
    type Output = Selector;

    fn bitand(self, rhs: Selector) -> Selector {
        self.intersection(rhs)
    }
}

impl Not for Selector {
    type Output = Selector;

    fn not(self) -> Selector {
        self.negate()
    }
}
