//! Pattern definitions and their match order.

use std::sync::Arc;

use crate::selector::Selector;

/// Error building a [`PatternSet`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern name is empty")]
    EmptyName,
    #[error("pattern `{0}` has no alternatives")]
    NoAlternatives(Arc<str>),
    #[error("alternative #{index} of pattern `{pattern}` has no selectors")]
    EmptyAlternative { pattern: Arc<str>, index: usize },
    #[error("pattern `{0}` is defined more than once")]
    DuplicateName(Arc<str>),
}

/// A named set of selector sequences folded into `Composite(name)`.
#[derive(Clone, Debug)]
pub struct PatternDef {
    pub name: Arc<str>,
    /// Higher priorities are tried first.
    pub priority: i32,
    pub alternatives: Vec<Vec<Selector>>,
    /// Skip whitespace between selectors, capturing it into the composite.
    pub skip_whitespace: bool,
}

impl PatternDef {
    pub fn new(name: &str) -> Self {
        PatternDef {
            name: Arc::from(name),
            priority: 0,
            alternatives: Vec::new(),
            skip_whitespace: false,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Add an alternative.
    #[must_use]
    pub fn alternative(mut self, selectors: impl IntoIterator<Item = Selector>) -> Self {
        self.alternatives.push(selectors.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_skip_whitespace(mut self, skip: bool) -> Self {
        self.skip_whitespace = skip;
        self
    }

    /// Selector count of the longest alternative.
    pub fn longest(&self) -> usize {
        self.alternatives.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), PatternError> {
        if self.name.is_empty() {
            return Err(PatternError::EmptyName);
        }
        if self.alternatives.is_empty() {
            return Err(PatternError::NoAlternatives(Arc::clone(&self.name)));
        }
        if let Some(index) = self.alternatives.iter().position(Vec::is_empty) {
            return Err(PatternError::EmptyAlternative {
                pattern: Arc::clone(&self.name),
                index,
            });
        }
        Ok(())
    }
}

/// Validated patterns in match order.
#[derive(Clone, Debug, Default)]
pub struct PatternSet {
    patterns: Vec<PatternDef>,
}

impl PatternSet {
    /// Validate `defs` and order them by priority, then longest
    /// alternative, then declaration order.
    pub fn new(defs: impl IntoIterator<Item = PatternDef>) -> Result<Self, PatternError> {
        let mut patterns: Vec<PatternDef> = Vec::new();
        for def in defs {
            def.validate()?;
            if patterns.iter().any(|p| p.name == def.name) {
                return Err(PatternError::DuplicateName(def.name));
            }
            patterns.push(def);
        }
        // Stable: ties keep declaration order.
        patterns.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.longest().cmp(&a.longest()))
        });
        Ok(PatternSet { patterns })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatternDef> {
        self.patterns.iter()
    }

    pub fn get(&self, name: &str) -> Option<&PatternDef> {
        self.patterns.iter().find(|p| &*p.name == name)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern names in match order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| &*p.name)
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a PatternDef;
    type IntoIter = std::slice::Iter<'a, PatternDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests;
