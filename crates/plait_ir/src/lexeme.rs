//! Shared, read-only text views.
//!
//! A [`Lexeme`] is an `(Arc<str>, start, end)` triple. Cloning is a
//! reference-count bump; the text itself is never copied or mutated. Two
//! lexemes compare equal when their text is equal, regardless of which
//! buffer they point into.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, Range};
use std::sync::Arc;

/// Read-only view into a shared source buffer.
#[derive(Clone)]
pub struct Lexeme {
    buf: Arc<str>,
    start: usize,
    end: usize,
}

impl Lexeme {
    /// View `range` of `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds or does not fall on char
    /// boundaries. Ranges produced by the classifier always do.
    pub fn new(buf: Arc<str>, range: Range<usize>) -> Self {
        assert!(
            buf.get(range.clone()).is_some(),
            "lexeme range {range:?} is not a char-aligned range of a {}-byte buffer",
            buf.len()
        );
        Lexeme {
            buf,
            start: range.start,
            end: range.end,
        }
    }

    /// View the whole of `buf`.
    pub fn whole(buf: Arc<str>) -> Self {
        let end = buf.len();
        Lexeme { buf, start: 0, end }
    }

    /// Copy `text` into a fresh buffer and view all of it.
    pub fn copied(text: &str) -> Self {
        Lexeme::whole(Arc::from(text))
    }

    /// The viewed text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.buf[self.start..self.end]
    }

    /// Sub-view relative to this lexeme.
    ///
    /// # Panics
    ///
    /// Panics if `range` is outside this lexeme or not char-aligned.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Lexeme {
        assert!(range.end <= self.len(), "slice {range:?} outside lexeme");
        Lexeme::new(
            Arc::clone(&self.buf),
            self.start + range.start..self.start + range.end,
        )
    }

    /// Range of this view inside its backing buffer.
    pub fn buffer_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether both lexemes view the same backing buffer.
    pub fn shares_buffer(&self, other: &Lexeme) -> bool {
        Arc::ptr_eq(&self.buf, &other.buf)
    }

    /// Concatenate adjacent views.
    ///
    /// When every part views the same buffer and each part ends where the
    /// next begins, the result is a widened view with no copy. Otherwise
    /// (parts delivered in different stream chunks) the text is copied once
    /// into a new buffer.
    pub fn join(parts: &[&Lexeme]) -> Lexeme {
        let Some((first, rest)) = parts.split_first() else {
            return Lexeme::copied("");
        };
        let contiguous = rest
            .iter()
            .try_fold(*first, |prev, next| {
                (prev.shares_buffer(next) && prev.end == next.start).then_some(*next)
            })
            .is_some();
        if contiguous {
            let end = rest.last().map_or(first.end, |last| last.end);
            return Lexeme {
                buf: Arc::clone(&first.buf),
                start: first.start,
                end,
            };
        }
        let mut text = String::with_capacity(parts.iter().map(|p| p.len()).sum());
        for part in parts {
            text.push_str(part.as_str());
        }
        Lexeme::whole(Arc::from(text))
    }
}

impl Deref for Lexeme {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Lexeme {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Lexeme {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Lexeme {}

impl PartialEq<str> for Lexeme {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Lexeme {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Hash for Lexeme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Debug for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Lexeme {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
