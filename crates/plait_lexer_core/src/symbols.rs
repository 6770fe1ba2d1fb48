//! Configured symbol character set.

/// Set of characters classified as one-character [`Symbol`] tokens.
///
/// ASCII membership is a two-word bitmap lookup; other characters fall back
/// to a sorted list.
///
/// [`Symbol`]: crate::SimpleTag::Symbol
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolSet {
    ascii: [u64; 2],
    other: Vec<char>,
}

impl SymbolSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `c` to the set.
    pub fn insert(&mut self, c: char) {
        if c.is_ascii() {
            let b = c as usize;
            self.ascii[b / 64] |= 1 << (b % 64);
        } else if let Err(at) = self.other.binary_search(&c) {
            self.other.insert(at, c);
        }
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        if c.is_ascii() {
            let b = c as usize;
            self.ascii[b / 64] & (1 << (b % 64)) != 0
        } else {
            self.other.binary_search(&c).is_ok()
        }
    }

    /// Members in ascending order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        (0u8..128)
            .map(char::from)
            .filter(|&c| self.contains(c))
            .chain(self.other.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.ascii.iter().map(|w| w.count_ones() as usize).sum::<usize>() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<char> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = SymbolSet::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl From<&str> for SymbolSet {
    fn from(chars: &str) -> Self {
        chars.chars().collect()
    }
}
