//! k-token lookahead over the classifier.

use smallvec::SmallVec;

use crate::classifier::Classifier;
use crate::tag::SimpleToken;

/// Pull-based token source with bounded lookahead.
///
/// The assembler needs at most three tokens of lookahead (`1` `.` `5`), so
/// peeked tokens live inline.
#[derive(Clone, Debug)]
pub struct Lookahead<'a> {
    classifier: Classifier<'a>,
    peeked: SmallVec<[SimpleToken; 4]>,
}

impl<'a> Lookahead<'a> {
    pub fn new(classifier: Classifier<'a>) -> Self {
        Lookahead {
            classifier,
            peeked: SmallVec::new(),
        }
    }

    /// The `k`-th unconsumed token (0 = next), classifying as needed.
    pub fn peek(&mut self, k: usize) -> Option<SimpleToken> {
        while self.peeked.len() <= k {
            let token = self.classifier.next_token()?;
            self.peeked.push(token);
        }
        Some(self.peeked[k])
    }

    /// Byte position (in the classified text) of the next unconsumed token.
    pub fn pos(&self) -> usize {
        match self.peeked.first() {
            Some(token) => (token.start - self.classifier.base()) as usize,
            None => self.classifier.pos(),
        }
    }

    /// Drop any lookahead and resume classification at byte `pos`.
    pub fn seek(&mut self, pos: usize) {
        self.peeked.clear();
        self.classifier.seek(pos);
    }

    /// See [`Classifier::may_extend`].
    pub fn may_extend(&self, token: &SimpleToken) -> bool {
        self.classifier.may_extend(token)
    }

    pub fn text(&self) -> &'a str {
        self.classifier.text()
    }

    pub fn base(&self) -> u32 {
        self.classifier.base()
    }
}
