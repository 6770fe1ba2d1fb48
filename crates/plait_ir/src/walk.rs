//! Walks over token trees.
//!
//! Every recursive step goes through `ensure_sufficient_stack`: blocks can
//! nest as deep as the input does.

use plait_stack::ensure_sufficient_stack;

use crate::Token;

/// Concatenate the text of top-level tokens.
///
/// For assembler output this reproduces the input exactly.
pub fn reconstruct(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.iter().map(|t| t.text.len()).sum());
    for token in tokens {
        out.push_str(token.text());
    }
    out
}

/// Rebuild the text from leaves, expanding every container in
/// delimiter-inclusive order.
///
/// A container contributes the text before its first child (an opening
/// delimiter), its expanded children, then the text after its last child
/// (a closing delimiter). Equal to [`reconstruct`] whenever containers are
/// consistent with their children.
pub fn expand(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        expand_into(token, &mut out);
    }
    out
}

fn expand_into(token: &Token, out: &mut String) {
    ensure_sufficient_stack(|| {
        let children = token.children();
        let (Some(first), Some(last)) = (children.first(), children.last()) else {
            out.push_str(token.text());
            return;
        };
        let text = token.text();
        let head = (first.span.start - token.span.start) as usize;
        let tail = (last.span.end - token.span.start) as usize;
        out.push_str(&text[..head]);
        for child in children {
            expand_into(child, out);
        }
        out.push_str(&text[tail..]);
    });
}

/// Call `f` on every token, depth-first, parents before children.
///
/// `depth` is 0 for the tokens in `tokens`.
pub fn visit<'a>(tokens: &'a [Token], f: &mut impl FnMut(&'a Token, usize)) {
    fn go<'a>(tokens: &'a [Token], depth: usize, f: &mut impl FnMut(&'a Token, usize)) {
        for token in tokens {
            f(token, depth);
            ensure_sufficient_stack(|| go(token.children(), depth + 1, &mut *f));
        }
    }
    go(tokens, 0, f);
}

/// Leaf tokens in source order.
pub fn flatten(tokens: &[Token]) -> Vec<&Token> {
    let mut leaves = Vec::new();
    visit(tokens, &mut |token, _| {
        if token.children().is_empty() {
            leaves.push(token);
        }
    });
    leaves
}

/// Every error token at any depth, outermost first.
pub fn walk_errors(tokens: &[Token]) -> Vec<&Token> {
    let mut errors = Vec::new();
    visit(tokens, &mut |token, _| {
        if token.is_error() {
            errors.push(token);
        }
    });
    errors
}
