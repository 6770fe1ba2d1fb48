//! Plait IR - the token model shared by every plait crate.
//!
//! - [`Span`]: absolute byte range of a token in the logical input
//! - [`Lexeme`]: read-only view into a shared source buffer
//! - [`Token`] / [`TokenKind`]: the semantic token sum type
//! - [`reconstruct`], [`expand`], [`walk_errors`]: tree walks
//!
//! Token text is never owned mutably. Every [`Lexeme`] points into an
//! `Arc<str>`: the whole source on the plain path, or one chunk buffer on
//! the streaming path.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod lexeme;
mod span;
mod token;
mod walk;

pub use lexeme::Lexeme;
pub use span::{Span, SpanError};
pub use token::{
    CommentKind, Delimiter, LexErrorKind, NumericKind, Quote, Token, TokenKind, TokenTag,
};
pub use walk::{expand, flatten, reconstruct, visit, walk_errors};
