use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;

fn leaf(src: &Arc<str>, kind: TokenKind, range: std::ops::Range<usize>) -> Token {
    Token::new(
        kind,
        Span::try_from_range(range.clone()).unwrap_or_default(),
        Lexeme::new(Arc::clone(src), range),
    )
}

#[test]
fn delimiter_pairs() {
    for delimiter in [Delimiter::Brace, Delimiter::Bracket, Delimiter::Paren] {
        assert_eq!(Delimiter::from_open(delimiter.open()), Some(delimiter));
    }
    assert_eq!(Delimiter::from_open(')'), None);
}

#[test]
fn error_messages_reference_delimiter() {
    assert_eq!(
        LexErrorKind::UnclosedDelimiter(Delimiter::Brace).to_string(),
        "unclosed delimiter `{`"
    );
    assert_eq!(
        LexErrorKind::StrayCloser(Delimiter::Paren).to_string(),
        "unexpected closing delimiter `)`"
    );
    assert_eq!(
        LexErrorKind::UnterminatedComment.to_string(),
        "unterminated block comment"
    );
}

#[test]
fn tag_matches_kind() {
    assert_eq!(TokenKind::Ident.tag(), TokenTag::Ident);
    assert_eq!(
        TokenKind::Numeric(NumericKind::Float).tag(),
        TokenTag::Float
    );
    assert_eq!(TokenKind::String(Quote::Single).tag(), TokenTag::String);
    assert_eq!(TokenTag::Composite.to_string(), "Composite");
}

#[test]
fn tag_is_one_byte() {
    assert_eq!(std::mem::size_of::<TokenTag>(), 1);
}

#[test]
fn block_inner_text() {
    let src: Arc<str> = Arc::from("(a)");
    let inner = leaf(&src, TokenKind::Ident, 1..2);
    let block = leaf(
        &src,
        TokenKind::Block {
            delimiter: Delimiter::Paren,
            children: vec![inner],
        },
        0..3,
    );
    assert_eq!(block.inner_text(), Some("a"));
    assert_eq!(block.delimiter(), Some(Delimiter::Paren));
    assert_eq!(block.children().len(), 1);
}

#[test]
fn empty_block_inner_text() {
    let src: Arc<str> = Arc::from("{}");
    let block = leaf(
        &src,
        TokenKind::Block {
            delimiter: Delimiter::Brace,
            children: Vec::new(),
        },
        0..2,
    );
    assert_eq!(block.inner_text(), Some(""));
}

#[test]
fn string_value_keeps_escapes() {
    let src: Arc<str> = Arc::from(r#""a\"b""#);
    let string = leaf(&src, TokenKind::String(Quote::Double), 0..src.len());
    assert_eq!(string.string_value(), Some(r#"a\"b"#));
    assert_eq!(string.inner_text(), None);
}

#[test]
fn newline_detection() {
    let src: Arc<str> = Arc::from(" \r\n");
    assert!(!leaf(&src, TokenKind::Whitespace, 0..1).is_newline());
    assert!(leaf(&src, TokenKind::Whitespace, 1..3).is_newline());
}

#[test]
fn error_count_includes_payload() {
    let src: Arc<str> = Arc::from("{ }");
    let stray = leaf(
        &src,
        TokenKind::Error {
            kind: LexErrorKind::StrayCloser(Delimiter::Brace),
            children: Vec::new(),
        },
        2..3,
    );
    let unclosed = leaf(
        &src,
        TokenKind::Error {
            kind: LexErrorKind::UnclosedDelimiter(Delimiter::Brace),
            children: vec![leaf(&src, TokenKind::Whitespace, 1..2), stray],
        },
        0..3,
    );
    assert_eq!(unclosed.error_count(), 2);
    assert_eq!(
        unclosed.error_message().as_deref(),
        Some("unclosed delimiter `{`")
    );
}

#[test]
fn debug_format_leaf() {
    let src: Arc<str> = Arc::from("foo");
    let token = leaf(&src, TokenKind::Ident, 0..3);
    assert_eq!(format!("{token:?}"), r#"Ident @ 0..3 "foo""#);
}

#[test]
fn deep_trees_clone_compare_hash_and_drop() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let src: Arc<str> = Arc::from("(x");
    let mut token = leaf(&src, TokenKind::Ident, 1..2);
    for _ in 0..100_000 {
        let kind = TokenKind::Error {
            kind: LexErrorKind::UnclosedDelimiter(Delimiter::Paren),
            children: vec![token],
        };
        token = leaf(&src, kind, 0..2);
    }
    let copy = token.clone();
    assert!(copy == token);
    assert_eq!(copy.error_count(), 100_000);

    let hash = |token: &Token| {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        hasher.finish()
    };
    assert_eq!(hash(&copy), hash(&token));
    assert!(format!("{copy:?}").starts_with("Error(UnclosedDelimiter(Paren)) @ 0..2 [Error("));
    drop(copy);
    drop(token);
}
