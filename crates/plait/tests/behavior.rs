//! End-to-end behavior of the public surface.

use std::io::Cursor;
use std::ops::ControlFlow;

use plait::{
    drive, read_all, reconstruct, tokenize, tokenize_with_patterns, ChunkedLexer, Delimiter,
    LexErrorKind, LexerConfig, NumericKind, Outcome, PatternDef, PatternMatcher, PatternSet,
    Selector, Span, StreamOptions, TokenKind, TokenTag,
};
use pretty_assertions::assert_eq;

#[test]
fn unclosed_and_stray_delimiters() {
    let open = tokenize("{");
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].span, Span::new(0, 1));
    assert!(matches!(
        open[0].kind,
        TokenKind::Error {
            kind: LexErrorKind::UnclosedDelimiter(Delimiter::Brace),
            ..
        }
    ));

    let close = tokenize("}");
    assert_eq!(close.len(), 1);
    assert!(matches!(
        close[0].kind,
        TokenKind::Error {
            kind: LexErrorKind::StrayCloser(Delimiter::Brace),
            ..
        }
    ));
}

#[test]
fn numeric_forms() {
    let kinds = |s: &str| -> Vec<TokenKind> { tokenize(s).into_iter().map(|t| t.kind.clone()).collect() };
    assert_eq!(kinds("123"), vec![TokenKind::Numeric(NumericKind::Integer)]);
    assert_eq!(kinds("123.45"), vec![TokenKind::Numeric(NumericKind::Float)]);
    assert_eq!(kinds(".5"), vec![TokenKind::Numeric(NumericKind::Float)]);
    assert_eq!(
        kinds("5."),
        vec![TokenKind::Numeric(NumericKind::Integer), TokenKind::Symbol]
    );
}

#[test]
fn strings_and_comments() {
    let string = tokenize("\"a\\\"b\"");
    assert_eq!(string.len(), 1);
    assert_eq!(string[0].string_value(), Some("a\\\"b"));

    let tags: Vec<TokenTag> = tokenize("// hi\nx").iter().map(|t| t.tag()).collect();
    assert_eq!(
        tags,
        vec![TokenTag::Comment, TokenTag::Whitespace, TokenTag::Ident]
    );

    let comment = tokenize("/* a");
    assert_eq!(comment.len(), 1);
    assert!(comment[0].is_error());
    assert_eq!(comment[0].text(), "/* a");
}

#[test]
fn reader_to_patterns() {
    let source = "print(x) // call\nlog (y, z)\n";
    let lexer = ChunkedLexer::default();
    let options = StreamOptions::default().chunk_size(5);
    let tokens = read_all(&lexer, Cursor::new(source), &options).unwrap();
    assert_eq!(tokens, tokenize(source));

    let set = PatternSet::new([PatternDef::new("Call")
        .alternative([
            Selector::tag(TokenTag::Ident),
            Selector::block(Delimiter::Paren),
        ])
        .with_skip_whitespace(true)])
    .unwrap();
    let matcher = PatternMatcher::new(set);
    let folded = matcher.apply(&tokens);
    let calls: Vec<&str> = folded
        .iter()
        .filter(|t| t.tag() == TokenTag::Composite)
        .map(|t| t.text())
        .collect();
    assert_eq!(calls, vec!["print(x)", "log (y, z)"]);
    assert_eq!(reconstruct(&folded), source);
    assert_eq!(
        tokenize_with_patterns(source, &LexerConfig::default(), &matcher),
        folded
    );
}

#[test]
fn near_miss_report() {
    let set = PatternSet::new([PatternDef::new("FunctionCall").alternative([
        Selector::tag(TokenTag::Ident),
        Selector::block(Delimiter::Paren),
    ])])
    .unwrap();
    let (out, trace) = PatternMatcher::new(set).apply_with_trace(&tokenize("foo ("));
    assert!(out.iter().all(|t| t.tag() != TokenTag::Composite));
    let misses = trace.near_misses();
    assert_eq!(misses.len(), 1);
    assert!(matches!(
        misses[0].outcome,
        Outcome::Failed { selector: 1, .. }
    ));
}

#[test]
fn driver_stops_when_sink_breaks() {
    let lexer = ChunkedLexer::default();
    let options = StreamOptions::default().chunk_size(3);
    let mut seen = Vec::new();
    let summary = drive(&lexer, Cursor::new("a; b; c; d;"), &options, |batch| {
        seen.extend(batch);
        if seen.len() >= 3 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .unwrap();
    assert!(summary.cancelled);
    assert!(summary.bytes < 11);
    assert!("a; b; c; d;".starts_with(&reconstruct(&seen)));
}
