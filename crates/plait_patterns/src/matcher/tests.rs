use plait_ir::{reconstruct, Delimiter, Span, TokenTag};
use plait_lexer::{lex, LexerConfig};
use pretty_assertions::assert_eq;

use super::*;

fn tokens(source: &str) -> Vec<Token> {
    lex(source, &LexerConfig::default())
}

fn function_call(skip_whitespace: bool) -> PatternMatcher {
    let set = PatternSet::new([PatternDef::new("FunctionCall")
        .alternative([
            Selector::tag(TokenTag::Ident),
            Selector::block(Delimiter::Paren),
        ])
        .with_skip_whitespace(skip_whitespace)])
    .unwrap();
    PatternMatcher::new(set)
}

fn composite_name(token: &Token) -> Option<&str> {
    match &token.kind {
        TokenKind::Composite { name, .. } => Some(&**name),
        _ => None,
    }
}

#[test]
fn function_call_without_space() {
    let out = function_call(true).apply(&tokens("foo(a, b)"));
    assert_eq!(out.len(), 1);
    assert_eq!(composite_name(&out[0]), Some("FunctionCall"));
    assert_eq!(out[0].children().len(), 2);
    assert_eq!(out[0].text(), "foo(a, b)");
    assert_eq!(out[0].span, Span::new(0, 9));
}

#[test]
fn function_call_captures_skipped_whitespace() {
    let out = function_call(true).apply(&tokens("foo (a, b)"));
    assert_eq!(out.len(), 1);
    let tags: Vec<TokenTag> = out[0].children().iter().map(Token::tag).collect();
    assert_eq!(
        tags,
        vec![TokenTag::Ident, TokenTag::Whitespace, TokenTag::Block]
    );
    assert_eq!(out[0].text(), "foo (a, b)");
}

#[test]
fn whitespace_blocks_match_when_not_skipped() {
    let input = tokens("foo (");
    let (out, trace) = function_call(false).apply_with_trace(&input);
    assert_eq!(out, input);

    let near = trace.near_misses();
    assert_eq!(near.len(), 1);
    let miss = near[0];
    assert_eq!(miss.position, 0);
    assert_eq!(
        miss.outcome,
        Outcome::Failed {
            reason: FailureReason::SelectorMismatch,
            selector: 1,
        }
    );
    assert_eq!(miss.steps[1].tag, TokenTag::Whitespace);
    assert_eq!(miss.steps[1].description, "Block(())");
    assert_eq!(
        miss.to_string(),
        "FunctionCall#0 at 0 (depth 0): selector 1 `Block(())` rejected Whitespace at 3..4"
    );
}

#[test]
fn trace_records_every_position() {
    let input = tokens("a b");
    let (_, trace) = function_call(true).apply_with_trace(&input);
    // One attempt per token position.
    assert_eq!(trace.len(), 3);
    let exhausted = trace
        .attempts()
        .iter()
        .find(|a| a.position == 2)
        .map(|a| a.outcome);
    assert_eq!(
        exhausted,
        Some(Outcome::Failed {
            reason: FailureReason::InputExhausted,
            selector: 1,
        })
    );
    assert!(trace.matches().next().is_none());
}

#[test]
fn trace_does_not_change_result() {
    let input = tokens("f(x) g (y) [h(z)]");
    let matcher = function_call(true);
    let (traced, trace) = matcher.apply_with_trace(&input);
    assert_eq!(traced, matcher.apply(&input));
    assert_eq!(trace.match_counts().get("FunctionCall"), Some(&3));
}

#[test]
fn matches_inside_blocks() {
    let out = function_call(true).apply(&tokens("[f(x), {g(y)}]"));
    assert_eq!(out.len(), 1);
    let list = &out[0];
    assert_eq!(list.delimiter(), Some(Delimiter::Bracket));
    assert_eq!(composite_name(&list.children()[0]), Some("FunctionCall"));
    let brace = &list.children()[3];
    assert_eq!(composite_name(&brace.children()[0]), Some("FunctionCall"));
    assert_eq!(reconstruct(&out), "[f(x), {g(y)}]");
}

#[test]
fn nested_call_arguments() {
    let out = function_call(true).apply(&tokens("f(g(x))"));
    let call = &out[0];
    let args = &call.children()[1];
    assert_eq!(composite_name(&args.children()[0]), Some("FunctionCall"));
    assert_eq!(args.children()[0].text(), "g(x)");
}

#[test]
fn priority_and_alternatives() {
    let set = PatternSet::new([
        PatternDef::new("Assign").alternative([
            Selector::tag(TokenTag::Ident),
            Selector::text("="),
            Selector::Any,
        ]),
        PatternDef::new("Word")
            .with_priority(-1)
            .alternative([Selector::tag(TokenTag::Integer)])
            .alternative([Selector::tag(TokenTag::Ident)]),
    ])
    .unwrap();
    let matcher = PatternMatcher::new(set);
    let out = matcher.apply(&tokens("x=1 y"));
    let names: Vec<Option<&str>> = out.iter().map(composite_name).collect();
    assert_eq!(names, vec![Some("Assign"), None, Some("Word")]);
    assert_eq!(out[0].text(), "x=1");
}

#[test]
fn parallel_matches_sequential() {
    let source = "{a(1)} [b (2)] (c(d(3))) {e} f(4) [[g(5)]]";
    let input = tokens(source);
    let sequential = function_call(true).apply_with_trace(&input);
    let parallel = function_call(true)
        .with_parallel(true)
        .apply_with_trace(&input);
    assert_eq!(parallel.0, sequential.0);
    assert_eq!(parallel.1, sequential.1);
    assert_eq!(reconstruct(&parallel.0), source);
}

#[test]
fn empty_pattern_set_is_identity() {
    let input = tokens("a (b) c");
    assert_eq!(PatternMatcher::default().apply(&input), input);
}
