use plait_ir::{Delimiter, TokenTag};
use pretty_assertions::assert_eq;

use super::*;

fn ident() -> Selector {
    Selector::tag(TokenTag::Ident)
}

#[test]
fn order_by_priority_then_length_then_declaration() {
    let set = PatternSet::new([
        PatternDef::new("Short").alternative([ident()]),
        PatternDef::new("Long").alternative([ident(), ident(), ident()]),
        PatternDef::new("Urgent")
            .with_priority(5)
            .alternative([ident()]),
        PatternDef::new("AlsoShort").alternative([Selector::Any]),
        PatternDef::new("Mixed")
            .alternative([ident()])
            .alternative([ident(), Selector::block(Delimiter::Paren)]),
    ])
    .unwrap();
    assert_eq!(
        set.names().collect::<Vec<_>>(),
        vec!["Urgent", "Long", "Mixed", "Short", "AlsoShort"]
    );
    assert_eq!(set.len(), 5);
    assert_eq!(set.get("Mixed").map(PatternDef::longest), Some(2));
}

#[test]
fn rejects_invalid_definitions() {
    assert_eq!(
        PatternSet::new([PatternDef::new("").alternative([ident()])]).unwrap_err(),
        PatternError::EmptyName
    );
    assert_eq!(
        PatternSet::new([PatternDef::new("Nothing")]).unwrap_err(),
        PatternError::NoAlternatives(Arc::from("Nothing"))
    );
    let err = PatternSet::new([PatternDef::new("Hole")
        .alternative([ident()])
        .alternative([])])
    .unwrap_err();
    assert_eq!(err.to_string(), "alternative #1 of pattern `Hole` has no selectors");
    assert_eq!(
        PatternSet::new([
            PatternDef::new("Twice").alternative([ident()]),
            PatternDef::new("Twice").alternative([Selector::Any]),
        ])
        .unwrap_err(),
        PatternError::DuplicateName(Arc::from("Twice"))
    );
}

#[test]
fn empty_set() {
    let set = PatternSet::new([]).unwrap();
    assert!(set.is_empty());
    assert!(set.get("x").is_none());
}
