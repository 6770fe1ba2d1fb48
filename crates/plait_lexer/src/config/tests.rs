use pretty_assertions::assert_eq;

use super::*;

#[test]
fn default_config() {
    let config = LexerConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.symbols().chars().collect::<String>(), "!#$%&+,-:;<=>?@^|~");
    assert_eq!(
        config.comment_styles(),
        &[CommentStyle::line("//"), CommentStyle::block("/*", "*/")]
    );
    assert!(config.operators().is_empty());
}

#[test]
fn builder_accepts_operators_over_symbols_and_atoms() {
    let config = LexerConfig::builder()
        .operators(["==", "->", "..", "::", "/="])
        .build();
    assert!(config.is_ok());
}

#[test]
fn builder_rejects_empty_comment_start() {
    let err = LexerConfig::builder()
        .comment_style(CommentStyle::line(""))
        .build();
    assert_eq!(err, Err(ConfigError::EmptyCommentStart { index: 2 }));
}

#[test]
fn builder_rejects_empty_comment_end() {
    let err = LexerConfig::builder()
        .comment_styles([CommentStyle::block("(*", "")])
        .build();
    assert_eq!(
        err,
        Err(ConfigError::EmptyCommentEnd {
            start: "(*".to_owned()
        })
    );
}

#[test]
fn builder_rejects_duplicate_comment_start() {
    let err = LexerConfig::builder()
        .comment_style(CommentStyle::line("//"))
        .build();
    assert_eq!(
        err,
        Err(ConfigError::DuplicateCommentStart {
            start: "//".to_owned()
        })
    );
}

#[test]
fn builder_rejects_short_operator() {
    let err = LexerConfig::builder().operators(["+"]).build();
    assert_eq!(
        err,
        Err(ConfigError::OperatorTooShort {
            operator: "+".to_owned()
        })
    );
}

#[test]
fn builder_rejects_operator_with_text_char() {
    let err = LexerConfig::builder().operators(["=a"]).build();
    assert_eq!(
        err,
        Err(ConfigError::OperatorChar {
            operator: "=a".to_owned(),
            ch: 'a'
        })
    );
    assert_eq!(
        err.map(|_| ()).unwrap_err().to_string(),
        "operator `=a` contains `a`, which is neither a symbol nor one of `/ * . \\`"
    );
}

#[test]
fn operator_chars_follow_symbol_set() {
    let err = LexerConfig::builder().symbols("=").operators(["=>"]).build();
    assert_eq!(
        err,
        Err(ConfigError::OperatorChar {
            operator: "=>".to_owned(),
            ch: '>'
        })
    );
}

mod prefix {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> LexerConfig {
        LexerConfig::builder()
            .operators(["==", "===", "=>"])
            .build()
            .unwrap()
    }

    #[test]
    fn longest_match_wins() {
        let config = config();
        assert_eq!(config.operator_at("=== x", true), Prefix::Match(1));
        assert_eq!(config.operator_at("== x", true), Prefix::Match(0));
        assert_eq!(config.operator_at("=> x", true), Prefix::Match(2));
        assert_eq!(config.operator_at("= x", true), Prefix::None);
    }

    #[test]
    fn partial_only_when_more_text_may_follow() {
        let config = config();
        assert_eq!(config.operator_at("=", false), Prefix::Partial);
        assert_eq!(config.operator_at("==", false), Prefix::Partial);
        assert_eq!(config.operator_at("==", true), Prefix::Match(0));
        assert_eq!(config.operator_at("=", true), Prefix::None);
        assert_eq!(config.operator_at("===", false), Prefix::Match(1));
    }

    #[test]
    fn comment_starts() {
        let config = LexerConfig::default();
        assert_eq!(config.comment_at("// x", true), Prefix::Match(0));
        assert_eq!(config.comment_at("/* x", true), Prefix::Match(1));
        assert_eq!(config.comment_at("/", false), Prefix::Partial);
        assert_eq!(config.comment_at("/", true), Prefix::None);
        assert_eq!(config.comment_at("/x", false), Prefix::None);
    }
}
