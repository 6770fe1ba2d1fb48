//! Lexer configuration.
//!
//! Three knobs shape assembly beyond the fixed atoms:
//!
//! - **symbols**: characters classified as one-character `Symbol` tokens
//!   instead of being folded into text runs
//! - **comment styles**: start delimiter plus optional end delimiter; a
//!   style without an end delimiter runs to the end of the line
//! - **operators**: multi-character sequences folded into one `Operator`
//!   token (longest match wins)
//!
//! Comment starts and operators are recognized only where a token would
//! start. Configurations are validated once, at build time; the engine
//! relies on every delimiter and operator being non-empty.

use plait_lexer_core::SymbolSet;

/// Symbol characters of the default configuration.
pub const DEFAULT_SYMBOLS: &str = "+-%=<>!&|^~?:;,@#$";

/// Atoms that may appear inside an operator besides configured symbols.
const OPERATOR_ATOMS: &[char] = &['/', '*', '.', '\\'];

/// Error building a [`LexerConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("comment style #{index} has an empty start delimiter")]
    EmptyCommentStart { index: usize },
    #[error("comment style `{start}` has an empty end delimiter")]
    EmptyCommentEnd { start: String },
    #[error("comment start `{start}` is configured more than once")]
    DuplicateCommentStart { start: String },
    #[error("operator `{operator}` must be at least two characters long")]
    OperatorTooShort { operator: String },
    #[error("operator `{operator}` contains `{ch}`, which is neither a symbol nor one of `/ * . \\`")]
    OperatorChar { operator: String, ch: char },
}

/// One comment syntax.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct CommentStyle {
    pub start: String,
    /// `None` for comments that end at the next newline.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<String>,
}

impl CommentStyle {
    /// Comment running to the end of the line.
    pub fn line(start: impl Into<String>) -> Self {
        CommentStyle {
            start: start.into(),
            end: None,
        }
    }

    /// Comment closed by `end`.
    pub fn block(start: impl Into<String>, end: impl Into<String>) -> Self {
        CommentStyle {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    pub fn is_line(&self) -> bool {
        self.end.is_none()
    }
}

/// Outcome of matching configured sequences at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Prefix {
    /// Longest full match: index of the matched entry.
    Match(usize),
    /// The remaining text is a strict prefix of some entry and more text
    /// may follow.
    Partial,
    None,
}

/// Longest entry of `candidates` that `rest` starts with.
fn match_prefix<'a>(
    candidates: impl Iterator<Item = &'a str>,
    rest: &str,
    is_final: bool,
) -> Prefix {
    let mut best: Option<(usize, usize)> = None;
    for (index, candidate) in candidates.enumerate() {
        if rest.starts_with(candidate) {
            if best.map_or(true, |(_, len)| candidate.len() > len) {
                best = Some((index, candidate.len()));
            }
        } else if !is_final && candidate.len() > rest.len() && candidate.starts_with(rest) {
            return Prefix::Partial;
        }
    }
    best.map_or(Prefix::None, |(index, _)| Prefix::Match(index))
}

/// Validated lexer configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ConfigFile"))]
pub struct LexerConfig {
    symbols: SymbolSet,
    comment_styles: Vec<CommentStyle>,
    operators: Vec<String>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            symbols: SymbolSet::from(DEFAULT_SYMBOLS),
            comment_styles: vec![CommentStyle::line("//"), CommentStyle::block("/*", "*/")],
            operators: Vec::new(),
        }
    }
}

impl LexerConfig {
    /// Builder starting from the default configuration.
    pub fn builder() -> LexerConfigBuilder {
        LexerConfigBuilder {
            config: LexerConfig::default(),
        }
    }

    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    pub fn comment_styles(&self) -> &[CommentStyle] {
        &self.comment_styles
    }

    pub fn operators(&self) -> &[String] {
        &self.operators
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, style) in self.comment_styles.iter().enumerate() {
            if style.start.is_empty() {
                return Err(ConfigError::EmptyCommentStart { index });
            }
            if style.end.as_deref() == Some("") {
                return Err(ConfigError::EmptyCommentEnd {
                    start: style.start.clone(),
                });
            }
            if self.comment_styles[..index]
                .iter()
                .any(|earlier| earlier.start == style.start)
            {
                return Err(ConfigError::DuplicateCommentStart {
                    start: style.start.clone(),
                });
            }
        }
        for operator in &self.operators {
            if operator.chars().count() < 2 {
                return Err(ConfigError::OperatorTooShort {
                    operator: operator.clone(),
                });
            }
            if let Some(ch) = operator
                .chars()
                .find(|&c| !self.symbols.contains(c) && !OPERATOR_ATOMS.contains(&c))
            {
                return Err(ConfigError::OperatorChar {
                    operator: operator.clone(),
                    ch,
                });
            }
        }
        Ok(())
    }

    /// Comment style starting at `rest`.
    pub(crate) fn comment_at(&self, rest: &str, is_final: bool) -> Prefix {
        match_prefix(
            self.comment_styles.iter().map(|s| s.start.as_str()),
            rest,
            is_final,
        )
    }

    /// Operator starting at `rest`.
    pub(crate) fn operator_at(&self, rest: &str, is_final: bool) -> Prefix {
        match_prefix(self.operators.iter().map(String::as_str), rest, is_final)
    }
}

/// Builder for [`LexerConfig`]; [`build`](Self::build) validates.
#[derive(Clone, Debug)]
pub struct LexerConfigBuilder {
    config: LexerConfig,
}

impl LexerConfigBuilder {
    /// Replace the symbol set.
    #[must_use]
    pub fn symbols(mut self, symbols: impl Into<SymbolSet>) -> Self {
        self.config.symbols = symbols.into();
        self
    }

    /// Replace all comment styles.
    #[must_use]
    pub fn comment_styles(mut self, styles: impl IntoIterator<Item = CommentStyle>) -> Self {
        self.config.comment_styles = styles.into_iter().collect();
        self
    }

    /// Add one comment style.
    #[must_use]
    pub fn comment_style(mut self, style: CommentStyle) -> Self {
        self.config.comment_styles.push(style);
        self
    }

    /// Replace all operators.
    #[must_use]
    pub fn operators<S: Into<String>>(mut self, operators: impl IntoIterator<Item = S>) -> Self {
        self.config.operators = operators.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<LexerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// On-disk shape of a configuration.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    symbols: String,
    comment_styles: Vec<CommentStyle>,
    operators: Vec<String>,
}

#[cfg(feature = "serde")]
impl Default for ConfigFile {
    fn default() -> Self {
        let defaults = LexerConfig::default();
        ConfigFile {
            symbols: DEFAULT_SYMBOLS.to_owned(),
            comment_styles: defaults.comment_styles,
            operators: defaults.operators,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<ConfigFile> for LexerConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, ConfigError> {
        LexerConfig::builder()
            .symbols(file.symbols.as_str())
            .comment_styles(file.comment_styles)
            .operators(file.operators)
            .build()
    }
}

#[cfg(test)]
mod tests;
