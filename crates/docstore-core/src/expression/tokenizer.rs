//! Tokenizer for condition, update and projection expressions.
//!
//! Attribute names in the store may contain almost anything, but names used
//! inside an expression may not: a name that starts oddly or contains a space,
//! a special character or a dot has to be passed through a `#name`
//! placeholder instead. The tokenizer enforces exactly those rules.
//!
//! Characters are either *simple* (alphanumeric, `_`, `:` or `#`) or
//! boundaries. Consecutive simple characters are staged and classified as a
//! whole when the next boundary arrives:
//!
//! | staged text                      | token                       |
//! |----------------------------------|-----------------------------|
//! | `#` + `[A-Za-z0-9][A-Za-z0-9_]*` | `AttributeNamePlaceholder`  |
//! | digits only                      | `Number`                    |
//! | `[A-Za-z0-9][A-Za-z0-9_]*`       | `Attribute`                 |
//! | `:` + `[A-Za-z0-9_]*`            | `AttributeValuePlaceholder` |
//!
//! Spaces are merged into a single whitespace token and punctuation becomes a
//! one-character token. Anything else aborts the scan.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::token::{Symbol, Token, TokenKind};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced while tokenizing an expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    /// A character or staged word that cannot start any token.
    #[error("Invalid expression: Syntax error; token: \"{token}\", near: \"{near}\"")]
    InvalidToken {
        /// The offending character.
        token: String,
        /// Trailing context ending with the offending text.
        near: String,
    },
    /// A `#name` placeholder that does not follow the naming rules.
    #[error("ExpressionAttributeNames contains invalid key: Syntax error; key: \"{key}\"")]
    InvalidAttributeNameKey {
        /// The malformed placeholder.
        key: String,
    },
}

// ---------------------------------------------------------------------------
// Character and word classification
// ---------------------------------------------------------------------------

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9][a-zA-Z0-9_]*$").expect("valid attribute regex"));

static ATTRIBUTE_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^:[a-zA-Z0-9_]*$").expect("valid attribute value regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Simple,
    Space,
    Symbol(Symbol),
    Unexpected,
}

fn is_simple(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '#')
}

fn classify_char(c: char) -> CharClass {
    if is_simple(c) {
        CharClass::Simple
    } else if c == ' ' {
        CharClass::Space
    } else if let Some(symbol) = Symbol::from_char(c) {
        CharClass::Symbol(symbol)
    } else {
        CharClass::Unexpected
    }
}

/// Outcome of classifying a staged word.
enum Staged {
    Token(TokenKind),
    InvalidNameKey,
    Unexpected,
}

fn classify_staged(word: &str) -> Staged {
    if let Some(name) = word.strip_prefix('#') {
        return if ATTRIBUTE.is_match(name) {
            Staged::Token(TokenKind::AttributeNamePlaceholder)
        } else {
            Staged::InvalidNameKey
        };
    }
    if word.bytes().all(|b| b.is_ascii_digit()) {
        Staged::Token(TokenKind::Number)
    } else if ATTRIBUTE.is_match(word) {
        Staged::Token(TokenKind::Attribute)
    } else if ATTRIBUTE_VALUE.is_match(word) {
        Staged::Token(TokenKind::AttributeValuePlaceholder)
    } else {
        Staged::Unexpected
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Scanner state: emitted tokens plus the word being staged.
#[derive(Debug, Default)]
struct ExpressionTokenizer {
    tokens: Vec<Token>,
    staged: String,
}

impl ExpressionTokenizer {
    fn feed(&mut self, c: char) -> Result<(), ExpressionError> {
        match classify_char(c) {
            CharClass::Simple => self.staged.push(c),
            CharClass::Space => {
                self.flush()?;
                if let Some(last) = self.tokens.last_mut().filter(|t| t.is_whitespace()) {
                    last.push_whitespace(c);
                } else {
                    self.tokens.push(Token::new(TokenKind::Whitespace, c));
                }
            }
            CharClass::Symbol(symbol) => {
                self.flush()?;
                self.tokens.push(Token::symbol(symbol));
            }
            CharClass::Unexpected => {
                self.flush()?;
                self.staged.push(c);
                return Err(self.unexpected_token());
            }
        }
        Ok(())
    }

    /// Classify and emit the staged word, if any.
    fn flush(&mut self) -> Result<(), ExpressionError> {
        if self.staged.is_empty() {
            return Ok(());
        }
        match classify_staged(&self.staged) {
            Staged::Token(kind) => {
                let text = std::mem::take(&mut self.staged);
                self.tokens.push(Token::new(kind, text));
                Ok(())
            }
            Staged::InvalidNameKey => Err(ExpressionError::InvalidAttributeNameKey {
                key: self.staged.clone(),
            }),
            Staged::Unexpected => Err(self.unexpected_token()),
        }
    }

    /// Error for the staged text, with the tail of the emitted tokens as
    /// context.
    fn unexpected_token(&self) -> ExpressionError {
        let near = match self.tokens.as_slice() {
            [] => String::new(),
            [only] => only.text().to_owned(),
            [.., prev, last] if last.is_whitespace() => format!("{}{}", prev.text(), last.text()),
            [.., last] => last.text().to_owned(),
        };
        let token = self
            .staged
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_default();
        ExpressionError::InvalidToken {
            token,
            near: near + &self.staged,
        }
    }

    fn finish(mut self) -> Result<Vec<Token>, ExpressionError> {
        self.flush()?;
        Ok(self.tokens)
    }
}

/// Split an expression into tokens.
///
/// # Errors
///
/// Returns [`ExpressionError::InvalidAttributeNameKey`] for a malformed
/// `#name` placeholder and [`ExpressionError::InvalidToken`] for any other
/// text that cannot be tokenized. No partial token list is returned.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokenizer = ExpressionTokenizer::default();
    input
        .chars()
        .try_for_each(|c| tokenizer.feed(c))
        .and_then(|()| tokenizer.finish())
        .inspect(|tokens| trace!(count = tokens.len(), "tokenized expression"))
        .inspect_err(|e| debug!(expression = input, error = %e, "failed to tokenize expression"))
}
