//! Tokens produced by the expression tokenizer.

use std::fmt;

/// Single-character punctuation that forms its own token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `=`
    Equal,
    /// `(`
    OpenRoundBracket,
    /// `)`
    CloseRoundBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `[`
    OpenSquareBracket,
    /// `]`
    CloseSquareBracket,
}

impl Symbol {
    /// Recognize a punctuation character. Space is not a symbol: it always
    /// becomes part of a whitespace token.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Self::Minus),
            '+' => Some(Self::Plus),
            '=' => Some(Self::Equal),
            '(' => Some(Self::OpenRoundBracket),
            ')' => Some(Self::CloseRoundBracket),
            ',' => Some(Self::Comma),
            '.' => Some(Self::Dot),
            '[' => Some(Self::OpenSquareBracket),
            ']' => Some(Self::CloseSquareBracket),
            _ => None,
        }
    }

    /// The character this symbol stands for.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Minus => '-',
            Self::Plus => '+',
            Self::Equal => '=',
            Self::OpenRoundBracket => '(',
            Self::CloseRoundBracket => ')',
            Self::Comma => ',',
            Self::Dot => '.',
            Self::OpenSquareBracket => '[',
            Self::CloseSquareBracket => ']',
        }
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A bare attribute name, e.g. `price`.
    Attribute,
    /// An attribute name placeholder, e.g. `#name`.
    AttributeNamePlaceholder,
    /// An attribute value placeholder, e.g. `:val`.
    AttributeValuePlaceholder,
    /// One or more consecutive spaces.
    Whitespace,
    /// A run of decimal digits, e.g. a list index.
    Number,
    /// Punctuation; the token text is the symbol itself.
    Symbol(Symbol),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute => f.write_str("Attribute"),
            Self::AttributeNamePlaceholder => f.write_str("AttributeName"),
            Self::AttributeValuePlaceholder => f.write_str("AttributeValue"),
            Self::Whitespace => f.write_str("Whitespace"),
            Self::Number => f.write_str("Number"),
            Self::Symbol(symbol) => write!(f, "{}", symbol.as_char()),
        }
    }
}

/// A token: its kind plus the exact source text, sigils included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Create a punctuation token.
    #[must_use]
    pub fn symbol(symbol: Symbol) -> Self {
        Self::new(TokenKind::Symbol(symbol), symbol.as_char())
    }

    /// The token kind.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The token text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` for whitespace tokens.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Grow a whitespace token by one character.
    pub(crate) fn push_whitespace(&mut self, c: char) {
        debug_assert!(self.is_whitespace());
        self.text.push(c);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(\"{}\", \"{}\")", self.kind, self.text)
    }
}
