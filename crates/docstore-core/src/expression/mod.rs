//! Expression tokenization.
//!
//! Condition, update and projection expressions share one lexical layer. This
//! module turns expression text into a flat [`Token`] sequence; building a
//! parse tree from it is left to the expression parser.

pub mod token;
pub mod tokenizer;

pub use token::{Symbol, Token, TokenKind};
pub use tokenizer::{ExpressionError, tokenize};
