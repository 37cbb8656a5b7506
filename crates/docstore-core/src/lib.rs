//! Expression engine for the document store.
//!
//! This crate holds the pieces that sit between the wire model in
//! `docstore-model` and request handling: the expression tokenizer, whole
//! item operations such as projection and size validation, and the engine
//! configuration.

pub mod config;
pub mod error;
pub mod expression;
pub mod item;

pub use config::EngineConfig;
pub use expression::{ExpressionError, Symbol, Token, TokenKind, tokenize};
pub use item::{Item, ItemError};
