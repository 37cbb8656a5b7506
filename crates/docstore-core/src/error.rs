//! Conversions from engine errors into store error responses.

use docstore_model::{StoreError, ValueError};

use crate::expression::ExpressionError;
use crate::item::ItemError;

/// Convert a typed-value error into a validation error.
///
/// Takes `e` by value because this is used as a closure argument to `.map_err()`.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn value_error_to_store(e: ValueError) -> StoreError {
    StoreError::validation(e.to_string()).with_source(e)
}

/// Convert an expression error into a validation error.
///
/// Takes `e` by value because this is used as a closure argument to `.map_err()`.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn expression_error_to_store(e: ExpressionError) -> StoreError {
    StoreError::validation(e.to_string()).with_source(e)
}

/// Convert an item error into a validation error.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn item_error_to_store(e: ItemError) -> StoreError {
    StoreError::validation(e.to_string()).with_source(e)
}

/// Convert a payload decoding error into a serialization error.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn serialization_error(e: serde_json::Error) -> StoreError {
    StoreError::serialization(e.to_string()).with_source(e)
}
