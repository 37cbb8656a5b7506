//! Typed attribute values for the docstore expression engine.
//!
//! This crate holds the value algebra evaluated by condition, update and
//! projection expressions: the closed set of [`TypeTag`]s, the recursive
//! [`TypedValue`] with its wire encoding, the native [`CastValue`]
//! interpretation used for ordering, and the named [`ComparisonOperator`]s.

pub mod cast;
pub mod comparison;
pub mod error;
pub mod size;
pub mod type_tag;
pub mod value;

pub use cast::CastValue;
pub use comparison::ComparisonOperator;
pub use error::{StoreError, StoreErrorCode, ValueError};
pub use size::bytesize;
pub use type_tag::{TypeTag, human_type};
pub use value::{AttributeKey, TypedValue, filter_attributes};
