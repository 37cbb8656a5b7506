//! Error types for typed values and store-facing error responses.
//!
//! [`ValueError`] is raised by individual typed-value operations and is local
//! to that operation. [`StoreError`] is the response-level error the broader
//! store reports back to a client, carrying a `__type` string in the usual
//! `<namespace>#<Code>` form.

use std::fmt;

use crate::type_tag::TypeTag;

// ---------------------------------------------------------------------------
// Value errors
// ---------------------------------------------------------------------------

/// Errors produced by operations on a [`TypedValue`](crate::TypedValue).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Operands or keys do not fit the value's tag.
    #[error("Type mismatch: {message}")]
    TypeMismatch {
        /// Explanation.
        message: String,
    },
    /// A non-numeric operand was used in addition.
    #[error("An operand in the update expression has an incorrect data type")]
    IncorrectDataType,
    /// Mutation was keyed by a value that is neither a name nor an index.
    #[error("No set_item for key of type {key_type}")]
    UnsupportedKeyType {
        /// Human readable type of the offending key.
        key_type: String,
    },
    /// The operation is not defined for the value's tag.
    #[error("{operation} not supported for TypedValue {tag}")]
    UnsupportedOperation {
        /// Name of the operation.
        operation: &'static str,
        /// The tag of the receiving value.
        tag: TypeTag,
    },
    /// A map key or list index does not exist.
    #[error("Key not found: {key}")]
    KeyNotFound {
        /// The missing key, rendered as text.
        key: String,
    },
    /// Number text could not be interpreted numerically.
    #[error("'{value}' is not a valid number")]
    InvalidNumber {
        /// The offending text.
        value: String,
    },
    /// Binary text is not valid base64.
    #[error("Invalid binary value: {message}")]
    InvalidBinary {
        /// Decoder message.
        message: String,
    },
    /// The comparison operator name is not known.
    #[error("Unknown comparison operator: {name}")]
    UnknownComparisonOperator {
        /// The requested operator name.
        name: String,
    },
    /// The comparison operator was given the wrong number of arguments.
    #[error("{operator} expects {expected} argument(s), got {actual}")]
    InvalidArgumentCount {
        /// The operator name.
        operator: &'static str,
        /// Description of the accepted arity.
        expected: &'static str,
        /// Number of arguments supplied.
        actual: usize,
    },
}

impl ValueError {
    /// Shorthand for a [`ValueError::TypeMismatch`].
    pub(crate) fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Well-known store error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum StoreErrorCode {
    /// Validation error.
    #[default]
    ValidationException,
    /// The request payload could not be decoded.
    SerializationException,
}

impl StoreErrorCode {
    /// Returns the fully-qualified error type string for the `__type` field.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ValidationException => "com.amazon.coral.validate#ValidationException",
            Self::SerializationException => {
                "com.amazonaws.dynamodb.v20120810#SerializationException"
            }
        }
    }

    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationException => "ValidationException",
            Self::SerializationException => "SerializationException",
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A store error response.
#[derive(Debug)]
pub struct StoreError {
    /// The error code.
    pub code: StoreErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl StoreError {
    /// Create a new `StoreError` from an error code.
    #[must_use]
    pub fn new(code: StoreErrorCode) -> Self {
        Self {
            message: code.as_str().to_owned(),
            code,
            source: None,
        }
    }

    /// Create a new `StoreError` with a custom message.
    #[must_use]
    pub fn with_message(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the `__type` string for the error response.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        self.code.error_type()
    }

    /// Renders the JSON error body (`{"__type": ..., "message": ...}`).
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "__type": self.error_type(),
            "message": self.message,
        })
    }

    /// Validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(StoreErrorCode::ValidationException, message)
    }

    /// Serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::with_message(StoreErrorCode::SerializationException, message)
    }
}

/// Create a `StoreError` from an error code.
///
/// # Examples
///
/// ```
/// use docstore_model::store_error;
/// use docstore_model::error::StoreErrorCode;
///
/// let err = store_error!(ValidationException);
/// assert_eq!(err.code, StoreErrorCode::ValidationException);
///
/// let err = store_error!(SerializationException, "bad payload");
/// assert_eq!(err.message, "bad payload");
/// ```
#[macro_export]
macro_rules! store_error {
    ($code:ident) => {
        $crate::error::StoreError::new($crate::error::StoreErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::StoreError::with_message($crate::error::StoreErrorCode::$code, $msg)
    };
}
