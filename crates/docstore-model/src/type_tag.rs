//! Type tags for typed attribute values.
//!
//! Every typed value carries exactly one tag. The tag code (`S`, `N`, `BOOL`,
//! ...) is what appears as the single key of the wire encoding; the identifier
//! (`STRING`, `NUMBER_SET`, ...) is only used for diagnostics.

use std::borrow::Cow;
use std::fmt;

/// The closed set of value tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// `S`
    String,
    /// `N`
    Number,
    /// `B`
    Binary,
    /// `BOOL`
    Boolean,
    /// `NULL`
    Null,
    /// `M`
    Map,
    /// `L`
    List,
    /// `SS`
    StringSet,
    /// `NS`
    NumberSet,
    /// `BS`
    BinarySet,
}

impl TypeTag {
    /// All tags, in wire-code declaration order.
    pub const ALL: [Self; 10] = [
        Self::String,
        Self::Number,
        Self::Binary,
        Self::Boolean,
        Self::Null,
        Self::Map,
        Self::List,
        Self::StringSet,
        Self::NumberSet,
        Self::BinarySet,
    ];

    /// Returns the wire code for this tag (e.g. `"SS"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::String => "S",
            Self::Number => "N",
            Self::Binary => "B",
            Self::Boolean => "BOOL",
            Self::Null => "NULL",
            Self::Map => "M",
            Self::List => "L",
            Self::StringSet => "SS",
            Self::NumberSet => "NS",
            Self::BinarySet => "BS",
        }
    }

    /// Looks up a tag by its wire code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.code() == code)
    }

    /// Returns the identifier name for this tag (e.g. `"STRING_SET"`).
    #[must_use]
    pub fn identifier(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Binary => "BINARY",
            Self::Boolean => "BOOLEAN",
            Self::Null => "NULL",
            Self::Map => "MAP",
            Self::List => "LIST",
            Self::StringSet => "STRING_SET",
            Self::NumberSet => "NUMBER_SET",
            Self::BinarySet => "BINARY_SET",
        }
    }

    /// Looks up a tag by its identifier name.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.identifier() == identifier)
    }

    /// Human readable name, e.g. `"string set"`.
    #[must_use]
    pub fn human_name(self) -> String {
        self.identifier().replace('_', " ").to_ascii_lowercase()
    }

    /// Returns `true` for `SS`, `NS` and `BS`.
    #[must_use]
    pub fn is_set(self) -> bool {
        matches!(self, Self::StringSet | Self::NumberSet | Self::BinarySet)
    }

    /// The tag of each member of a set tag; `None` for non-set tags.
    #[must_use]
    pub fn element_tag(self) -> Option<Self> {
        match self {
            Self::StringSet => Some(Self::String),
            Self::NumberSet => Some(Self::Number),
            Self::BinarySet => Some(Self::Binary),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Converts a wire code into its human readable name for error messages.
///
/// Unknown codes are returned unchanged.
#[must_use]
pub fn human_type(code: &str) -> Cow<'_, str> {
    match TypeTag::from_code(code) {
        Some(tag) => Cow::Owned(tag.human_name()),
        None => Cow::Borrowed(code),
    }
}
