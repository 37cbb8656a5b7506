//! The typed value algebra.
//!
//! [`TypedValue`] is a closed sum type with one variant per [`TypeTag`]. Each
//! variant only carries the shape that is legal for its tag, so a number can
//! never hold a list and a set can never hold nested values.
//!
//! The wire encoding is a single-key object mapping the tag code to the raw
//! value, recursively for lists and maps:
//!
//! ```text
//! {"M": {"name": {"S": "widget"}, "tags": {"SS": ["a", "b"]}}}
//! ```
//!
//! Equality and hashing are structural over (tag, raw value). Ordering is a
//! separate notion, [`TypedValue::cast_cmp`], that goes through
//! [`TypedValue::cast_value`]: `N("5")` orders before `N("10")` even though
//! the raw text compares the other way around, and `N("1")` orders equal to
//! `N("1.0")` while the two are not `==`. For that reason `TypedValue` does
//! not implement `PartialOrd`.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use base64::Engine;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::cast::CastValue;
use crate::comparison::ComparisonOperator;
use crate::error::ValueError;
use crate::size::bytesize;
use crate::type_tag::TypeTag;

/// A tagged attribute value.
///
/// Binary values keep their raw wire text (base64); use
/// [`TypedValue::decode_binary`] to get at the bytes.
#[derive(Debug, Clone)]
pub enum TypedValue {
    /// `S`: string.
    String(String),
    /// `N`: number, kept as decimal text.
    Number(String),
    /// `B`: binary, kept as base64 text.
    Binary(String),
    /// `BOOL`: boolean.
    Boolean(bool),
    /// `NULL`: null marker.
    Null(bool),
    /// `SS`: string set.
    StringSet(Vec<String>),
    /// `NS`: number set.
    NumberSet(Vec<String>),
    /// `BS`: binary set.
    BinarySet(Vec<String>),
    /// `L`: ordered list of values.
    List(Vec<TypedValue>),
    /// `M`: map from attribute name to value.
    Map(HashMap<String, TypedValue>),
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Key used to address a child of a map or list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey<'a> {
    /// Map entry name.
    Name(&'a str),
    /// List position.
    Index(usize),
}

impl AttributeKey<'_> {
    /// Human readable kind of key, for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Name(_) => "string",
            Self::Index(_) => "integer",
        }
    }
}

impl fmt::Display for AttributeKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl<'a> From<&'a str> for AttributeKey<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for AttributeKey<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for AttributeKey<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> TryFrom<&'a TypedValue> for AttributeKey<'a> {
    type Error = ValueError;

    /// Strings address map entries and non-negative integral numbers address
    /// list positions. Every other value is rejected.
    fn try_from(value: &'a TypedValue) -> Result<Self, Self::Error> {
        match value {
            TypedValue::String(name) => Ok(Self::Name(name)),
            TypedValue::Number(n) => n
                .parse::<usize>()
                .map(Self::Index)
                .map_err(|_| ValueError::UnsupportedKeyType {
                    key_type: format!("number {n}"),
                }),
            other => Err(ValueError::UnsupportedKeyType {
                key_type: other.tag().human_name(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl TypedValue {
    /// Returns the tag of this value.
    #[must_use]
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::String(_) => TypeTag::String,
            Self::Number(_) => TypeTag::Number,
            Self::Binary(_) => TypeTag::Binary,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Null(_) => TypeTag::Null,
            Self::StringSet(_) => TypeTag::StringSet,
            Self::NumberSet(_) => TypeTag::NumberSet,
            Self::BinarySet(_) => TypeTag::BinarySet,
            Self::List(_) => TypeTag::List,
            Self::Map(_) => TypeTag::Map,
        }
    }

    /// Build a binary value from raw bytes.
    #[must_use]
    pub fn binary_from_bytes(bytes: &[u8]) -> Self {
        Self::Binary(base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    /// Decode the bytes of a binary value.
    pub fn decode_binary(&self) -> Result<Vec<u8>, ValueError> {
        let Self::Binary(encoded) = self else {
            return Err(ValueError::type_mismatch(format!(
                "expected a binary value, got {}",
                self.tag().human_name()
            )));
        };
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| ValueError::InvalidBinary {
                message: e.to_string(),
            })
    }

    /// Returns `true` if this is a number.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns `true` if this is a string, number or binary set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.tag().is_set()
    }

    /// Returns `true` if this is a list.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns `true` if this is a map.
    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns `true` if both values carry the same tag.
    #[must_use]
    pub fn same_type(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }

    /// Build the wire JSON for this value.
    #[must_use]
    pub fn to_wire(&self) -> serde_json::Value {
        use serde_json::Value;

        let raw = match self {
            Self::String(s) | Self::Number(s) | Self::Binary(s) => Value::String(s.clone()),
            Self::Boolean(b) | Self::Null(b) => Value::Bool(*b),
            Self::StringSet(v) | Self::NumberSet(v) | Self::BinarySet(v) => {
                Value::Array(v.iter().cloned().map(Value::String).collect())
            }
            Self::List(items) => Value::Array(items.iter().map(Self::to_wire).collect()),
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_wire()))
                    .collect(),
            ),
        };
        let mut object = serde_json::Map::with_capacity(1);
        object.insert(self.tag().code().to_owned(), raw);
        Value::Object(object)
    }

    /// Parse a value from its wire JSON.
    pub fn from_wire(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

// ---------------------------------------------------------------------------
// Cast values, comparison, size
// ---------------------------------------------------------------------------

impl TypedValue {
    /// Native interpretation used for ordering and comparison operators.
    ///
    /// Numbers are integers when the text parses as one and floats otherwise;
    /// sets, lists and maps are cast member by member.
    pub fn cast_value(&self) -> Result<CastValue, ValueError> {
        match self {
            Self::String(s) | Self::Binary(s) => Ok(CastValue::Text(s.clone())),
            Self::Number(n) => CastValue::parse_number(n),
            Self::Boolean(b) | Self::Null(b) => Ok(CastValue::Bool(*b)),
            Self::StringSet(v) | Self::BinarySet(v) => {
                Ok(CastValue::set_of(v.iter().cloned().map(CastValue::Text)))
            }
            Self::NumberSet(v) => {
                let members = v
                    .iter()
                    .map(|n| CastValue::parse_number(n))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CastValue::set_of(members))
            }
            Self::List(items) => items
                .iter()
                .map(Self::cast_value)
                .collect::<Result<Vec<_>, _>>()
                .map(CastValue::List),
            Self::Map(entries) => entries
                .iter()
                .map(|(k, v)| v.cast_value().map(|cast| (k.clone(), cast)))
                .collect::<Result<HashMap<_, _>, _>>()
                .map(CastValue::Map),
        }
    }

    /// Order two values by their cast values.
    ///
    /// Values whose cast values are not comparable (different kinds,
    /// unparseable numbers, disjoint sets) have no order, so every ordering
    /// question about them answers `false`.
    #[must_use]
    pub fn cast_cmp(&self, other: &Self) -> Option<Ordering> {
        let lhs = self.cast_value().ok()?;
        let rhs = other.cast_value().ok()?;
        lhs.partial_cmp(&rhs)
    }

    /// Apply a comparison operator with this value as the target.
    pub fn compare(
        &self,
        operator: ComparisonOperator,
        range_values: &[TypedValue],
    ) -> Result<bool, ValueError> {
        let args = range_values
            .iter()
            .map(Self::cast_value)
            .collect::<Result<Vec<_>, _>>()?;
        operator.evaluate(&self.cast_value()?, &args)
    }

    /// Like [`TypedValue::compare`], looking the operator up by name.
    pub fn compare_named(
        &self,
        operator: &str,
        range_values: &[TypedValue],
    ) -> Result<bool, ValueError> {
        self.compare(operator.parse()?, range_values)
    }

    /// Estimated storage size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Number(n) => n.chars().count(),
            Self::String(s) | Self::Binary(s) => bytesize(s),
            Self::Boolean(_) | Self::Null(_) => 1,
            Self::StringSet(v) | Self::BinarySet(v) => v.iter().map(|s| bytesize(s)).sum(),
            Self::NumberSet(v) => v.iter().map(|n| n.chars().count()).sum(),
            Self::List(items) => items.iter().map(Self::size).sum(),
            Self::Map(entries) => entries.iter().map(|(k, v)| bytesize(k) + v.size()).sum(),
        }
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum ArithmeticOp {
    Add,
    Subtract,
}

impl TypedValue {
    /// Numeric addition.
    ///
    /// Fails with `TypeMismatch` when the tags differ and with
    /// `IncorrectDataType` when the operands are not numbers.
    pub fn add(&self, other: &Self) -> Result<Self, ValueError> {
        if !self.same_type(other) {
            return Err(ValueError::type_mismatch(
                "Different types of operandi is not allowed.",
            ));
        }
        let (Self::Number(a), Self::Number(b)) = (self, other) else {
            return Err(ValueError::IncorrectDataType);
        };
        numeric_arithmetic(a, b, ArithmeticOp::Add)
    }

    /// Numeric subtraction. Both failure modes are `TypeMismatch`.
    pub fn subtract(&self, other: &Self) -> Result<Self, ValueError> {
        if !self.same_type(other) {
            return Err(ValueError::type_mismatch(
                "Different types of operandi is not allowed.",
            ));
        }
        let (Self::Number(a), Self::Number(b)) = (self, other) else {
            return Err(ValueError::type_mismatch(
                "Subtraction only supported for Numbers.",
            ));
        };
        numeric_arithmetic(a, b, ArithmeticOp::Subtract)
    }
}

/// Operand parsing for arithmetic: a `.` means float, anything else must be
/// an integer. Integers too wide for `i128` are carried as floats.
fn parse_operand(text: &str) -> Result<CastValue, ValueError> {
    let parsed = if text.contains('.') {
        text.parse::<f64>().ok().map(CastValue::Float)
    } else {
        text.parse::<i128>().ok().map(CastValue::Int).or_else(|| {
            is_integer_text(text)
                .then(|| text.parse::<f64>().ok().map(CastValue::Float))
                .flatten()
        })
    };
    parsed.ok_or_else(|| ValueError::InvalidNumber {
        value: text.to_owned(),
    })
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[allow(clippy::cast_precision_loss)]
fn numeric_arithmetic(a: &str, b: &str, op: ArithmeticOp) -> Result<TypedValue, ValueError> {
    let lhs = parse_operand(a)?;
    let rhs = parse_operand(b)?;

    let text = match (lhs, rhs) {
        (CastValue::Int(x), CastValue::Int(y)) => {
            let exact = match op {
                ArithmeticOp::Add => x.checked_add(y),
                ArithmeticOp::Subtract => x.checked_sub(y),
            };
            match exact {
                Some(v) => v.to_string(),
                None => format_float(apply_float(x as f64, y as f64, op)),
            }
        }
        (x, y) => {
            let (Some(x), Some(y)) = (as_f64(&x), as_f64(&y)) else {
                return Err(ValueError::InvalidNumber {
                    value: format!("{a}, {b}"),
                });
            };
            format_float(apply_float(x, y, op))
        }
    };
    Ok(TypedValue::Number(text))
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(value: &CastValue) -> Option<f64> {
    match value {
        CastValue::Int(i) => Some(*i as f64),
        CastValue::Float(f) => Some(*f),
        _ => None,
    }
}

fn apply_float(x: f64, y: f64, op: ArithmeticOp) -> f64 {
    match op {
        ArithmeticOp::Add => x + y,
        ArithmeticOp::Subtract => x - y,
    }
}

/// Canonical float text: shortest round-trip digits, always with a fractional
/// part or a signed two-digit exponent (`3.0`, `0.5`, `1e+16`, `1e-07`).
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

// ---------------------------------------------------------------------------
// Children
// ---------------------------------------------------------------------------

impl TypedValue {
    /// Required access to a child: names on maps, indexes on lists.
    pub fn get<'k>(&self, key: impl Into<AttributeKey<'k>>) -> Result<&TypedValue, ValueError> {
        let key = key.into();
        let child = match (self, key) {
            (Self::Map(entries), AttributeKey::Name(name)) => entries.get(name),
            (Self::List(items), AttributeKey::Index(index)) => items.get(index),
            _ => {
                return Err(ValueError::type_mismatch(format!(
                    "This TypedValue {} is not subscriptable by a {}",
                    self.tag(),
                    key.type_name()
                )));
            }
        };
        child.ok_or_else(|| ValueError::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Set a child. An index at or past the end of a list appends; a name on
    /// a map inserts or replaces. Keys that do not fit the tag are ignored.
    pub fn set_item<'k>(&mut self, key: impl Into<AttributeKey<'k>>, value: TypedValue) {
        let key = key.into();
        let tag = self.tag();
        match (self, key) {
            (Self::List(items), AttributeKey::Index(index)) => {
                if index >= items.len() {
                    trace!(index, len = items.len(), "appending past end of list");
                    items.push(value);
                } else {
                    items[index] = value;
                }
            }
            (Self::Map(entries), AttributeKey::Name(name)) => {
                entries.insert(name.to_owned(), value);
            }
            (_, key) => {
                debug!(%tag, %key, "ignoring set on value that does not fit key");
            }
        }
    }

    /// Set a child addressed by another typed value (see
    /// [`AttributeKey::try_from`]).
    pub fn set_item_by_value(&mut self, key: &TypedValue, value: TypedValue) -> Result<(), ValueError> {
        let key = AttributeKey::try_from(key)?;
        self.set_item(key, value);
        Ok(())
    }

    /// Look up a child without failing: `None` when the key is missing or
    /// does not fit the tag.
    #[must_use]
    pub fn child_attr<'k>(&self, key: impl Into<AttributeKey<'k>>) -> Option<TypedValue> {
        match (self, key.into()) {
            (Self::Map(entries), AttributeKey::Name(name)) => entries.get(name).cloned(),
            (Self::List(items), AttributeKey::Index(index)) => items.get(index).cloned(),
            _ => None,
        }
    }

    /// Remove a child from a map or list, returning it if it existed.
    pub fn pop<'k>(
        &mut self,
        key: impl Into<AttributeKey<'k>>,
    ) -> Result<Option<TypedValue>, ValueError> {
        let key = key.into();
        let tag = self.tag();
        match (self, key) {
            (Self::Map(entries), AttributeKey::Name(name)) => Ok(entries.remove(name)),
            (Self::List(items), AttributeKey::Index(index)) => {
                Ok((index < items.len()).then(|| items.remove(index)))
            }
            (Self::Map(_) | Self::List(_), key) => Err(ValueError::type_mismatch(format!(
                "cannot pop {} key from TypedValue {tag}",
                key.type_name()
            ))),
            _ => Err(ValueError::UnsupportedOperation {
                operation: "pop",
                tag,
            }),
        }
    }

    /// Keep only the parts of a map selected by projection expressions.
    ///
    /// Plain names keep the whole entry; dotted paths (`a.b.c`) keep only
    /// the addressed descendants. Values other than maps are left untouched.
    pub fn filter<S: AsRef<str>>(&mut self, projection_expressions: &[S]) {
        if let Self::Map(entries) = self {
            filter_attributes(entries, projection_expressions);
        }
    }
}

/// Project a map of attributes in place.
///
/// Entries named neither verbatim nor as the root of a dotted expression are
/// removed; roots of dotted expressions are filtered recursively with the
/// remainder of each path.
pub fn filter_attributes<S: AsRef<str>>(
    attributes: &mut HashMap<String, TypedValue>,
    projection_expressions: &[S],
) {
    let nested_roots: HashSet<&str> = projection_expressions
        .iter()
        .filter_map(|expr| expr.as_ref().split_once('.').map(|(root, _)| root))
        .collect();

    let mut to_delete = Vec::new();
    for (name, value) in attributes.iter_mut() {
        if nested_roots.contains(name.as_str()) {
            let prefix = format!("{name}.");
            let tails: Vec<&str> = projection_expressions
                .iter()
                .filter_map(|expr| expr.as_ref().strip_prefix(prefix.as_str()))
                .collect();
            value.filter(tails.as_slice());
        } else if !projection_expressions
            .iter()
            .any(|expr| expr.as_ref() == name)
        {
            to_delete.push(name.clone());
        }
    }

    for name in to_delete {
        trace!(attribute = %name, "removing unprojected attribute");
        attributes.remove(&name);
    }
}

// ---------------------------------------------------------------------------
// Equality, hashing, ordering
// ---------------------------------------------------------------------------

fn member_set(members: &[String]) -> BTreeSet<&str> {
    members.iter().map(String::as_str).collect()
}

impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b))
            | (Self::Number(a), Self::Number(b))
            | (Self::Binary(a), Self::Binary(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) | (Self::Null(a), Self::Null(b)) => a == b,
            (Self::StringSet(a), Self::StringSet(b))
            | (Self::NumberSet(a), Self::NumberSet(b))
            | (Self::BinarySet(a), Self::BinarySet(b)) => member_set(a) == member_set(b),
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TypedValue {}

impl Hash for TypedValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
        match self {
            Self::String(s) | Self::Number(s) | Self::Binary(s) => s.hash(state),
            Self::Boolean(b) | Self::Null(b) => b.hash(state),
            Self::StringSet(v) | Self::NumberSet(v) | Self::BinarySet(v) => {
                for member in member_set(v) {
                    member.hash(state);
                }
            }
            Self::List(items) => items.hash(state),
            Self::Map(entries) => {
                let mut pairs: Vec<_> = entries.iter().collect();
                pairs.sort_by_key(|(k, _)| *k);
                for (k, v) in pairs {
                    k.hash(state);
                    v.hash(state);
                }
            }
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedValue: {}", self.to_wire())
    }
}

// ---------------------------------------------------------------------------
// Wire encoding
// ---------------------------------------------------------------------------

impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        let code = self.tag().code();
        match self {
            Self::String(s) | Self::Number(s) | Self::Binary(s) => map.serialize_entry(code, s)?,
            Self::Boolean(b) | Self::Null(b) => map.serialize_entry(code, b)?,
            Self::StringSet(v) | Self::NumberSet(v) | Self::BinarySet(v) => {
                map.serialize_entry(code, v)?;
            }
            Self::List(items) => map.serialize_entry(code, items)?,
            Self::Map(entries) => map.serialize_entry(code, entries)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TypedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TypedValueVisitor)
    }
}

struct TypedValueVisitor;

impl<'de> Visitor<'de> for TypedValueVisitor {
    type Value = TypedValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a typed attribute value object with exactly one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(code) = map.next_key::<String>()? else {
            return Err(de::Error::custom("typed value must have exactly one key"));
        };
        let Some(tag) = TypeTag::from_code(&code) else {
            return Err(de::Error::unknown_field(
                &code,
                &["S", "N", "B", "BOOL", "NULL", "M", "L", "SS", "NS", "BS"],
            ));
        };

        let value = match tag {
            TypeTag::String => TypedValue::String(map.next_value()?),
            TypeTag::Number => TypedValue::Number(map.next_value()?),
            TypeTag::Binary => TypedValue::Binary(map.next_value()?),
            TypeTag::Boolean => TypedValue::Boolean(map.next_value()?),
            TypeTag::Null => TypedValue::Null(map.next_value()?),
            TypeTag::StringSet => TypedValue::StringSet(map.next_value()?),
            TypeTag::NumberSet => TypedValue::NumberSet(map.next_value()?),
            TypeTag::BinarySet => TypedValue::BinarySet(map.next_value()?),
            TypeTag::List => TypedValue::List(map.next_value()?),
            TypeTag::Map => TypedValue::Map(map.next_value()?),
        };

        if map.next_key::<IgnoredAny>()?.is_some() {
            return Err(de::Error::custom("typed value must have exactly one key"));
        }
        Ok(value)
    }
}
