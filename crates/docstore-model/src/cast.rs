//! Native interpretation of typed values.
//!
//! A [`CastValue`] is what ordering and comparison operators work on: numbers
//! become integers or floats, sets become unordered collections, and lists and
//! maps carry cast members. Only same-kind pairs (with integers and floats
//! counting as one kind) are ordered; everything else is incomparable.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::ValueError;

/// Native value derived from a typed value.
#[derive(Debug, Clone)]
pub enum CastValue {
    /// Integral number.
    Int(i128),
    /// Number with a fractional part or exponent.
    Float(f64),
    /// String or binary text.
    Text(String),
    /// Boolean or null flag.
    Bool(bool),
    /// Set members, without duplicates.
    Set(Vec<CastValue>),
    /// List members in order.
    List(Vec<CastValue>),
    /// Map entries.
    Map(HashMap<String, CastValue>),
}

impl CastValue {
    /// Parse number text: as an integer when possible, otherwise as a float.
    pub fn parse_number(text: &str) -> Result<Self, ValueError> {
        if let Ok(int) = text.parse::<i128>() {
            return Ok(Self::Int(int));
        }
        text.parse::<f64>()
            .map(Self::Float)
            .map_err(|_| ValueError::InvalidNumber {
                value: text.to_owned(),
            })
    }

    /// Build a set, dropping members equal to one already present.
    #[must_use]
    pub fn set_of(members: impl IntoIterator<Item = CastValue>) -> Self {
        let mut unique: Vec<CastValue> = Vec::new();
        for member in members {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        Self::Set(unique)
    }

    /// Membership test: substring for text, element for sets and lists, key
    /// for maps. Always `false` for scalars without a notion of containment.
    #[must_use]
    pub fn contains(&self, needle: &CastValue) -> bool {
        match (self, needle) {
            (Self::Text(haystack), Self::Text(needle)) => haystack.contains(needle.as_str()),
            (Self::Set(members) | Self::List(members), needle) => members.contains(needle),
            (Self::Map(entries), Self::Text(key)) => entries.contains_key(key),
            _ => false,
        }
    }

    /// Prefix test; only text has prefixes.
    #[must_use]
    pub fn starts_with(&self, prefix: &CastValue) -> bool {
        match (self, prefix) {
            (Self::Text(value), Self::Text(prefix)) => value.starts_with(prefix.as_str()),
            _ => false,
        }
    }
}

impl PartialEq for CastValue {
    #[allow(clippy::float_cmp, clippy::cast_precision_loss)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => *a as f64 == *b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => a.len() == b.len() && is_subset(a, b),
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for CastValue {
    #[allow(clippy::cast_precision_loss)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            // Sets are ordered by inclusion.
            (Self::Set(a), Self::Set(b)) => match (is_subset(a, b), is_subset(b, a)) {
                (true, true) => Some(Ordering::Equal),
                (true, false) => Some(Ordering::Less),
                (false, true) => Some(Ordering::Greater),
                (false, false) => None,
            },
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    match x.partial_cmp(y)? {
                        Ordering::Equal => {}
                        ord => return Some(ord),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            (Self::Map(a), Self::Map(b)) => (a == b).then_some(Ordering::Equal),
            _ => None,
        }
    }
}

fn is_subset(a: &[CastValue], b: &[CastValue]) -> bool {
    a.iter().all(|member| b.contains(member))
}
