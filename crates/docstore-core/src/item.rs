//! Items: the top-level attribute maps stored by the document store.
//!
//! An item's size is what the store-level limit is enforced against. It is
//! the sum over attributes of the attribute name's byte length plus the
//! value's size as computed by [`TypedValue::size`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use docstore_model::{AttributeKey, StoreError, TypedValue, bytesize, filter_attributes};

use crate::config::EngineConfig;

/// Errors raised by item-level checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    /// The item is larger than the configured limit.
    #[error("Item size has exceeded the maximum allowed size")]
    SizeTooLarge {
        /// The computed item size.
        size: usize,
        /// The configured limit.
        limit: usize,
    },
}

/// A stored item, encoded on the wire as a map of typed values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    attributes: HashMap<String, TypedValue>,
}

impl Item {
    /// Create an empty item.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an item from its wire JSON.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(crate::error::serialization_error)
    }

    /// Encode the item as wire JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.to_wire()))
                .collect(),
        )
    }

    /// All attributes of the item.
    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, TypedValue> {
        &self.attributes
    }

    /// Consume the item, returning its attributes.
    #[must_use]
    pub fn into_attributes(self) -> HashMap<String, TypedValue> {
        self.attributes
    }

    /// Look up a top-level attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.attributes.get(name)
    }

    /// Insert or replace a top-level attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: TypedValue) -> Option<TypedValue> {
        self.attributes.insert(name.into(), value)
    }

    /// Remove a top-level attribute.
    pub fn remove(&mut self, name: &str) -> Option<TypedValue> {
        self.attributes.remove(name)
    }

    /// Resolve a document path such as `a.b[2]`, given as its segments.
    ///
    /// The first segment must be an attribute name. Returns `None` as soon as
    /// a segment is missing or does not fit the value it is applied to.
    #[must_use]
    pub fn get_path(&self, path: &[AttributeKey<'_>]) -> Option<TypedValue> {
        let (AttributeKey::Name(first), rest) = path.split_first()? else {
            return None;
        };
        rest.iter()
            .try_fold(self.attributes.get(*first)?.clone(), |current, key| {
                current.child_attr(*key)
            })
    }

    /// Item size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.attributes
            .iter()
            .map(|(name, value)| bytesize(name) + value.size())
            .sum()
    }

    /// Check the item against the configured size limit, returning its size.
    pub fn validate_size(&self, config: &EngineConfig) -> Result<usize, ItemError> {
        let size = self.size();
        if size > config.max_item_size_bytes {
            debug!(size, limit = config.max_item_size_bytes, "item exceeds size limit");
            return Err(ItemError::SizeTooLarge {
                size,
                limit: config.max_item_size_bytes,
            });
        }
        Ok(size)
    }

    /// Apply a comma separated projection expression (`a, b.c, d`) in place.
    pub fn project(&mut self, projection_expression: &str) {
        let expressions: Vec<&str> = projection_expression
            .split(',')
            .map(str::trim)
            .filter(|expr| !expr.is_empty())
            .collect();
        filter_attributes(&mut self.attributes, &expressions);
    }
}

impl From<HashMap<String, TypedValue>> for Item {
    fn from(attributes: HashMap<String, TypedValue>) -> Self {
        Self { attributes }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Item {
        Item::from_json(
            &json!({
                "id": {"S": "item-1"},
                "count": {"N": "12"},
                "details": {"M": {
                    "color": {"S": "red"},
                    "sizes": {"L": [{"N": "1"}, {"N": "2"}]}
                }},
                "flag": {"BOOL": true}
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_should_compute_item_size() {
        let item = sample();
        // id: 2 + 6, count: 5 + 2, details: 7 + (5 + 3) + (5 + 1 + 1), flag: 4 + 1
        assert_eq!(item.size(), 8 + 7 + 22 + 5);
    }

    #[test]
    fn test_should_reject_oversized_item() {
        let mut item = Item::new();
        item.insert("blob", TypedValue::String("x".repeat(100)));
        let config = EngineConfig {
            max_item_size_bytes: 50,
            ..EngineConfig::default()
        };
        assert_eq!(
            item.validate_size(&config),
            Err(ItemError::SizeTooLarge {
                size: 104,
                limit: 50
            })
        );
        assert_eq!(item.validate_size(&EngineConfig::default()), Ok(104));
    }

    #[test]
    fn test_should_project_top_level_and_nested_attributes() {
        let mut item = sample();
        item.project("id, details.color");
        let expected = Item::from_json(
            &json!({
                "id": {"S": "item-1"},
                "details": {"M": {"color": {"S": "red"}}}
            })
            .to_string(),
        )
        .unwrap();
        assert_eq!(item, expected);
    }

    #[test]
    fn test_should_resolve_document_paths() {
        let item = sample();
        let path = [
            AttributeKey::Name("details"),
            AttributeKey::Name("sizes"),
            AttributeKey::Index(1),
        ];
        assert_eq!(
            item.get_path(&path),
            Some(TypedValue::Number("2".to_owned()))
        );
        assert_eq!(item.get_path(&[AttributeKey::Name("missing")]), None);
        assert_eq!(item.get_path(&[AttributeKey::Index(0)]), None);
        assert_eq!(
            item.get_path(&[AttributeKey::Name("count"), AttributeKey::Name("x")]),
            None
        );
    }

    #[test]
    fn test_should_report_malformed_json_as_serialization_error() {
        let err = Item::from_json(r#"{"a": {"Q": "1"}}"#).unwrap_err();
        assert_eq!(err.code, docstore_model::StoreErrorCode::SerializationException);
    }

    #[test]
    fn test_should_roundtrip_item_json() {
        let item = sample();
        let back = Item::from_json(&item.to_json().to_string()).unwrap();
        assert_eq!(back, item);
    }
}
