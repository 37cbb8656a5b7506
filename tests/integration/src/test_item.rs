//! Item-level projection and size accounting.

#[cfg(test)]
mod tests {
    use docstore_core::error::{item_error_to_store, serialization_error};
    use docstore_core::{EngineConfig, Item, ItemError};
    use docstore_model::{AttributeKey, StoreErrorCode};
    use serde_json::json;

    use crate::{item, typed};

    fn order() -> Item {
        item(&json!({
            "order_id": {"S": "o-100"},
            "total": {"N": "99.5"},
            "customer": {"M": {
                "name": {"S": "Ann"},
                "address": {"M": {"city": {"S": "Oslo"}, "zip": {"S": "0150"}}}
            }},
            "lines": {"L": [{"M": {"sku": {"S": "A1"}}}]},
            "tags": {"SS": ["rush"]}
        }))
    }

    #[test]
    fn test_should_project_nested_paths() {
        let mut order = order();
        order.project("order_id, customer.address.city, tags");
        assert_eq!(
            order.to_json(),
            json!({
                "order_id": {"S": "o-100"},
                "customer": {"M": {"address": {"M": {"city": {"S": "Oslo"}}}}},
                "tags": {"SS": ["rush"]}
            })
        );
    }

    #[test]
    fn test_should_resolve_list_paths() {
        let order = order();
        let path = [
            AttributeKey::Name("lines"),
            AttributeKey::Index(0),
            AttributeKey::Name("sku"),
        ];
        assert_eq!(order.get_path(&path), Some(typed(json!({"S": "A1"}))));
    }

    #[test]
    fn test_should_enforce_configured_size_limit() {
        let order = order();
        let size = order.size();
        assert!(order.validate_size(&EngineConfig::default()).is_ok());

        let tight = EngineConfig {
            max_item_size_bytes: size - 1,
            ..EngineConfig::default()
        };
        let err = order.validate_size(&tight).unwrap_err();
        assert_eq!(
            err,
            ItemError::SizeTooLarge {
                size,
                limit: size - 1
            }
        );
        let store = item_error_to_store(err);
        assert_eq!(store.code, StoreErrorCode::ValidationException);
    }

    #[test]
    fn test_should_count_multibyte_names_in_size() {
        let mut entry = Item::new();
        entry.insert("é", typed(json!({"S": "ü"})));
        assert_eq!(entry.size(), 4);
    }

    #[test]
    fn test_should_report_bad_payloads() {
        let err = Item::from_json(r#"{"a": {"S": "x", "N": "1"}}"#).unwrap_err();
        assert_eq!(err.code, StoreErrorCode::SerializationException);
        assert_eq!(
            err.error_type(),
            "com.amazonaws.dynamodb.v20120810#SerializationException"
        );

        let raw = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            serialization_error(raw).code,
            StoreErrorCode::SerializationException
        );
    }
}
