//! Typed value behavior across the wire boundary.

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::collections::HashSet;

    use docstore_model::{ComparisonOperator, TypeTag, TypedValue, ValueError, human_type};
    use serde_json::json;

    use crate::typed;

    #[test]
    fn test_should_increment_counter_from_wire_payload() {
        let counter = typed(json!({"N": "41"}));
        let step = typed(json!({"N": "1"}));
        let next = counter.add(&step).unwrap();
        assert_eq!(next.to_wire(), json!({"N": "42"}));

        let price = typed(json!({"N": "2.5"}));
        let discount = typed(json!({"N": "0.5"}));
        assert_eq!(price.subtract(&discount).unwrap().to_wire(), json!({"N": "2.0"}));
    }

    #[test]
    fn test_should_add_wide_integers_from_wire_payload() {
        let wide = typed(json!({"N": format!("1{}", "0".repeat(50))}));
        let one = typed(json!({"N": "1"}));
        assert_eq!(wide.add(&one).unwrap().to_wire(), json!({"N": "1e+50"}));
    }

    #[test]
    fn test_should_reject_arithmetic_on_mixed_operands() {
        let number = typed(json!({"N": "1"}));
        let text = typed(json!({"S": "1"}));
        assert!(matches!(
            number.add(&text),
            Err(ValueError::TypeMismatch { .. })
        ));
        assert_eq!(text.add(&text), Err(ValueError::IncorrectDataType));
        assert!(matches!(
            text.subtract(&text),
            Err(ValueError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_should_evaluate_condition_operators() {
        let age = typed(json!({"N": "30"}));
        let low = typed(json!({"N": "18"}));
        let high = typed(json!({"N": "65"}));
        assert!(age.compare(ComparisonOperator::Between, &[low.clone(), high]).unwrap());
        assert!(age.compare_named("GT", &[low]).unwrap());

        let name = typed(json!({"S": "widget-7"}));
        assert!(name
            .compare_named("BEGINS_WITH", &[typed(json!({"S": "widget"}))])
            .unwrap());

        let tags = typed(json!({"SS": ["red", "blue"]}));
        assert!(tags
            .compare_named("CONTAINS", &[typed(json!({"S": "red"}))])
            .unwrap());
        assert!(matches!(
            tags.compare_named("LIKE", &[]),
            Err(ValueError::UnknownComparisonOperator { .. })
        ));
    }

    #[test]
    fn test_should_order_numbers_numerically() {
        let five = typed(json!({"N": "5"}));
        let ten = typed(json!({"N": "10"}));
        assert_eq!(five.cast_cmp(&ten), Some(Ordering::Less));
        assert_eq!(
            typed(json!({"S": "5"})).cast_cmp(&typed(json!({"S": "10"}))),
            Some(Ordering::Greater)
        );
        // Values of different kinds have no order at all.
        let text = typed(json!({"S": "5"}));
        assert_eq!(five.cast_cmp(&text), None);
        assert!(!five.compare(ComparisonOperator::Le, &[text.clone()]).unwrap());
        assert!(!five.compare(ComparisonOperator::Ge, &[text]).unwrap());
    }

    #[test]
    fn test_should_treat_sets_as_unordered() {
        let a = typed(json!({"SS": ["x", "y"]}));
        let b = typed(json!({"SS": ["y", "x"]}));
        assert_eq!(a, b);
        let unique: HashSet<TypedValue> = [a, b].into_iter().collect();
        assert_eq!(unique.len(), 1);
    }

    #[test]
    fn test_should_edit_nested_document() {
        let mut doc = typed(json!({"M": {
            "profile": {"M": {"name": {"S": "Ann"}}},
            "history": {"L": [{"N": "1"}, {"N": "2"}]}
        }}));

        let TypedValue::Map(entries) = &mut doc else {
            panic!("expected a map");
        };
        let history = entries.get_mut("history").unwrap();
        history.set_item(10_usize, typed(json!({"N": "3"})));
        assert_eq!(history.pop(0_usize).unwrap(), Some(typed(json!({"N": "1"}))));

        assert_eq!(
            doc.to_wire(),
            json!({"M": {
                "profile": {"M": {"name": {"S": "Ann"}}},
                "history": {"L": [{"N": "2"}, {"N": "3"}]}
            }})
        );
        assert_eq!(
            doc.child_attr("profile").and_then(|p| p.child_attr("name")),
            Some(typed(json!({"S": "Ann"})))
        );
        assert_eq!(doc.child_attr(0_usize), None);
    }

    #[test]
    fn test_should_describe_tags_for_messages() {
        let value = typed(json!({"NS": ["1"]}));
        assert_eq!(value.tag(), TypeTag::NumberSet);
        assert_eq!(human_type(value.tag().code()), "number set");
        assert_eq!(human_type("XYZ"), "XYZ");
        assert_eq!(value.to_string(), r#"TypedValue: {"NS":["1"]}"#);
    }

    #[test]
    fn test_should_reject_malformed_wire_values() {
        assert!(TypedValue::from_wire(json!({"S": "a", "N": "1"})).is_err());
        assert!(TypedValue::from_wire(json!({"X": "a"})).is_err());
        assert!(TypedValue::from_wire(json!({})).is_err());
        assert!(TypedValue::from_wire(json!({"L": "not a list"})).is_err());
    }
}
