#[cfg(test)]
mod tests {
    use jsonb_field::Document;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        Document::from(value)
    }

    // ========================================================================
    // Structural equality
    // ========================================================================

    #[test]
    fn test_object_equality_ignores_key_order() {
        let stored = doc(json!({"a": 1, "c": 2}));
        let operand = doc(json!({"c": 2, "a": 1}));
        assert!(stored.structural_eq(&operand));
    }

    #[test]
    fn test_array_equality_respects_order() {
        assert!(doc(json!([1, 2])).structural_eq(&doc(json!([1, 2]))));
        assert!(!doc(json!([1, 2])).structural_eq(&doc(json!([2, 1]))));
    }

    #[test]
    fn test_object_equality_requires_same_keys() {
        assert!(!doc(json!({"a": 1})).structural_eq(&doc(json!({"a": 1, "b": 2}))));
        assert!(!doc(json!({"a": 1, "b": 2})).structural_eq(&doc(json!({"a": 1}))));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(Document::Integer(1).structural_eq(&Document::Float(1.0)));
        assert!(Document::Float(2.5).structural_eq(&Document::Float(2.5)));
        assert!(!Document::Integer(1).structural_eq(&Document::Float(1.5)));
    }

    #[test]
    fn test_null_equals_only_null() {
        assert!(Document::Null.structural_eq(&Document::Null));
        assert!(!Document::Null.structural_eq(&Document::Boolean(false)));
        assert!(!Document::Null.structural_eq(&doc(json!({}))));
        assert!(!Document::Integer(0).structural_eq(&Document::Null));
    }

    #[test]
    fn test_empty_object_is_not_empty_array() {
        assert!(!doc(json!({})).structural_eq(&doc(json!([]))));
    }

    #[test]
    fn test_nested_equality() {
        let stored = doc(json!({"d": ["e", {"f": "g"}], "k": {"l": "m"}}));
        let operand = doc(json!({"k": {"l": "m"}, "d": ["e", {"f": "g"}]}));
        assert!(stored.structural_eq(&operand));

        let reordered = doc(json!({"k": {"l": "m"}, "d": [{"f": "g"}, "e"]}));
        assert!(!stored.structural_eq(&reordered));
    }

    #[test]
    fn test_string_is_not_number() {
        assert!(!Document::String("1".into()).structural_eq(&Document::Integer(1)));
    }

    // ========================================================================
    // Containment
    // ========================================================================

    #[test]
    fn test_object_contains_subset() {
        let stored = doc(json!({"a": "b", "c": 1, "h": true}));
        assert!(stored.contains(&doc(json!({"a": "b"}))));
        assert!(stored.contains(&doc(json!({}))));
        assert!(!stored.contains(&doc(json!({"a": "x"}))));
        assert!(!stored.contains(&doc(json!({"z": 1}))));
    }

    #[test]
    fn test_object_contains_recursively() {
        let stored = doc(json!({"k": {"l": "m", "n": 1}, "d": ["e", {"f": "g"}]}));
        assert!(stored.contains(&doc(json!({"k": {"l": "m"}}))));
        assert!(stored.contains(&doc(json!({"d": [{"f": "g"}]}))));
        assert!(stored.contains(&doc(json!({"d": ["e"]}))));
        assert!(!stored.contains(&doc(json!({"k": {"l": "x"}}))));
    }

    #[test]
    fn test_array_contains_ignores_order_and_repetition() {
        let stored = doc(json!([1, 2, 3]));
        assert!(stored.contains(&doc(json!([3, 1]))));
        assert!(stored.contains(&doc(json!([1, 1]))));
        assert!(stored.contains(&doc(json!([]))));
        assert!(!stored.contains(&doc(json!([4]))));
    }

    #[test]
    fn test_top_level_array_contains_scalar() {
        let stored = doc(json!(["foo", "bar", [1]]));
        assert!(stored.contains(&doc(json!("foo"))));
        assert!(!stored.contains(&doc(json!("baz"))));
        // only scalar elements count
        assert!(!stored.contains(&doc(json!(1))));
    }

    #[test]
    fn test_nested_array_does_not_contain_scalar() {
        let stored = doc(json!({"a": ["x"]}));
        assert!(!stored.contains(&doc(json!({"a": "x"}))));
    }

    #[test]
    fn test_scalars_contain_equal_scalars() {
        assert!(doc(json!(7)).contains(&doc(json!(7))));
        assert!(doc(json!("yes")).contains(&doc(json!("yes"))));
        assert!(!doc(json!(true)).contains(&doc(json!({}))));
        assert!(!doc(json!({})).contains(&doc(json!(true))));
    }

    #[test]
    fn test_contained_by_is_inverse() {
        let operand = doc(json!({"a": "b", "c": 1, "h": true}));
        assert!(doc(json!({})).contained_by(&operand));
        assert!(doc(json!({"a": "b", "c": 1})).contained_by(&operand));
        assert!(!doc(json!({"a": "b", "z": 0})).contained_by(&operand));
    }

    // ========================================================================
    // Access
    // ========================================================================

    #[test]
    fn test_get_key_only_on_objects() {
        let stored = doc(json!({"a": 1, "3": "three"}));
        assert_eq!(stored.get_key("a"), Some(&Document::Integer(1)));
        assert_eq!(stored.get_key("missing"), None);
        assert_eq!(doc(json!(["a"])).get_key("a"), None);
        assert_eq!(doc(json!("a")).get_key("a"), None);
    }

    #[test]
    fn test_get_index_only_on_arrays() {
        let stored = doc(json!([10, 20, 30]));
        assert_eq!(stored.get_index(0), Some(&Document::Integer(10)));
        assert_eq!(stored.get_index(-1), Some(&Document::Integer(30)));
        assert_eq!(stored.get_index(3), None);
        assert_eq!(stored.get_index(-4), None);
        assert_eq!(doc(json!({"0": 1})).get_index(0), None);
    }

    #[test]
    fn test_has_key() {
        assert!(doc(json!({"a": null})).has_key("a"));
        assert!(!doc(json!({"a": null})).has_key("b"));
        assert!(!doc(json!(["a"])).has_key("a"));
        assert!(!doc(json!("a")).has_key("a"));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(doc(json!(null)).type_name(), "null");
        assert_eq!(doc(json!(true)).type_name(), "boolean");
        assert_eq!(doc(json!(1)).type_name(), "number");
        assert_eq!(doc(json!(1.5)).type_name(), "number");
        assert_eq!(doc(json!("s")).type_name(), "string");
        assert_eq!(doc(json!([])).type_name(), "array");
        assert_eq!(doc(json!({})).type_name(), "object");
    }

    #[test]
    fn test_extract_text() {
        assert_eq!(doc(json!("b")).extract_text(), Some("b".to_string()));
        assert_eq!(doc(json!(1)).extract_text(), Some("1".to_string()));
        assert_eq!(doc(json!(1.5)).extract_text(), Some("1.5".to_string()));
        assert_eq!(doc(json!(true)).extract_text(), Some("true".to_string()));
        assert_eq!(doc(json!(null)).extract_text(), None);
        assert_eq!(doc(json!({"a": [1]})).extract_text(), Some(r#"{"a":[1]}"#.to_string()));
    }

    #[test]
    fn test_integers_and_floats_stay_distinct() {
        assert_eq!(doc(json!(1)), Document::Integer(1));
        assert_eq!(doc(json!(1.0)), Document::Float(1.0));
    }

    #[test]
    fn test_serde_conversion_preserves_key_order() {
        let original = json!({"z": 1, "a": 2, "m": {"y": 0, "b": 1}});
        let back = serde_json::Value::from(doc(original.clone()));
        assert_eq!(back, original);
        let keys: Vec<&String> = back.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
