// End-to-end querying against an in-memory row set.
//
// Each row is a stored column value; `None` is an unset column. Results are
// row indices in storage order.

#[cfg(test)]
mod tests {
    use jsonb_field::codec::{decode, store};
    use jsonb_field::{Document, DocumentColumn, Filter};
    use serde_json::json;

    fn rows() -> Vec<Option<Document>> {
        vec![
            None,
            Some(json!(true)),
            Some(json!(false)),
            Some(json!("yes")),
            Some(json!(7)),
            Some(json!([])),
            Some(json!({})),
            Some(json!({"a": "b", "c": 1})),
            Some(json!({
                "a": "b",
                "c": 1,
                "d": ["e", {"f": "g"}],
                "h": true,
                "i": false,
                "j": null,
                "k": {"l": "m"},
            })),
            Some(json!([1, [2]])),
        ]
        .into_iter()
        // every row goes through the storage adapter, as a database would
        .map(|value| decode(store(value.map(Document::from)).as_deref()).unwrap())
        .collect()
    }

    fn query(path: &str, operand: serde_json::Value) -> Vec<usize> {
        let column = DocumentColumn::new("field").unwrap();
        let filter = Filter::new(&column).and(path, operand).unwrap();
        filter.apply(&rows())
    }

    // ========================================================================
    // Lookups on the column
    // ========================================================================

    #[test]
    fn test_exact() {
        assert_eq!(query("field__exact", json!({})), vec![6]);
    }

    #[test]
    fn test_exact_complex() {
        assert_eq!(query("field__exact", json!({"a": "b", "c": 1})), vec![7]);
    }

    #[test]
    fn test_exact_ignores_key_order() {
        assert_eq!(query("field__exact", json!({"c": 1, "a": "b"})), vec![7]);
    }

    #[test]
    fn test_exact_respects_array_order() {
        assert_eq!(query("field", json!([1, [2]])), vec![9]);
        assert!(query("field", json!([[2], 1])).is_empty());
    }

    #[test]
    fn test_exact_scalars() {
        assert_eq!(query("field", json!("yes")), vec![3]);
        assert_eq!(query("field", json!(7)), vec![4]);
        assert_eq!(query("field", json!(7.0)), vec![4]);
        assert_eq!(query("field", json!(true)), vec![1]);
        assert_eq!(query("field", json!(false)), vec![2]);
    }

    #[test]
    fn test_isnull() {
        assert_eq!(query("field__isnull", json!(true)), vec![0]);
    }

    #[test]
    fn test_isnull_false() {
        assert_eq!(query("field__isnull", json!(false)), (1..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_contains() {
        assert_eq!(query("field__contains", json!({"a": "b"})), vec![7, 8]);
    }

    #[test]
    fn test_contains_nested() {
        assert_eq!(query("field__contains", json!({"d": [{"f": "g"}]})), vec![8]);
        assert_eq!(query("field__contains", json!([[2]])), vec![9]);
        assert_eq!(query("field__contains", json!([])), vec![5, 9]);
    }

    #[test]
    fn test_contained_by() {
        assert_eq!(
            query("field__contained_by", json!({"a": "b", "c": 1, "h": true})),
            vec![6, 7]
        );
    }

    #[test]
    fn test_has_key() {
        assert_eq!(query("field__has_key", json!("a")), vec![7, 8]);
    }

    #[test]
    fn test_has_key_never_matches_non_objects() {
        assert!(query("field__has_key", json!("yes")).is_empty());
        assert!(query("field__has_key", json!("1")).is_empty());
    }

    #[test]
    fn test_has_keys() {
        assert_eq!(query("field__has_keys", json!(["a", "c", "h"])), vec![8]);
    }

    #[test]
    fn test_has_keys_empty_matches_every_object() {
        assert_eq!(query("field__has_keys", json!([])), vec![6, 7, 8]);
    }

    #[test]
    fn test_has_any_keys_empty_matches_nothing() {
        assert!(query("field__has_any_keys", json!([])).is_empty());
    }

    #[test]
    fn test_has_any_keys() {
        assert_eq!(query("field__has_any_keys", json!(["h", "zzz"])), vec![8]);
        assert_eq!(query("field__has_any_keys", json!(["a", "nope"])), vec![7, 8]);
        assert!(query("field__has_any_keys", json!(["nope"])).is_empty());
    }

    // ========================================================================
    // Key-path descent
    // ========================================================================

    #[test]
    fn test_shallow_list_lookup() {
        assert_eq!(query("field__0", json!(1)), vec![9]);
    }

    #[test]
    fn test_shallow_obj_lookup() {
        assert_eq!(query("field__a", json!("b")), vec![7, 8]);
    }

    #[test]
    fn test_deep_lookup_objs() {
        assert_eq!(query("field__k__l", json!("m")), vec![8]);
    }

    #[test]
    fn test_deep_lookup_array() {
        assert_eq!(query("field__1__0", json!(2)), vec![9]);
    }

    #[test]
    fn test_deep_lookup_mixed() {
        assert_eq!(query("field__d__1__f", json!("g")), vec![8]);
    }

    #[test]
    fn test_deep_lookup_shape_mismatch_is_no_match() {
        assert!(query("field__a__l", json!("m")).is_empty());
        assert!(query("field__c__0", json!(1)).is_empty());
        assert!(query("field__k__l__z", json!("m")).is_empty());
    }

    #[test]
    fn test_key_path_preserves_typing() {
        assert_eq!(query("field__c", json!(1)), vec![7, 8]);
        assert!(query("field__c", json!("1")).is_empty());
        assert_eq!(query("field__h", json!(true)), vec![8]);
        assert!(query("field__h", json!("true")).is_empty());
    }

    #[test]
    fn test_key_path_number_compares_by_value() {
        assert_eq!(query("field__c", json!(1.0)), vec![7, 8]);
        assert_eq!(query("field__1__0", json!(2.0)), vec![9]);
        assert_eq!(query("field__0", json!(1.0)), vec![9]);
        assert!(query("field__c", json!(1.5)).is_empty());
        assert!(query("field__c", json!("1.0")).is_empty());
    }

    #[test]
    fn test_key_path_json_null_vs_missing() {
        // present null matches the null operand only where the key exists
        assert_eq!(query("field__j", json!(null)), vec![8]);
        // isnull on a path means the path yields nothing
        assert_eq!(
            query("field__j__isnull", json!(true)),
            vec![0, 1, 2, 3, 4, 5, 6, 7, 9]
        );
        assert_eq!(query("field__j__isnull", json!(false)), vec![8]);
    }

    #[test]
    fn test_key_path_with_structural_lookups() {
        assert_eq!(query("field__d__contains", json!("e")), vec![8]);
        assert_eq!(query("field__k__has_key", json!("l")), vec![8]);
        assert_eq!(query("field__k", json!({"l": "m"})), vec![8]);
        assert_eq!(query("field__d__1__contained_by", json!({"f": "g", "x": 1})), vec![8]);
    }

    // ========================================================================
    // Combined conditions
    // ========================================================================

    #[test]
    fn test_conjunction() {
        let column = DocumentColumn::new("field").unwrap();
        let filter = Filter::new(&column)
            .and("field__has_key", json!("a"))
            .unwrap()
            .and("field__h", json!(true))
            .unwrap();
        assert_eq!(filter.apply(&rows()), vec![8]);
    }

    #[test]
    fn test_contained_by_subsets_scenario() {
        let stored: Vec<Option<Document>> = vec![
            None,
            Some(json!({}).into()),
            Some(json!({"a": "b", "c": 1}).into()),
            Some(json!({"a": "b", "c": 1, "h": true}).into()),
            Some(json!({"a": "b", "c": 1, "x": 0}).into()),
        ];
        let column = DocumentColumn::new("field").unwrap();
        let filter = Filter::new(&column)
            .and("field__contained_by", json!({"a": "b", "c": 1, "h": true}))
            .unwrap();
        // absence never matches; a document equal to the operand is contained by it;
        // a document with a key outside the operand is not
        assert_eq!(filter.apply(&stored), vec![1, 2, 3]);
    }
}
