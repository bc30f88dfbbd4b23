use lineage::{
    ActionCategory, Error, FilterAction, HistoryConfig, HistoryGraph, HistoryVertex, ImageId,
    ImageRelation, relations_from_json, relations_to_json,
};
use serde_json::json;

#[test]
fn relations_parse_from_subject_object_records() {
    let relations = relations_from_json(
        r#"[
            {"subject": 2, "object": 1},
            {"subject": 3, "object": 2}
        ]"#,
    )
    .expect("valid json");
    assert_eq!(
        relations,
        vec![ImageRelation::derived(2, 1), ImageRelation::derived(3, 2)]
    );
}

#[test]
fn relations_serialize_as_plain_ids() {
    let text = relations_to_json(&[ImageRelation::derived(5, 4)]).expect("serializable");
    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value, json!([{ "subject": 5, "object": 4 }]));
}

#[test]
fn malformed_relations_are_json_errors() {
    for text in ["", "{", r#"[{"subject": "two", "object": 1}]"#, r#"[{"subject": 2}]"#] {
        let err = relations_from_json(text).expect_err(text);
        assert!(matches!(err, Error::Json(_)), "{text}: {err:?}");
        assert!(err.to_string().starts_with("Invalid history JSON: "));
    }
}

#[test]
fn history_loads_from_json() {
    let history = HistoryGraph::from_json(
        r#"[{"subject": 2, "object": 1}, {"subject": 3, "object": 1}]"#,
        HistoryConfig::default(),
    )
    .expect("valid history");
    assert_eq!(history.roots(), vec![ImageId(1)]);
    assert_eq!(history.leaves(), vec![ImageId(2), ImageId(3)]);

    let text = relations_to_json(&history.relations()).expect("serializable");
    assert_eq!(
        relations_from_json(&text).expect("valid json"),
        history.relations()
    );
}

#[test]
fn filter_actions_use_camel_case_and_defaults() {
    let action: FilterAction = serde_json::from_value(json!({
        "identifier": "filter:autoLevels",
        "version": 1,
        "category": "complex"
    }))
    .expect("valid action");
    assert_eq!(action.category, ActionCategory::Complex);
    assert!(action.params.is_empty());
    assert!(!action.is_reproducible());

    let action = FilterAction::new("filter:bcg", 2)
        .with_category(ActionCategory::Documented)
        .with_param("gamma", "1.2");
    assert_eq!(
        serde_json::to_value(&action).expect("serializable"),
        json!({
            "identifier": "filter:bcg",
            "version": 2,
            "category": "documented",
            "params": { "gamma": "1.2" }
        })
    );
}

#[test]
fn history_vertex_matches_any_of_its_ids() {
    let mut vertex = HistoryVertex::new(ImageId(7));
    vertex.image_ids.push(ImageId(70));
    assert!(vertex == ImageId(7));
    assert!(vertex == ImageId(70));
    assert!(vertex != ImageId(8));
    assert_eq!(vertex.primary_id(), Some(ImageId(7)));
    assert_eq!(
        serde_json::to_value(&vertex).expect("serializable"),
        json!({ "imageIds": [7, 70] })
    );
}
