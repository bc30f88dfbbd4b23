use lineage::{
    Error, FilterAction, HistoryConfig, HistoryGraph, HistoryImageCategory, ImageId,
    ImageRelation, MeaningOfDirection, ReturnOrder,
};
use lineage_graph::GraphError;

fn ids(raw: &[i64]) -> Vec<ImageId> {
    raw.iter().copied().map(ImageId).collect()
}

/// 1 -> 2 -> 3, 1 -> 4, plus the redundant 1 -> 3, and an unrelated image 6.
fn sample(direction: MeaningOfDirection) -> HistoryGraph {
    let config = HistoryConfig {
        direction,
        ..Default::default()
    };
    let mut history = HistoryGraph::from_relations(
        &[
            ImageRelation::derived(2, 1),
            ImageRelation::derived(3, 2),
            ImageRelation::derived(4, 1),
            ImageRelation::derived(3, 1),
        ],
        config,
    )
    .expect("acyclic");
    history.add_image(ImageId(6));
    history
}

fn sorted(mut v: Vec<ImageId>) -> Vec<ImageId> {
    v.sort_unstable();
    v
}

#[test]
fn relations_build_one_vertex_per_image() {
    let history = sample(MeaningOfDirection::ParentToChild);
    assert_eq!(history.len(), 5);
    assert_eq!(history.graph().edge_count(), 4);
    assert!(history.contains(ImageId(3)));
    assert!(!history.contains(ImageId(5)));
    assert!(history.vertex_for(ImageId(5)).is_none());
}

#[test]
fn roots_and_leaves_are_image_ids() {
    for direction in [
        MeaningOfDirection::ParentToChild,
        MeaningOfDirection::ChildToParent,
    ] {
        let history = sample(direction);
        assert_eq!(history.roots(), ids(&[1, 6]), "{direction:?}");
        assert_eq!(history.leaves(), ids(&[3, 4, 6]), "{direction:?}");
    }
}

#[test]
fn roots_and_leaves_for_one_image() {
    let history = sample(MeaningOfDirection::ParentToChild);
    assert_eq!(history.roots_for(ImageId(3)).expect("known"), ids(&[1]));
    assert_eq!(history.roots_for(ImageId(1)).expect("known"), ids(&[1]));
    assert_eq!(
        sorted(history.leaves_for(ImageId(1)).expect("known")),
        ids(&[3, 4])
    );
    assert_eq!(history.leaves_for(ImageId(2)).expect("known"), ids(&[3]));
    assert_eq!(history.leaves_for(ImageId(6)).expect("known"), ids(&[6]));
}

#[test]
fn categories_follow_the_position_in_the_history() {
    for direction in [
        MeaningOfDirection::ParentToChild,
        MeaningOfDirection::ChildToParent,
    ] {
        let history = sample(direction);
        let category = |id| history.categorize(ImageId(id)).expect("known image");
        assert_eq!(category(1), HistoryImageCategory::Original);
        assert_eq!(category(2), HistoryImageCategory::Intermediate);
        assert_eq!(category(3), HistoryImageCategory::Current);
        assert_eq!(category(4), HistoryImageCategory::Current);
        assert_eq!(category(6), HistoryImageCategory::Single);
    }
}

#[test]
fn unknown_images_are_reported() {
    let history = sample(MeaningOfDirection::ParentToChild);
    assert!(matches!(
        history.categorize(ImageId(99)),
        Err(Error::UnknownImage { id: ImageId(99) })
    ));
    assert!(matches!(
        history.path_between(ImageId(1), ImageId(99)),
        Err(Error::UnknownImage { .. })
    ));
    let err = history.history_of(ImageId(42)).expect_err("unknown image");
    assert_eq!(err.to_string(), "Image 42 is not part of this history");
}

#[test]
fn reduce_edges_removes_the_implied_derivation() {
    let mut history = sample(MeaningOfDirection::ParentToChild);
    let removed = history.reduce_edges().expect("acyclic");
    assert_eq!(removed, vec![ImageRelation::derived(3, 1)]);
    assert_eq!(history.graph().edge_count(), 3);
    assert!(!history.relations().contains(&ImageRelation::derived(3, 1)));

    // Vertex handles survive the in-place reduction.
    let v3 = history.vertex_for(ImageId(3));
    assert!(history.reduce_edges().expect("acyclic").is_empty());
    assert_eq!(history.vertex_for(ImageId(3)), v3);
}

#[test]
fn reduce_on_load_applies_the_reduction() {
    let config = HistoryConfig {
        reduce_on_load: true,
        ..Default::default()
    };
    let history = HistoryGraph::from_relations(
        &[
            ImageRelation::derived(2, 1),
            ImageRelation::derived(3, 2),
            ImageRelation::derived(3, 1),
        ],
        config,
    )
    .expect("acyclic");
    assert_eq!(
        sorted_relations(history.relations()),
        vec![ImageRelation::derived(2, 1), ImageRelation::derived(3, 2)]
    );
}

fn sorted_relations(mut v: Vec<ImageRelation>) -> Vec<ImageRelation> {
    v.sort_unstable();
    v
}

#[test]
fn relation_cloud_lists_every_ancestor_pair() {
    for direction in [
        MeaningOfDirection::ParentToChild,
        MeaningOfDirection::ChildToParent,
    ] {
        let mut history = sample(direction);
        history.reduce_edges().expect("acyclic");
        assert_eq!(
            history.relation_cloud().expect("acyclic"),
            vec![
                ImageRelation::derived(2, 1),
                ImageRelation::derived(3, 1),
                ImageRelation::derived(3, 2),
                ImageRelation::derived(4, 1),
            ],
            "{direction:?}"
        );
    }
}

#[test]
fn duplicates_share_a_version() {
    let mut history = sample(MeaningOfDirection::ParentToChild);
    history
        .add_duplicate(ImageId(4), ImageId(40))
        .expect("4 is known");
    assert_eq!(history.len(), 5);
    assert_eq!(
        history.vertex_for(ImageId(40)),
        history.vertex_for(ImageId(4))
    );
    assert_eq!(
        history.categorize(ImageId(40)).expect("known"),
        HistoryImageCategory::Current
    );
    let cloud = history.relation_cloud().expect("acyclic");
    assert!(cloud.contains(&ImageRelation::derived(40, 1)));
    assert!(cloud.contains(&ImageRelation::derived(4, 1)));

    assert!(matches!(
        history.add_duplicate(ImageId(77), ImageId(78)),
        Err(Error::UnknownImage { id: ImageId(77) })
    ));
}

#[test]
fn a_file_cannot_belong_to_two_versions() {
    let mut history = sample(MeaningOfDirection::ParentToChild);
    history
        .add_duplicate(ImageId(4), ImageId(40))
        .expect("40 is new");
    // Attaching it again to the same version is a no-op.
    history
        .add_duplicate(ImageId(4), ImageId(40))
        .expect("same version");

    let err = history
        .add_duplicate(ImageId(2), ImageId(40))
        .expect_err("40 already belongs to version 4");
    assert!(matches!(
        err,
        Error::ConflictingDuplicate {
            existing: ImageId(2),
            duplicate: ImageId(40),
        }
    ));
    assert_eq!(
        err.to_string(),
        "Image 40 already belongs to another version than image 2"
    );
    assert!(matches!(
        history.add_duplicate(ImageId(2), ImageId(3)),
        Err(Error::ConflictingDuplicate { .. })
    ));
    assert_ne!(history.vertex_for(ImageId(2)), history.vertex_for(ImageId(3)));
    assert_eq!(
        history.vertex_for(ImageId(40)),
        history.vertex_for(ImageId(4))
    );
}

#[test]
fn relations_expand_duplicates_like_the_cloud() {
    let mut history = HistoryGraph::from_relations(
        &[ImageRelation::derived(2, 1)],
        HistoryConfig::default(),
    )
    .expect("acyclic");
    history
        .add_duplicate(ImageId(1), ImageId(10))
        .expect("1 is known");
    history
        .add_duplicate(ImageId(2), ImageId(20))
        .expect("2 is known");

    let expected = vec![
        ImageRelation::derived(2, 1),
        ImageRelation::derived(2, 10),
        ImageRelation::derived(20, 1),
        ImageRelation::derived(20, 10),
    ];
    assert_eq!(sorted_relations(history.relations()), expected);
    assert_eq!(history.relation_cloud().expect("acyclic"), expected);
}

#[test]
fn derived_from_needs_the_image_on_every_path() {
    let mut history = sample(MeaningOfDirection::ParentToChild);
    assert_eq!(
        history
            .derived_from(ImageId(1), ReturnOrder::BreadthFirst)
            .expect("known"),
        ids(&[2, 4, 3])
    );
    // 3 can also be reached from 1 directly.
    assert!(
        history
            .derived_from(ImageId(2), ReturnOrder::BreadthFirst)
            .expect("known")
            .is_empty()
    );

    history.reduce_edges().expect("acyclic");
    assert_eq!(
        history
            .derived_from(ImageId(2), ReturnOrder::DepthFirst)
            .expect("known"),
        ids(&[3])
    );
    assert!(
        history
            .derived_from(ImageId(6), ReturnOrder::DepthFirst)
            .expect("known")
            .is_empty()
    );
}

#[test]
fn derived_from_with_several_originals() {
    // 3 merges two originals; only 4 depends on 3 alone.
    let history = HistoryGraph::from_relations(
        &[
            ImageRelation::derived(3, 1),
            ImageRelation::derived(3, 2),
            ImageRelation::derived(4, 3),
        ],
        HistoryConfig::default(),
    )
    .expect("acyclic");
    assert_eq!(history.roots(), ids(&[1, 2]));
    assert!(
        history
            .derived_from(ImageId(1), ReturnOrder::BreadthFirst)
            .expect("known")
            .is_empty()
    );
    assert_eq!(
        history
            .derived_from(ImageId(3), ReturnOrder::BreadthFirst)
            .expect("known"),
        ids(&[4])
    );
}

#[test]
fn history_of_runs_from_original_to_current() {
    for direction in [
        MeaningOfDirection::ParentToChild,
        MeaningOfDirection::ChildToParent,
    ] {
        let history = sample(direction);
        assert_eq!(
            history.history_of(ImageId(2)).expect("acyclic"),
            ids(&[1, 2, 3]),
            "{direction:?}"
        );
        assert_eq!(
            history.history_of(ImageId(4)).expect("acyclic"),
            ids(&[1, 4]),
            "{direction:?}"
        );
        assert_eq!(
            history.history_of(ImageId(6)).expect("acyclic"),
            ids(&[6]),
            "{direction:?}"
        );
    }
}

#[test]
fn path_between_takes_the_shortest_chain() {
    let history = sample(MeaningOfDirection::ParentToChild);
    assert_eq!(
        history.path_between(ImageId(1), ImageId(3)).expect("acyclic"),
        ids(&[1, 3])
    );
    assert_eq!(
        history.path_between(ImageId(3), ImageId(1)).expect("acyclic"),
        ids(&[3, 1])
    );
    assert!(
        history
            .path_between(ImageId(4), ImageId(3))
            .expect("acyclic")
            .is_empty()
    );
}

#[test]
fn sorted_images_list_parents_first() {
    for direction in [
        MeaningOfDirection::ParentToChild,
        MeaningOfDirection::ChildToParent,
    ] {
        let history = sample(direction);
        let order = history.sorted_images().expect("acyclic");
        assert_eq!(sorted(order.clone()), ids(&[1, 2, 3, 4, 6]));
        let position = |id: i64| order.iter().position(|&x| x == ImageId(id));
        for relation in history.relations() {
            assert!(
                position(relation.object.0) < position(relation.subject.0),
                "{relation:?} out of order in {order:?}"
            );
        }
    }
}

#[test]
fn actions_accumulate_on_a_derivation() {
    let mut history = HistoryGraph::default();
    let first = history.add_derivation(
        ImageId(1),
        ImageId(2),
        vec![FilterAction::new("transform:crop", 1).with_param("width", "640")],
    );
    let again = history.add_derivation(
        ImageId(1),
        ImageId(2),
        vec![FilterAction::new("color:bcg", 2)],
    );
    assert_eq!(first, again);

    let actions = history.actions(ImageId(1), ImageId(2)).expect("known");
    let names: Vec<&str> = actions.iter().map(|a| a.identifier.as_str()).collect();
    assert_eq!(names, vec!["transform:crop", "color:bcg"]);
    assert_eq!(actions[0].params.get("width").map(String::as_str), Some("640"));
    assert!(
        history
            .actions(ImageId(2), ImageId(1))
            .expect("known")
            .is_empty()
    );
}

#[test]
fn inconsistent_histories_report_cycles() {
    let history = HistoryGraph::from_relations(
        &[
            ImageRelation::derived(2, 1),
            ImageRelation::derived(1, 2),
            ImageRelation::derived(3, 2),
        ],
        HistoryConfig::default(),
    )
    .expect("loading does not need a DAG");

    assert_eq!(history.cycles(), vec![ids(&[1, 2])]);
    assert!(matches!(
        history.sorted_images(),
        Err(Error::Graph(GraphError::NotADag {
            operation: "topological_sort"
        }))
    ));
    assert!(matches!(
        history.relation_cloud(),
        Err(Error::Graph(GraphError::NotADag { .. }))
    ));
}

#[test]
fn reduce_on_load_fails_on_cycles() {
    let config = HistoryConfig {
        reduce_on_load: true,
        ..Default::default()
    };
    let result = HistoryGraph::from_relations(
        &[ImageRelation::derived(2, 1), ImageRelation::derived(1, 2)],
        config,
    );
    assert!(matches!(result, Err(Error::Graph(_))));
}
