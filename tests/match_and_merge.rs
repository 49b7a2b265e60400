mod util;

use social_assign::prelude::*;
use util::{FailingOracle, FirstTwoOracle, GreedyMatching, path_fork};

fn groups(p: &Partition<u32>) -> Vec<Vec<u32>> {
    p.groups().to_vec()
}

#[test]
fn path_fork_for_every_k() {
    let g = path_fork();
    let want: [Vec<Vec<u32>>; 4] = [
        vec![vec![1], vec![2], vec![3], vec![4], vec![5], vec![6]],
        vec![vec![1, 2], vec![3, 4], vec![5], vec![6]],
        vec![vec![1, 2], vec![3, 4, 6], vec![5]],
        vec![vec![1, 2], vec![3, 4, 5, 6]],
    ];
    for (k, expected) in (1..=4).zip(want) {
        let p = match_and_merge(&g, k).unwrap();
        assert_eq!(groups(&p), expected, "k = {k}");
    }
}

#[test]
fn empty_graph_with_k_zero() {
    let g: SocialGraph<u32> = SocialGraph::new();
    let p = match_and_merge(&g, 0).unwrap();
    assert!(p.is_empty());
    assert_eq!(
        match_and_merge(&g, 1),
        Err(AssignError::KExceedsVertexCount { k: 1, vertices: 0 })
    );
}

#[test]
fn k_zero_on_a_populated_graph_is_empty() {
    assert!(match_and_merge(&path_fork(), 0).unwrap().is_empty());
}

#[test]
fn k_out_of_range() {
    let g = path_fork();
    assert_eq!(match_and_merge(&g, -1), Err(AssignError::NegativeK(-1)));
    assert_eq!(
        match_and_merge(&g, 7),
        Err(AssignError::KExceedsVertexCount { k: 7, vertices: 6 })
    );
    assert_eq!(
        AssignError::NegativeK(-3).to_string(),
        "k should be 0 <= k <= |V|, got k = -3"
    );
    // k equal to the vertex count is allowed
    assert!(match_and_merge(&g, 6).is_ok());
}

#[test]
fn isolated_vertices_stay_alone() {
    let g = SocialGraph::with_vertices(1..=3u32);
    let p = match_and_merge(&g, 3).unwrap();
    assert_eq!(groups(&p), vec![vec![1], vec![2], vec![3]]);
}

#[test]
fn four_cycle_pairs_up() {
    let g = SocialGraph::from_edges([(1u32, 2u32), (2, 3), (3, 4), (4, 1)]).unwrap();
    for k in 2..=4 {
        let p = match_and_merge(&g, k).unwrap();
        assert_eq!(groups(&p), vec![vec![1, 4], vec![2, 3]], "k = {k}");
    }
}

#[test]
fn string_vertices() {
    let g = SocialGraph::from_adjacency([
        ("ann", vec!["bob"]),
        ("bob", vec!["cid"]),
        ("cid", vec!["dan"]),
    ])
    .unwrap();
    let p = match_and_merge(&g, 2).unwrap();
    assert_eq!(p.groups(), &[vec!["ann", "bob"], vec!["cid", "dan"]]);
}

#[test]
fn input_graph_is_left_untouched() {
    let g = path_fork();
    let before = g.clone();
    match_and_merge(&g, 4).unwrap();
    assert_eq!(g, before);
}

#[test]
fn repeated_runs_agree() {
    let g = util::random_graph(40, 0.1, 7);
    let mut engine = MatchAndMerge::new().with_observer(NoopObserver);
    let first = engine.run(&g, 5).unwrap();
    let second = engine.run(&g, 5).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unchecked_bound_can_overshoot_k() {
    let g = SocialGraph::from_edges([(0u32, 2u32), (0, 4), (1, 2), (1, 3)]).unwrap();

    let mut raw = MatchAndMerge::new()
        .with_config(CoalitionConfig::default().with_group_bound(GroupBound::Unchecked))
        .with_observer(RecordingObserver::new());
    let p = raw.run(&g, 4).unwrap();
    assert_eq!(groups(&p), vec![vec![0, 1, 2, 3, 4]]);
    assert!(raw.observer().events().contains(&RoundEvent::BoundExceeded {
        k: 4,
        largest_group: 5
    }));

    let bounded = match_and_merge(&g, 4).unwrap();
    assert_eq!(groups(&bounded), vec![vec![0, 4], vec![1, 2, 3]]);
    validate_partition(&g, &bounded, 4).unwrap();
}

#[test]
fn bound_modes_agree_when_no_overshoot() {
    let g = SocialGraph::from_edges([(0u32, 2u32), (0, 4), (1, 2), (1, 3)]).unwrap();
    let unchecked = CoalitionConfig::default().with_group_bound(GroupBound::Unchecked);
    for (k, expected) in [
        (2, vec![vec![0, 4], vec![1, 3], vec![2]]),
        (3, vec![vec![0, 4], vec![1, 2, 3]]),
    ] {
        let raw = MatchAndMerge::new()
            .with_config(unchecked.clone())
            .with_observer(NoopObserver)
            .run(&g, k)
            .unwrap();
        let bounded = match_and_merge(&g, k).unwrap();
        assert_eq!(groups(&raw), expected, "k = {k}");
        assert_eq!(raw, bounded, "k = {k}");
    }
}

#[test]
fn substitute_oracle_is_used() {
    let p = MatchAndMerge::new()
        .with_oracle(GreedyMatching)
        .with_observer(NoopObserver)
        .run(&path_fork(), 2)
        .unwrap();
    assert_eq!(groups(&p), vec![vec![1], vec![2, 3], vec![4, 6], vec![5]]);
}

#[test]
fn oracle_errors_propagate_unchanged() {
    let mut engine = MatchAndMerge::new()
        .with_oracle(FailingOracle)
        .with_observer(NoopObserver);
    assert_eq!(
        engine.run(&path_fork(), 2),
        Err(AssignError::Oracle("solver unavailable".into()))
    );
    // trivial k never reaches the oracle
    assert_eq!(engine.run(&path_fork(), 1).map(|p| p.len()), Ok(6));
}

#[test]
fn non_matching_from_oracle_is_rejected() {
    let res = MatchAndMerge::new()
        .with_oracle(FirstTwoOracle)
        .with_observer(NoopObserver)
        .run(&path_fork(), 2);
    assert!(matches!(res, Err(AssignError::InvalidMatching(_))));
}

#[test]
fn events_describe_each_round() {
    let mut engine = MatchAndMerge::new().with_observer(RecordingObserver::new());
    engine.run(&path_fork(), 3).unwrap();
    assert_eq!(
        engine.into_observer().into_events(),
        vec![
            RoundEvent::Started {
                vertices: 6,
                edges: 5,
                k: 3
            },
            RoundEvent::Matched {
                round: 1,
                nodes: 6,
                edges: 5,
                pairs: 2
            },
            RoundEvent::Contracted {
                round: 1,
                nodes: 4,
                edges: 2
            },
            RoundEvent::Matched {
                round: 2,
                nodes: 4,
                edges: 2,
                pairs: 1
            },
            RoundEvent::Contracted {
                round: 2,
                nodes: 3,
                edges: 0
            },
            RoundEvent::Finished {
                rounds: 2,
                groups: 3,
                largest_group: 3
            },
        ]
    );
}

#[test]
fn partition_value_improves_with_k() {
    let g = path_fork();
    let values: Vec<usize> = (1..=4)
        .map(|k| partition_value(&g, &match_and_merge(&g, k).unwrap()))
        .collect();
    assert_eq!(values, vec![0, 2, 3, 4]);
}

#[test]
fn partition_serializes_as_nested_lists() {
    let p = match_and_merge(&path_fork(), 4).unwrap();
    assert_eq!(serde_json::to_string(&p).unwrap(), "[[1,2],[3,4,5,6]]");
}

#[test]
fn trace_serializes() {
    let trace = MatchAndMerge::new()
        .with_observer(NoopObserver)
        .run_traced(&path_fork(), 2)
        .unwrap();
    let json = serde_json::to_value(&trace).unwrap();
    assert_eq!(json["partition"], serde_json::json!([[1, 2], [3, 4], [5], [6]]));
    assert_eq!(json["levels"][0]["merged"], serde_json::json!([[3, 4], [1, 2]]));
}
