//! Property-based tests for dagraph using proptest.
//!
//! These tests verify invariants that must hold for all possible inputs,
//! finding edge cases that unit tests might miss.

use std::collections::HashSet;

use proptest::prelude::*;

use dagraph::{DedupStrategy, Direction, Graph, GrowableQueue, GrowableStack, Order};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Edge list over a small vertex domain so duplicates and shared endpoints
/// are common.
fn arb_edges(max_vertex: u8, max_len: usize) -> impl Strategy<Value = Vec<(u8, u8)>> {
    prop::collection::vec((0..max_vertex, 0..max_vertex), 0..max_len)
}

/// Queue operations: `Some(x)` pushes, `None` pops.
fn arb_queue_ops() -> impl Strategy<Value = Vec<Option<u16>>> {
    prop::collection::vec(prop::option::weighted(0.6, any::<u16>()), 0..200)
}

/// Graph without cycle probing, built from `edges`.
fn unchecked(edges: &[(u8, u8)]) -> Graph<u8> {
    let mut graph = Graph::new();
    graph.set_cycle_detection(false);
    for &(p, c) in edges {
        graph.add_edge(p, c).unwrap();
    }
    graph
}

/// `(content, children, parents)` for every vertex, sorted by content.
fn snapshot(graph: &Graph<u8>) -> Vec<(u8, Vec<u8>, Vec<u8>)> {
    let mut out: Vec<_> = graph
        .nodes()
        .map(|&n| {
            (
                n,
                graph.children(&n).unwrap().copied().collect(),
                graph.parents(&n).unwrap().copied().collect(),
            )
        })
        .collect();
    out.sort();
    out
}

fn first_occurrence(items: &[u16]) -> Vec<u16> {
    let mut seen = HashSet::new();
    items.iter().copied().filter(|x| seen.insert(*x)).collect()
}

// ---------------------------------------------------------------------------
// Work-lists
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn stack_pops_in_reverse_push_order(
        items in prop::collection::vec(any::<i32>(), 0..300),
        initial in 1usize..8,
    ) {
        let mut stack = GrowableStack::new(initial, 0).unwrap();
        for &x in &items {
            stack.push(x).unwrap();
        }
        let popped: Vec<i32> = std::iter::from_fn(|| stack.pop().ok()).collect();
        let expected: Vec<i32> = items.iter().rev().copied().collect();
        prop_assert_eq!(popped, expected);
        prop_assert_eq!(stack.len(), 0);
    }

    #[test]
    fn queue_matches_vecdeque_under_interleaving(
        ops in arb_queue_ops(),
        initial in 1usize..6,
    ) {
        let mut queue = GrowableQueue::new(initial, 0).unwrap();
        let mut model = std::collections::VecDeque::new();
        for op in ops {
            match op {
                Some(x) => {
                    queue.push(x).unwrap();
                    model.push_back(x);
                }
                None => prop_assert_eq!(queue.pop().ok(), model.pop_front()),
            }
            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.peek(), model.front());
        }
        let drained: Vec<u16> = std::iter::from_fn(|| queue.pop().ok()).collect();
        prop_assert_eq!(drained, model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn bounded_stack_never_exceeds_max(
        pushes in 0usize..64,
        initial in 1usize..4,
        extra in 0usize..16,
    ) {
        let max = initial + extra;
        let mut stack = GrowableStack::new(initial, max).unwrap();
        for i in 0..pushes {
            let pushed = stack.push(i);
            prop_assert_eq!(pushed.is_ok(), i < max);
        }
        prop_assert!(stack.capacity() <= max);
        prop_assert_eq!(stack.len(), pushes.min(max));
    }
}

// ---------------------------------------------------------------------------
// Graph structure
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn adjacency_is_symmetric_and_duplicate_free(edges in arb_edges(12, 60)) {
        let graph = unchecked(&edges);
        for (n, children, parents) in snapshot(&graph) {
            let unique: HashSet<_> = children.iter().collect();
            prop_assert_eq!(unique.len(), children.len());
            for c in &children {
                let back: Vec<u8> = graph.parents(c).unwrap().copied().collect();
                prop_assert_eq!(back.iter().filter(|&&p| p == n).count(), 1);
            }
            for p in &parents {
                prop_assert!(graph.contains_edge(p, &n));
            }
        }
        let distinct: HashSet<_> = edges.iter().collect();
        prop_assert_eq!(graph.edge_count(), distinct.len());
    }

    #[test]
    fn reverse_is_an_involution(edges in arb_edges(10, 40)) {
        let mut graph = unchecked(&edges);
        let before = snapshot(&graph);
        graph.reverse();
        for (n, children, parents) in &before {
            let flipped: Vec<u8> = graph.children(n).unwrap().copied().collect();
            prop_assert_eq!(&flipped, parents);
            let flipped: Vec<u8> = graph.parents(n).unwrap().copied().collect();
            prop_assert_eq!(&flipped, children);
        }
        graph.reverse();
        prop_assert_eq!(snapshot(&graph), before);
    }

    #[test]
    fn delete_node_leaves_no_references(
        edges in arb_edges(10, 40),
        victim in 0u8..10,
    ) {
        let mut graph = unchecked(&edges);
        graph.delete_node(&victim);
        prop_assert!(!graph.contains(&victim));
        for (_, children, parents) in snapshot(&graph) {
            prop_assert!(!children.contains(&victim));
            prop_assert!(!parents.contains(&victim));
        }
        prop_assert!(graph.parentless().all(|&n| n != victim));
        prop_assert!(graph.childless().all(|&n| n != victim));
        prop_assert!(graph.orphans().all(|&n| n != victim));
    }

    #[test]
    fn filters_partition_by_adjacency(edges in arb_edges(10, 30), loners in 0u8..5) {
        let mut graph = unchecked(&edges);
        for i in 0..loners {
            graph.add_node(100 + i);
        }
        let stats = graph.stats();
        prop_assert_eq!(stats.parentless, graph.parentless().count());
        prop_assert_eq!(stats.childless, graph.childless().count());
        prop_assert_eq!(stats.orphans, graph.orphans().count());
        prop_assert!(stats.orphans >= usize::from(loners));
        for &o in graph.orphans() {
            prop_assert!(graph.parentless().any(|&p| p == o));
            prop_assert!(graph.childless().any(|&c| c == o));
        }
    }

    #[test]
    fn cycle_probe_agrees_with_audit(edges in arb_edges(8, 20)) {
        let mut checked: Graph<u8> = Graph::new();
        let mut any_reported = false;
        for &(p, c) in &edges {
            if let Err(err) = checked.add_edge(p, c) {
                prop_assert!(err.is_cycle());
                any_reported = true;
            }
        }
        // edges stay installed either way, so both graphs match
        let unchecked = unchecked(&edges);
        prop_assert_eq!(snapshot(&checked), snapshot(&unchecked));
        prop_assert_eq!(any_reported, checked.has_cycle());
    }
}

// ---------------------------------------------------------------------------
// Batch dedup
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn deferred_and_incremental_batches_agree(
        targets in prop::collection::vec(0u16..600, 0..1400),
    ) {
        let mut deferred: Graph<u16> = Graph::new();
        deferred
            .add_edges_one_to_many_with(u16::MAX, targets.iter().copied(), DedupStrategy::Deferred)
            .unwrap();
        let mut incremental: Graph<u16> = Graph::new();
        incremental
            .add_edges_one_to_many_with(u16::MAX, targets.iter().copied(), DedupStrategy::Incremental)
            .unwrap();
        let mut auto: Graph<u16> = Graph::new();
        auto.add_edges_one_to_many(u16::MAX, targets.iter().copied()).unwrap();

        let expected = first_occurrence(&targets);
        for graph in [&deferred, &incremental, &auto] {
            let got: Vec<u16> = graph.children(&u16::MAX).unwrap().copied().collect();
            prop_assert_eq!(&got, &expected);
        }
    }

    #[test]
    fn many_to_one_batches_agree(parents in prop::collection::vec(0u16..300, 0..1200)) {
        let mut deferred: Graph<u16> = Graph::new();
        deferred
            .add_edges_many_to_one_with(parents.iter().copied(), u16::MAX, DedupStrategy::Deferred)
            .unwrap();
        let mut one_by_one: Graph<u16> = Graph::new();
        one_by_one.add_node(u16::MAX);
        for &p in &parents {
            one_by_one.add_edge(p, u16::MAX).unwrap();
        }
        let a: Vec<u16> = deferred.parents(&u16::MAX).unwrap().copied().collect();
        let b: Vec<u16> = one_by_one.parents(&u16::MAX).unwrap().copied().collect();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a, first_occurrence(&parents));
    }
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn breadth_first_depths_never_decrease(edges in arb_edges(10, 25)) {
        // keep only forward edges so the graph is acyclic
        let forward: Vec<(u8, u8)> = edges.into_iter().filter(|(p, c)| p < c).collect();
        let graph = unchecked(&forward);
        for &start in graph.nodes() {
            let depths: Vec<usize> = graph
                .traverse_with_level(&start, Direction::Descend, Order::BreadthFirst)
                .unwrap()
                .map(|(_, d)| d)
                .collect();
            prop_assert!(depths.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(depths.first().map_or(true, |&d| d == 1));
        }
    }

    #[test]
    fn dfs_and_bfs_yield_the_same_multiset(edges in arb_edges(9, 20)) {
        let forward: Vec<(u8, u8)> = edges.into_iter().filter(|(p, c)| p < c).collect();
        let graph = unchecked(&forward);
        for &start in graph.nodes() {
            for direction in [Direction::Descend, Direction::Ascend] {
                let mut dfs: Vec<u8> = graph
                    .traverse(&start, direction, Order::DepthFirst)
                    .unwrap()
                    .copied()
                    .collect();
                let mut bfs: Vec<u8> = graph
                    .traverse(&start, direction, Order::BreadthFirst)
                    .unwrap()
                    .copied()
                    .collect();
                dfs.sort_unstable();
                bfs.sort_unstable();
                prop_assert!(!dfs.contains(&start));
                prop_assert_eq!(dfs, bfs);
            }
        }
    }
}
