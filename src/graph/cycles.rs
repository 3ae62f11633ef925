//! Cycle detection.
//!
//! Two tools with different costs:
//!
//! - [`CycleDetector::probe`] is the per-insertion check. It walks children
//!   depth-first from one vertex and stops the first time the walk comes back
//!   to it. O(V+E) per call, reports a single witness.
//! - [`Graph::find_cycles`] audits the whole graph with Tarjan's strongly
//!   connected components, for graphs built with probing switched off.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::collections::GrowableStack;
use crate::error::Result;
use crate::graph::{Graph, Vertex};
use crate::types::{CycleWitness, VertexId};

/// Initial work-list size for a probe. Grows on demand.
const PROBE_STACK_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// CycleDetector
// ---------------------------------------------------------------------------

/// Reachability probe: is `start` reachable from its own children?
pub struct CycleDetector<'g, K> {
    graph: &'g Graph<K>,
}

impl<'g, K: Hash + Eq + Clone> CycleDetector<'g, K> {
    pub fn new(graph: &'g Graph<K>) -> Self {
        Self { graph }
    }

    /// Search for a path `start -> ... -> start`.
    ///
    /// The work-list holds `(vertex, predecessor)` frames. Each vertex is
    /// expanded at most once; `start` itself is never marked visited so the
    /// walk can pop it again. The first such pop ends the search.
    pub fn probe(&self, start: VertexId) -> Result<Option<CycleWitness<K>>> {
        let Some(origin) = self.graph.vertex(start) else {
            return Ok(None);
        };

        let mut stack = GrowableStack::new(PROBE_STACK_CAPACITY, 0)?;
        for &child in origin.children() {
            stack.push((child, start))?;
        }

        let mut visited: HashSet<VertexId> = HashSet::new();
        let mut tree: HashMap<VertexId, VertexId> = HashMap::new();

        while let Ok((current, predecessor)) = stack.pop() {
            if current == start {
                return Ok(Some(self.witness(origin, start, predecessor, &tree)));
            }
            if !visited.insert(current) {
                continue;
            }
            tree.insert(current, predecessor);

            let Some(vertex) = self.graph.vertex(current) else {
                continue;
            };
            for &child in vertex.children() {
                if child == start || !visited.contains(&child) {
                    stack.push((child, current))?;
                }
            }
        }
        Ok(None)
    }

    /// Rebuild `start -> ... -> predecessor -> start` from the DFS tree.
    fn witness(
        &self,
        origin: &Vertex<K>,
        start: VertexId,
        predecessor: VertexId,
        tree: &HashMap<VertexId, VertexId>,
    ) -> CycleWitness<K> {
        let mut ids = vec![predecessor];
        let mut cursor = predecessor;
        while cursor != start {
            match tree.get(&cursor) {
                Some(&up) => {
                    ids.push(up);
                    cursor = up;
                }
                None => break,
            }
        }
        ids.reverse();
        ids.push(start);

        let path: Vec<K> = ids
            .iter()
            .filter_map(|id| self.graph.content_of(*id).cloned())
            .collect();
        let start = origin.content().clone();
        let predecessor = self
            .graph
            .content_of(predecessor)
            .cloned()
            .unwrap_or_else(|| start.clone());
        CycleWitness {
            start,
            predecessor,
            path,
        }
    }
}

// ---------------------------------------------------------------------------
// Whole-graph audit
// ---------------------------------------------------------------------------

impl<K: Hash + Eq + Clone> Graph<K> {
    /// Every cycle component in the graph.
    ///
    /// Returns the strongly connected components with two or more vertices,
    /// plus single vertices with a self-loop. Content within a component is in
    /// Tarjan pop order. Iterative, so deep graphs do not exhaust the call
    /// stack.
    pub fn find_cycles(&self) -> Vec<Vec<K>> {
        let n = self.slots.len();
        let mut index: Vec<Option<usize>> = vec![None; n];
        let mut lowlink: Vec<usize> = vec![0; n];
        let mut on_stack: Vec<bool> = vec![false; n];
        let mut stack: Vec<usize> = Vec::new();
        let mut call: Vec<(usize, usize)> = Vec::new();
        let mut counter = 0usize;
        let mut components = Vec::new();

        for (root, _) in self.vertices() {
            if index[root.0].is_some() {
                continue;
            }
            index[root.0] = Some(counter);
            lowlink[root.0] = counter;
            counter += 1;
            stack.push(root.0);
            on_stack[root.0] = true;
            call.push((root.0, 0));

            while let Some(&(v, pos)) = call.last() {
                let children = self
                    .vertex(VertexId(v))
                    .map(|vx| vx.children())
                    .unwrap_or_default();

                if pos < children.len() {
                    if let Some(frame) = call.last_mut() {
                        frame.1 += 1;
                    }
                    let w = children[pos].0;
                    match index[w] {
                        None => {
                            index[w] = Some(counter);
                            lowlink[w] = counter;
                            counter += 1;
                            stack.push(w);
                            on_stack[w] = true;
                            call.push((w, 0));
                        }
                        Some(w_index) if on_stack[w] => {
                            lowlink[v] = lowlink[v].min(w_index);
                        }
                        Some(_) => {}
                    }
                    continue;
                }

                call.pop();
                if let Some(&(u, _)) = call.last() {
                    lowlink[u] = lowlink[u].min(lowlink[v]);
                }
                if Some(lowlink[v]) != index[v] {
                    continue;
                }

                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(VertexId(w));
                    if w == v {
                        break;
                    }
                }
                let self_loop = component.len() == 1
                    && self
                        .vertex(VertexId(v))
                        .is_some_and(|vx| vx.children().contains(&VertexId(v)));
                if component.len() >= 2 || self_loop {
                    components.push(
                        component
                            .into_iter()
                            .filter_map(|id| self.content_of(id).cloned())
                            .collect(),
                    );
                }
            }
        }

        tracing::debug!(components = components.len(), "cycle audit finished");
        components
    }

    /// Whether any cycle exists.
    pub fn has_cycle(&self) -> bool {
        !self.find_cycles().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn unchecked() -> Graph<&'static str> {
        let mut g = Graph::new();
        g.set_cycle_detection(false);
        g
    }

    fn sorted(mut component: Vec<&'static str>) -> Vec<&'static str> {
        component.sort_unstable();
        component
    }

    #[test]
    fn probe_reports_none_on_dag() {
        let mut g = unchecked();
        g.add_edge("a", "b").unwrap();
        g.add_edge("a", "c").unwrap();
        g.add_edge("b", "d").unwrap();
        g.add_edge("c", "d").unwrap();
        let a = g.id_of(&"a").unwrap();
        assert_eq!(CycleDetector::new(&g).probe(a).unwrap(), None);
    }

    #[test]
    fn probe_finds_back_edge_through_diamond() {
        let mut g = unchecked();
        g.add_edge("a", "b").unwrap();
        g.add_edge("a", "c").unwrap();
        g.add_edge("b", "d").unwrap();
        g.add_edge("c", "d").unwrap();
        g.add_edge("d", "a").unwrap();

        let a = g.id_of(&"a").unwrap();
        let witness = CycleDetector::new(&g).probe(a).unwrap().unwrap();
        assert_eq!(witness.start, "a");
        assert_eq!(witness.predecessor, "d");
        assert_eq!(witness.path.first(), Some(&"a"));
        assert_eq!(witness.path.last(), Some(&"a"));
        assert_eq!(witness.path.len(), 4);
    }

    #[test]
    fn witness_predecessor_is_last_hop_not_last_expanded() {
        let mut g = unchecked();
        g.add_edge("s", "a").unwrap();
        g.add_edge("a", "s").unwrap();
        g.add_edge("a", "b").unwrap();

        let s = g.id_of(&"s").unwrap();
        let witness = CycleDetector::new(&g).probe(s).unwrap().unwrap();
        assert_eq!(witness.pair(), (&"s", &"a"));
        assert_eq!(witness.path, vec!["s", "a", "s"]);
    }

    #[test]
    fn probe_ignores_cycles_not_through_start() {
        let mut g = unchecked();
        g.add_edge("s", "x").unwrap();
        g.add_edge("x", "y").unwrap();
        g.add_edge("y", "x").unwrap();
        let s = g.id_of(&"s").unwrap();
        assert_eq!(CycleDetector::new(&g).probe(s).unwrap(), None);
    }

    #[test]
    fn find_cycles_on_dag_is_empty() {
        let mut g = unchecked();
        g.add_edge("a", "b").unwrap();
        g.add_edge("b", "c").unwrap();
        assert!(g.find_cycles().is_empty());
        assert!(!g.has_cycle());
    }

    #[test]
    fn find_cycles_returns_each_component() {
        let mut g = unchecked();
        g.add_edge("a", "b").unwrap();
        g.add_edge("b", "a").unwrap();
        g.add_edge("c", "d").unwrap();
        g.add_edge("d", "e").unwrap();
        g.add_edge("e", "c").unwrap();
        g.add_edge("e", "f").unwrap();

        let mut components: Vec<Vec<&str>> = g.find_cycles().into_iter().map(sorted).collect();
        components.sort();
        assert_eq!(components, vec![vec!["a", "b"], vec!["c", "d", "e"]]);
    }

    #[test]
    fn find_cycles_reports_self_loop() {
        let mut g = unchecked();
        g.add_edge("a", "a").unwrap();
        g.add_edge("a", "b").unwrap();
        assert_eq!(g.find_cycles(), vec![vec!["a"]]);
    }

    #[test]
    fn find_cycles_handles_deep_chain() {
        let mut g: Graph<u32> = Graph::new();
        g.set_cycle_detection(false);
        for i in 0..50_000 {
            g.add_edge(i, i + 1).unwrap();
        }
        assert!(g.find_cycles().is_empty());
        g.add_edge(50_000, 0).unwrap();
        assert_eq!(g.find_cycles()[0].len(), 50_001);
    }
}
