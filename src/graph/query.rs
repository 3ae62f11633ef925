//! Structural queries: one-level neighbour projections and whole-graph filters.
//!
//! Every query is lazy and makes a single pass; nothing is indexed ahead of
//! time, so a full `parentless()` scan is O(V).

use std::hash::Hash;
use std::slice;

use crate::error::GraphResult;
use crate::graph::{Graph, Vertex};
use crate::types::{GraphStats, Side, VertexId};

/// Lazy projection of one adjacency list onto content values.
pub struct Neighbors<'g, K> {
    graph: &'g Graph<K>,
    ids: slice::Iter<'g, VertexId>,
}

impl<'g, K> Iterator for Neighbors<'g, K> {
    type Item = &'g K;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.ids.by_ref().find_map(|id| {
            graph
                .slots
                .get(id.0)
                .and_then(Option::as_ref)
                .map(Vertex::content)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.ids.len()))
    }
}

impl<K: Hash + Eq + Clone> Graph<K> {
    /// Immediate children of `content`.
    pub fn children(&self, content: &K) -> GraphResult<Neighbors<'_, K>, K> {
        self.neighbors(content, Side::Children)
    }

    /// Immediate parents of `content`.
    pub fn parents(&self, content: &K) -> GraphResult<Neighbors<'_, K>, K> {
        self.neighbors(content, Side::Parents)
    }

    /// Immediate neighbours of `content` on one side.
    pub fn neighbors(&self, content: &K, side: Side) -> GraphResult<Neighbors<'_, K>, K> {
        let vertex = self.get_vertex(content)?;
        Ok(Neighbors {
            graph: self,
            ids: vertex.neighbors(side).iter(),
        })
    }

    /// Every content value, in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = &K> + '_ {
        self.vertices().map(|(_, v)| v.content())
    }

    /// Vertices with no parents, whether or not they have children.
    pub fn parentless(&self) -> impl Iterator<Item = &K> + '_ {
        self.filter_vertices(|v| !v.has_parents())
    }

    /// Vertices with no children, whether or not they have parents.
    pub fn childless(&self) -> impl Iterator<Item = &K> + '_ {
        self.filter_vertices(|v| !v.has_children())
    }

    /// Vertices with neither parents nor children.
    pub fn orphans(&self) -> impl Iterator<Item = &K> + '_ {
        self.filter_vertices(Vertex::is_orphan)
    }

    /// Node, edge, and boundary counts in one pass.
    pub fn stats(&self) -> GraphStats {
        self.vertices()
            .fold(GraphStats::default(), |mut stats, (_, v)| {
                stats.nodes += 1;
                stats.edges += v.children().len();
                stats.parentless += usize::from(!v.has_parents());
                stats.childless += usize::from(!v.has_children());
                stats.orphans += usize::from(v.is_orphan());
                stats
            })
    }

    fn filter_vertices<'a, F>(&'a self, keep: F) -> impl Iterator<Item = &'a K> + 'a
    where
        F: Fn(&Vertex<K>) -> bool + 'a,
    {
        self.vertices()
            .filter(move |(_, v)| keep(v))
            .map(|(_, v)| v.content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use pretty_assertions::assert_eq;

    fn sorted<'a>(it: impl Iterator<Item = &'a &'static str>) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = it.copied().collect();
        out.sort_unstable();
        out
    }

    /// a -> b -> c, d -> c, plus the isolated vertex z.
    fn sample() -> Graph<&'static str> {
        let mut g = Graph::new();
        g.add_edge("a", "b").unwrap();
        g.add_edge("b", "c").unwrap();
        g.add_edge("d", "c").unwrap();
        g.add_node("z");
        g
    }

    #[test]
    fn children_and_parents_project_one_level() {
        let g = sample();
        assert_eq!(g.children(&"a").unwrap().collect::<Vec<_>>(), vec![&"b"]);
        assert_eq!(
            g.parents(&"c").unwrap().collect::<Vec<_>>(),
            vec![&"b", &"d"]
        );
        assert_eq!(g.children(&"z").unwrap().count(), 0);
    }

    #[test]
    fn projections_on_missing_node_fail() {
        let g = sample();
        assert!(matches!(g.children(&"q"), Err(GraphError::MissingNode("q"))));
        assert!(matches!(g.parents(&"q"), Err(GraphError::MissingNode("q"))));
    }

    #[test]
    fn parentless_includes_isolated_vertices() {
        let g = sample();
        assert_eq!(sorted(g.parentless()), vec!["a", "d", "z"]);
    }

    #[test]
    fn childless_includes_isolated_vertices() {
        let g = sample();
        assert_eq!(sorted(g.childless()), vec!["c", "z"]);
    }

    #[test]
    fn orphans_have_neither_side() {
        let g = sample();
        assert_eq!(sorted(g.orphans()), vec!["z"]);
    }

    #[test]
    fn deleted_vertices_disappear_from_filters() {
        let mut g = sample();
        g.delete_node(&"z");
        g.delete_node(&"b");
        assert_eq!(sorted(g.orphans()), vec!["a"]);
        assert_eq!(sorted(g.parentless()), vec!["a", "d"]);
        assert_eq!(sorted(g.childless()), vec!["a", "c"]);
        assert_eq!(sorted(g.nodes()), vec!["a", "c", "d"]);
    }

    #[test]
    fn stats_count_every_category() {
        let g = sample();
        assert_eq!(
            g.stats(),
            GraphStats {
                nodes: 5,
                edges: 3,
                parentless: 3,
                childless: 2,
                orphans: 1,
            }
        );
    }
}
