//! Graph vertex: one content value plus its parent and child adjacency.

use std::collections::HashSet;

use crate::types::{Side, VertexId};

/// A vertex owned by a [`Graph`](super::Graph) arena.
///
/// Adjacency lists hold [`VertexId`] handles into the same arena. They are
/// insertion-ordered; with duplicate checking on (the default) every
/// neighbour appears at most once. Mutators are crate-private: the
/// parent/child symmetry is maintained by the graph, never by callers.
#[derive(Debug, Clone)]
pub struct Vertex<K> {
    content: K,
    parents: Vec<VertexId>,
    children: Vec<VertexId>,
    suppress_parent_dups: bool,
    suppress_child_dups: bool,
}

impl<K> Vertex<K> {
    pub(crate) fn new(content: K) -> Self {
        Self {
            content,
            parents: Vec::new(),
            children: Vec::new(),
            suppress_parent_dups: true,
            suppress_child_dups: true,
        }
    }

    pub fn content(&self) -> &K {
        &self.content
    }

    pub fn parents(&self) -> &[VertexId] {
        &self.parents
    }

    pub fn children(&self) -> &[VertexId] {
        &self.children
    }

    /// Adjacency on one side.
    pub fn neighbors(&self, side: Side) -> &[VertexId] {
        match side {
            Side::Parents => &self.parents,
            Side::Children => &self.children,
        }
    }

    pub fn has_parents(&self) -> bool {
        !self.parents.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// No parents and no children.
    pub fn is_orphan(&self) -> bool {
        self.parents.is_empty() && self.children.is_empty()
    }

    pub fn is_checking_duplicates(&self, side: Side) -> bool {
        match side {
            Side::Parents => self.suppress_parent_dups,
            Side::Children => self.suppress_child_dups,
        }
    }

    pub(crate) fn add_parent(&mut self, id: VertexId) -> bool {
        Self::append(&mut self.parents, id, self.suppress_parent_dups)
    }

    pub(crate) fn add_child(&mut self, id: VertexId) -> bool {
        Self::append(&mut self.children, id, self.suppress_child_dups)
    }

    pub(crate) fn remove_parent(&mut self, id: VertexId) -> bool {
        Self::remove(&mut self.parents, id)
    }

    pub(crate) fn remove_child(&mut self, id: VertexId) -> bool {
        Self::remove(&mut self.children, id)
    }

    /// Toggle duplicate checking on one side. Re-enabling runs one stable,
    /// set-assisted dedup pass over that side.
    pub(crate) fn set_duplicate_checking(&mut self, side: Side, enabled: bool) {
        let (list, flag) = match side {
            Side::Parents => (&mut self.parents, &mut self.suppress_parent_dups),
            Side::Children => (&mut self.children, &mut self.suppress_child_dups),
        };
        if enabled && !*flag {
            dedup_stable(list);
        }
        *flag = enabled;
    }

    /// Swap the two adjacency sides together with their checking flags.
    pub(crate) fn flip(&mut self) {
        std::mem::swap(&mut self.parents, &mut self.children);
        std::mem::swap(&mut self.suppress_parent_dups, &mut self.suppress_child_dups);
    }

    pub(crate) fn detach_all(&mut self) -> (Vec<VertexId>, Vec<VertexId>) {
        (
            std::mem::take(&mut self.parents),
            std::mem::take(&mut self.children),
        )
    }

    fn append(list: &mut Vec<VertexId>, id: VertexId, check: bool) -> bool {
        if check && list.contains(&id) {
            return false;
        }
        list.push(id);
        true
    }

    fn remove(list: &mut Vec<VertexId>, id: VertexId) -> bool {
        match list.iter().position(|&v| v == id) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// Keep the first occurrence of each id, preserving order.
fn dedup_stable(list: &mut Vec<VertexId>) {
    let mut seen = HashSet::with_capacity(list.len());
    list.retain(|id| seen.insert(*id));
}
