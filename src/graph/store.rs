//! Graph container: vertex arena, content index, and edge mutation.
//!
//! Vertices live in a slot arena addressed by [`VertexId`]; adjacency lists
//! store handles into the same arena. The content index maps each content
//! value to its slot. Every mutation below keeps the parent/child symmetry:
//! `c` is in `p.children` iff `p` is in `c.parents`.

use std::collections::HashMap;
use std::hash::Hash;

use crate::config::GraphConfig;
use crate::error::{GraphError, GraphResult};
use crate::graph::cycles::CycleDetector;
use crate::graph::vertex::Vertex;
use crate::types::{DedupStrategy, Side, VertexId};

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// In-memory directed graph keyed by content value.
///
/// Cycle detection is on by default: every edge insertion probes for a path
/// back to the new edge's parent and reports a [`GraphError::Cycle`] if one
/// exists. The probe is diagnostic, the edge is kept either way.
///
/// Content values are stored twice (index key and vertex), so callers with
/// expensive content should wrap it in `Rc`/`Arc`.
#[derive(Debug, Clone)]
pub struct Graph<K> {
    pub(crate) slots: Vec<Option<Vertex<K>>>,
    free: Vec<VertexId>,
    index: HashMap<K, VertexId>,
    config: GraphConfig,
}

impl<K: Hash + Eq + Clone> Default for Graph<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone> Graph<K> {
    /// Empty graph with cycle detection enabled.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // -------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of parent→child links. O(V).
    pub fn edge_count(&self) -> usize {
        self.vertices().map(|(_, v)| v.children().len()).sum()
    }

    pub fn contains(&self, content: &K) -> bool {
        self.index.contains_key(content)
    }

    /// Arena handle of a content value.
    pub fn id_of(&self, content: &K) -> Option<VertexId> {
        self.index.get(content).copied()
    }

    /// The vertex holding `content`.
    pub fn get_vertex(&self, content: &K) -> GraphResult<&Vertex<K>, K> {
        self.id_of(content)
            .and_then(|id| self.vertex(id))
            .ok_or_else(|| GraphError::MissingNode(content.clone()))
    }

    /// The vertex in slot `id`, if that slot is occupied.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<K>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn contains_edge(&self, parent: &K, child: &K) -> bool {
        match (self.get_vertex(parent), self.id_of(child)) {
            (Ok(p), Some(cid)) => p.children().contains(&cid),
            _ => false,
        }
    }

    /// Occupied slots in arena order.
    pub(crate) fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex<K>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (VertexId(i), v)))
    }

    pub(crate) fn content_of(&self, id: VertexId) -> Option<&K> {
        self.vertex(id).map(Vertex::content)
    }

    fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex<K>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    // -------------------------------------------------------------------
    // Nodes
    // -------------------------------------------------------------------

    /// Register `content`, returning its handle. No-op if already present.
    pub fn add_node(&mut self, content: K) -> VertexId {
        if let Some(id) = self.id_of(&content) {
            return id;
        }
        let vertex = Vertex::new(content.clone());
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(vertex);
                id
            }
            None => {
                self.slots.push(Some(vertex));
                VertexId(self.slots.len() - 1)
            }
        };
        self.index.insert(content, id);
        tracing::trace!(%id, "added node");
        id
    }

    /// Remove `content` and every link touching it. Returns `false` if it was
    /// not present.
    pub fn delete_node(&mut self, content: &K) -> bool {
        let Some(id) = self.index.remove(content) else {
            return false;
        };
        let Some(mut vertex) = self.slots.get_mut(id.0).and_then(Option::take) else {
            return false;
        };

        let (parents, children) = vertex.detach_all();
        for parent in &parents {
            if let Some(p) = self.vertex_mut(*parent) {
                p.remove_child(id);
            }
        }
        for child in &children {
            if let Some(c) = self.vertex_mut(*child) {
                c.remove_parent(id);
            }
        }
        self.free.push(id);

        tracing::debug!(
            %id,
            parents = parents.len(),
            children = children.len(),
            "deleted node"
        );
        true
    }

    /// Drop every vertex. Configuration is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
    }

    // -------------------------------------------------------------------
    // Edges
    // -------------------------------------------------------------------

    /// Link `parent -> child`, creating either endpoint if needed.
    ///
    /// With cycle detection on, probes from `parent` afterwards and returns
    /// [`GraphError::Cycle`] if the new edge closed a cycle. The edge is not
    /// rolled back.
    pub fn add_edge(&mut self, parent: K, child: K) -> GraphResult<(), K> {
        let pid = self.add_node(parent);
        let cid = self.add_node(child);
        self.link(pid, cid);

        if self.config.cycle_detection {
            self.check_cycle_from(pid)?;
        }
        Ok(())
    }

    /// Link every parent to `child`, choosing the dedup strategy by batch size.
    pub fn add_edges_many_to_one<I>(&mut self, parents: I, child: K) -> GraphResult<(), K>
    where
        I: IntoIterator<Item = K>,
    {
        self.add_edges_many_to_one_with(parents, child, DedupStrategy::Auto)
    }

    /// Link every parent to `child` with an explicit dedup strategy.
    ///
    /// With cycle detection on, probes once from each newly linked parent
    /// after all links are installed and reports the first cycle found.
    pub fn add_edges_many_to_one_with<I>(
        &mut self,
        parents: I,
        child: K,
        strategy: DedupStrategy,
    ) -> GraphResult<(), K>
    where
        I: IntoIterator<Item = K>,
    {
        let parents: Vec<K> = parents.into_iter().collect();
        let cid = self.add_node(child);
        let deferred = self.begin_batch(cid, Side::Parents, parents.len(), strategy);

        let mut linked = Vec::new();
        for parent in parents {
            let pid = self.add_node(parent);
            let fresh = self.vertex_mut(pid).is_some_and(|p| p.add_child(cid));
            if let Some(c) = self.vertex_mut(cid) {
                c.add_parent(pid);
            }
            if fresh {
                linked.push(pid);
            }
        }

        if deferred {
            self.end_batch(cid, Side::Parents);
        }

        if self.config.cycle_detection {
            for pid in linked {
                self.check_cycle_from(pid)?;
            }
        }
        Ok(())
    }

    /// Link `parent` to every child, choosing the dedup strategy by batch size.
    pub fn add_edges_one_to_many<I>(&mut self, parent: K, children: I) -> GraphResult<(), K>
    where
        I: IntoIterator<Item = K>,
    {
        self.add_edges_one_to_many_with(parent, children, DedupStrategy::Auto)
    }

    /// Link `parent` to every child with an explicit dedup strategy.
    ///
    /// With cycle detection on, probes once from `parent` after all links are
    /// installed.
    pub fn add_edges_one_to_many_with<I>(
        &mut self,
        parent: K,
        children: I,
        strategy: DedupStrategy,
    ) -> GraphResult<(), K>
    where
        I: IntoIterator<Item = K>,
    {
        let children: Vec<K> = children.into_iter().collect();
        let pid = self.add_node(parent);
        let deferred = self.begin_batch(pid, Side::Children, children.len(), strategy);

        for child in children {
            let cid = self.add_node(child);
            if let Some(p) = self.vertex_mut(pid) {
                p.add_child(cid);
            }
            if let Some(c) = self.vertex_mut(cid) {
                c.add_parent(pid);
            }
        }

        if deferred {
            self.end_batch(pid, Side::Children);
        }

        if self.config.cycle_detection {
            self.check_cycle_from(pid)?;
        }
        Ok(())
    }

    /// Unlink `parent -> child`. Returns `false` if there was no such edge.
    pub fn remove_edge(&mut self, parent: &K, child: &K) -> bool {
        match (self.id_of(parent), self.id_of(child)) {
            (Some(pid), Some(cid)) => self.unlink(pid, cid),
            _ => false,
        }
    }

    /// Unlink every `parent -> child`; returns how many edges were removed.
    pub fn remove_edges_many_to_one<'a, I>(&mut self, parents: I, child: &K) -> usize
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let Some(cid) = self.id_of(child) else {
            return 0;
        };
        let ids: Vec<VertexId> = parents
            .into_iter()
            .filter_map(|parent| self.id_of(parent))
            .collect();
        ids.into_iter().filter(|&pid| self.unlink(pid, cid)).count()
    }

    /// Unlink every `parent -> child`; returns how many edges were removed.
    pub fn remove_edges_one_to_many<'a, I>(&mut self, parent: &K, children: I) -> usize
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let Some(pid) = self.id_of(parent) else {
            return 0;
        };
        let ids: Vec<VertexId> = children
            .into_iter()
            .filter_map(|child| self.id_of(child))
            .collect();
        ids.into_iter().filter(|&cid| self.unlink(pid, cid)).count()
    }

    // -------------------------------------------------------------------
    // Whole-graph operations
    // -------------------------------------------------------------------

    /// Swap parents and children of every vertex in place.
    pub fn reverse(&mut self) {
        for vertex in self.slots.iter_mut().flatten() {
            vertex.flip();
        }
    }

    /// Toggle edge-insertion cycle probing. Existing structure is not
    /// re-validated; use [`Graph::find_cycles`] for that.
    pub fn set_cycle_detection(&mut self, enabled: bool) {
        self.config.cycle_detection = enabled;
    }

    pub fn cycle_detection_enabled(&self) -> bool {
        self.config.cycle_detection
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    fn link(&mut self, pid: VertexId, cid: VertexId) {
        if let Some(p) = self.vertex_mut(pid) {
            p.add_child(cid);
        }
        if let Some(c) = self.vertex_mut(cid) {
            c.add_parent(pid);
        }
    }

    fn unlink(&mut self, pid: VertexId, cid: VertexId) -> bool {
        let removed = self.vertex_mut(pid).is_some_and(|p| p.remove_child(cid));
        if removed {
            if let Some(c) = self.vertex_mut(cid) {
                c.remove_parent(pid);
            }
        }
        removed
    }

    /// Switch the receiving side to append-only when the strategy defers.
    fn begin_batch(
        &mut self,
        id: VertexId,
        side: Side,
        batch_len: usize,
        strategy: DedupStrategy,
    ) -> bool {
        let resolved = strategy.resolve(batch_len, self.config.batch_dedup_threshold);
        if resolved != DedupStrategy::Deferred {
            return false;
        }
        tracing::debug!(%id, batch_len, ?side, "deferring duplicate suppression for batch");
        if let Some(v) = self.vertex_mut(id) {
            v.set_duplicate_checking(side, false);
        }
        true
    }

    fn end_batch(&mut self, id: VertexId, side: Side) {
        if let Some(v) = self.vertex_mut(id) {
            v.set_duplicate_checking(side, true);
        }
    }

    fn check_cycle_from(&self, start: VertexId) -> GraphResult<(), K> {
        match CycleDetector::new(self).probe(start)? {
            Some(witness) => {
                tracing::warn!(
                    start = %start,
                    length = witness.path.len().saturating_sub(1),
                    "edge insertion closed a cycle"
                );
                Err(GraphError::Cycle(witness))
            }
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
