//! Lazy traversal iterators.
//!
//! A single engine, [`Walk`], covers every combination of direction
//! (descend/ascend), discipline (depth-first/breadth-first) and level
//! reporting. The work-list holds `(vertex, depth)` frames; the start vertex
//! seeds its immediate neighbours at depth 1 and is never yielded itself.
//!
//! There is no visited set: a vertex reachable along several paths is yielded
//! once per path, and a cycle keeps the walk going forever. Build graphs with
//! cycle detection on, or bound the work-list with [`TraversalOptions`]. A
//! bounded walk that overflows stops; its `try_iter` view reports the
//! overflow as a final `Err` item.
//!
//! Iterators borrow the graph immutably, so it cannot be mutated while a
//! traversal is alive.

use std::hash::Hash;

use crate::collections::{GrowableQueue, GrowableStack, WorkList};
use crate::config::TraversalOptions;
use crate::error::{CollectionError, GraphError, GraphResult, Result};
use crate::graph::Graph;
use crate::types::{Direction, Order, VertexId};

/// Work-list entry: a vertex and its depth below (or above) the start.
pub type Frame = (VertexId, usize);

// ---------------------------------------------------------------------------
// Frontier
// ---------------------------------------------------------------------------

/// Work-list chosen at run time from an [`Order`].
#[derive(Debug, Clone)]
pub enum Frontier {
    Stack(GrowableStack<Frame>),
    Queue(GrowableQueue<Frame>),
}

impl Frontier {
    pub fn new(order: Order, options: TraversalOptions) -> Result<Self> {
        Ok(match order {
            Order::DepthFirst => Self::Stack(GrowableStack::new(
                options.initial_capacity,
                options.max_capacity,
            )?),
            Order::BreadthFirst => Self::Queue(GrowableQueue::new(
                options.initial_capacity,
                options.max_capacity,
            )?),
        })
    }

    pub fn order(&self) -> Order {
        match self {
            Self::Stack(_) => Order::DepthFirst,
            Self::Queue(_) => Order::BreadthFirst,
        }
    }
}

impl WorkList<Frame> for Frontier {
    fn put(&mut self, item: Frame) -> Result<()> {
        match self {
            Self::Stack(s) => s.push(item),
            Self::Queue(q) => q.push(item),
        }
    }

    fn take(&mut self) -> Result<Frame> {
        match self {
            Self::Stack(s) => s.pop(),
            Self::Queue(q) => q.pop(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Stack(s) => s.len(),
            Self::Queue(q) => q.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

/// Single-pass traversal over a graph. Yields content references.
///
/// If the work-list hits its `max_capacity`, the walk ends early and the
/// error is kept in [`Walk::error`]. Consumers of bounded walks should go
/// through [`Walk::try_iter`], which yields that error as its final item.
pub struct Walk<'g, K, W> {
    graph: &'g Graph<K>,
    work: W,
    direction: Direction,
    error: Option<CollectionError>,
    reported: bool,
}

/// Depth-first traversal driven by a [`GrowableStack`].
pub type DepthFirst<'g, K> = Walk<'g, K, GrowableStack<Frame>>;

/// Breadth-first traversal driven by a [`GrowableQueue`].
pub type BreadthFirst<'g, K> = Walk<'g, K, GrowableQueue<Frame>>;

/// Traversal whose discipline was picked at run time.
pub type Traverse<'g, K> = Walk<'g, K, Frontier>;

impl<'g, K, W: WorkList<Frame>> Walk<'g, K, W> {
    pub(crate) fn start(
        graph: &'g Graph<K>,
        start: VertexId,
        direction: Direction,
        mut work: W,
    ) -> Result<Self> {
        if let Some(vertex) = graph.slots.get(start.0).and_then(Option::as_ref) {
            for &next in vertex.neighbors(direction.side()) {
                work.put((next, 1))?;
            }
        }
        Ok(Self {
            graph,
            work,
            direction,
            error: None,
            reported: false,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Frames waiting in the work-list.
    pub fn pending(&self) -> usize {
        self.work.len()
    }

    /// The work-list error that ended this walk early, if any.
    pub fn error(&self) -> Option<&CollectionError> {
        self.error.as_ref()
    }

    /// Switch to yielding `(content, depth)` pairs.
    pub fn with_level(self) -> WithLevel<'g, K, W> {
        WithLevel { walk: self }
    }

    /// Fallible view: yields `Ok(content)` per step and, if the work-list
    /// overflowed, one final `Err`.
    pub fn try_iter(self) -> TryWalk<'g, K, W> {
        TryWalk { walk: self }
    }

    fn try_step(&mut self) -> Option<Result<(&'g K, usize)>> {
        if let Some(item) = self.step() {
            return Some(Ok(item));
        }
        if self.reported {
            return None;
        }
        self.reported = true;
        self.error.clone().map(Err)
    }

    fn step(&mut self) -> Option<(&'g K, usize)> {
        if self.error.is_some() {
            return None;
        }
        let (id, depth) = self.work.take().ok()?;
        let graph = self.graph;
        let vertex = graph.slots.get(id.0).and_then(Option::as_ref)?;

        for &next in vertex.neighbors(self.direction.side()) {
            if let Err(err) = self.work.put((next, depth + 1)) {
                tracing::warn!(%err, depth, "traversal work-list exhausted, stopping early");
                self.error = Some(err);
                break;
            }
        }
        Some((vertex.content(), depth))
    }
}

impl<'g, K, W: WorkList<Frame>> Iterator for Walk<'g, K, W> {
    type Item = &'g K;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().map(|(content, _)| content)
    }
}

/// [`Walk`] adapter yielding `(content, depth)`; depth is 1 for the start's
/// immediate neighbours.
pub struct WithLevel<'g, K, W> {
    walk: Walk<'g, K, W>,
}

impl<'g, K, W: WorkList<Frame>> WithLevel<'g, K, W> {
    pub fn error(&self) -> Option<&CollectionError> {
        self.walk.error()
    }

    /// Fallible view over `(content, depth)` pairs; see [`Walk::try_iter`].
    pub fn try_iter(self) -> TryWithLevel<'g, K, W> {
        TryWithLevel { walk: self.walk }
    }
}

impl<'g, K, W: WorkList<Frame>> Iterator for WithLevel<'g, K, W> {
    type Item = (&'g K, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.step()
    }
}

/// [`Walk`] adapter that surfaces a work-list overflow as its last item.
pub struct TryWalk<'g, K, W> {
    walk: Walk<'g, K, W>,
}

impl<'g, K, W: WorkList<Frame>> Iterator for TryWalk<'g, K, W> {
    type Item = GraphResult<&'g K, K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk
            .try_step()
            .map(|step| step.map(|(content, _)| content).map_err(GraphError::from))
    }
}

/// [`WithLevel`] adapter that surfaces a work-list overflow as its last item.
pub struct TryWithLevel<'g, K, W> {
    walk: Walk<'g, K, W>,
}

impl<'g, K, W: WorkList<Frame>> Iterator for TryWithLevel<'g, K, W> {
    type Item = GraphResult<(&'g K, usize), K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.try_step().map(|step| step.map_err(GraphError::from))
    }
}

// ---------------------------------------------------------------------------
// Graph entry points
// ---------------------------------------------------------------------------

impl<K: Hash + Eq + Clone> Graph<K> {
    /// Traverse from `content` with the graph's configured work-list sizing.
    pub fn traverse(
        &self,
        content: &K,
        direction: Direction,
        order: Order,
    ) -> GraphResult<Traverse<'_, K>, K> {
        self.traverse_with(content, direction, order, self.config().traversal)
    }

    /// Like [`Graph::traverse`], yielding `(content, depth)`.
    pub fn traverse_with_level(
        &self,
        content: &K,
        direction: Direction,
        order: Order,
    ) -> GraphResult<WithLevel<'_, K, Frontier>, K> {
        Ok(self.traverse(content, direction, order)?.with_level())
    }

    /// Traverse with explicit work-list sizing.
    pub fn traverse_with(
        &self,
        content: &K,
        direction: Direction,
        order: Order,
        options: TraversalOptions,
    ) -> GraphResult<Traverse<'_, K>, K> {
        let start = self.start_id(content)?;
        let frontier = Frontier::new(order, options)?;
        Ok(Walk::start(self, start, direction, frontier)?)
    }

    /// Stack-driven traversal.
    pub fn depth_first(
        &self,
        content: &K,
        direction: Direction,
    ) -> GraphResult<DepthFirst<'_, K>, K> {
        let start = self.start_id(content)?;
        let options = self.config().traversal;
        let stack = GrowableStack::new(options.initial_capacity, options.max_capacity)?;
        Ok(Walk::start(self, start, direction, stack)?)
    }

    /// Queue-driven traversal.
    pub fn breadth_first(
        &self,
        content: &K,
        direction: Direction,
    ) -> GraphResult<BreadthFirst<'_, K>, K> {
        let start = self.start_id(content)?;
        let options = self.config().traversal;
        let queue = GrowableQueue::new(options.initial_capacity, options.max_capacity)?;
        Ok(Walk::start(self, start, direction, queue)?)
    }

    fn start_id(&self, content: &K) -> GraphResult<VertexId, K> {
        self.id_of(content)
            .ok_or_else(|| GraphError::MissingNode(content.clone()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
