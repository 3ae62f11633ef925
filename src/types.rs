//! Core value types shared across dagraph.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// VertexId
// ---------------------------------------------------------------------------

/// Handle to a vertex slot inside a [`Graph`](crate::graph::Graph) arena.
///
/// Handles are only meaningful for the graph that issued them. A handle for a
/// deleted vertex may later be reused by a new vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub(crate) usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Direction / Order / Side
// ---------------------------------------------------------------------------

/// Which adjacency a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow children.
    Descend,
    /// Follow parents.
    Ascend,
}

impl Direction {
    /// Parse from a loose string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "descend" | "down" | "children" => Some(Self::Descend),
            "ascend" | "up" | "parents" => Some(Self::Ascend),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Descend => "descend",
            Self::Ascend => "ascend",
        }
    }

    /// The adjacency side this direction walks.
    pub fn side(self) -> Side {
        match self {
            Self::Descend => Side::Children,
            Self::Ascend => Side::Parents,
        }
    }
}

/// Work-list discipline of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    /// Stack-driven, last pushed first.
    DepthFirst,
    /// Queue-driven, non-decreasing depth.
    BreadthFirst,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepthFirst => "depth-first",
            Self::BreadthFirst => "breadth-first",
        }
    }
}

/// One of the two adjacency sequences of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Parents,
    Children,
}

// ---------------------------------------------------------------------------
// DedupStrategy
// ---------------------------------------------------------------------------

/// How a batch edge insertion keeps the receiving adjacency duplicate-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DedupStrategy {
    /// `Deferred` when the batch reaches the configured threshold,
    /// `Incremental` below it.
    #[default]
    Auto,
    /// Linear membership scan before every append.
    Incremental,
    /// Append blindly, then run one set-assisted dedup pass.
    Deferred,
}

impl DedupStrategy {
    /// Resolve `Auto` against a batch size and threshold.
    pub fn resolve(self, batch_len: usize, threshold: usize) -> Self {
        match self {
            Self::Auto if batch_len >= threshold => Self::Deferred,
            Self::Auto => Self::Incremental,
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// CycleWitness
// ---------------------------------------------------------------------------

/// Evidence that an edge insertion closed a cycle.
///
/// `start` is the vertex the probe started from (the parent of the inserted
/// edge) and `predecessor` the vertex whose child link leads back to it,
/// i.e. the last hop of the closing path. This is not necessarily the vertex
/// the probe expanded last: for `s -> a`, `a -> [s, b]` the witness is
/// `(s, a)` even if `b` was explored first. `path` runs
/// `start -> ... -> predecessor -> start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleWitness<K> {
    pub start: K,
    pub predecessor: K,
    pub path: Vec<K>,
}

impl<K> CycleWitness<K> {
    /// The `(start, predecessor)` pair.
    pub fn pair(&self) -> (&K, &K) {
        (&self.start, &self.predecessor)
    }
}

impl<K: fmt::Debug> fmt::Display for CycleWitness<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, content) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{content:?}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Aggregate statistics about a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub parentless: usize,
    pub childless: usize,
    pub orphans: usize,
}
