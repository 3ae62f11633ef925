//! dagraph: in-memory directed acyclic graph container.
//!
//! Vertices are keyed by caller-supplied content values and stored in an
//! arena; adjacency lists hold lightweight handles. Edge insertion optionally
//! probes for cycles, and every traversal (depth-first or breadth-first,
//! descending or ascending, with or without depth) is a lazy iterator driven
//! by a growable stack or circular queue.
//!
//! ```
//! use dagraph::{Direction, Graph, Order};
//!
//! let mut graph = Graph::new();
//! graph.add_edge("a", "b").unwrap();
//! graph.add_edge("b", "c").unwrap();
//!
//! let levels: Vec<_> = graph
//!     .traverse_with_level(&"a", Direction::Descend, Order::BreadthFirst)
//!     .unwrap()
//!     .collect();
//! assert_eq!(levels, vec![(&"b", 1), (&"c", 2)]);
//!
//! // Closing a cycle is reported; the edge stays in place.
//! let err = graph.add_edge("c", "a").unwrap_err();
//! assert!(err.is_cycle());
//! ```

pub mod collections;
pub mod config;
pub mod error;
pub mod graph;
pub mod observability;
pub mod types;

pub use collections::{GrowableQueue, GrowableStack, WorkList};
pub use config::{GraphConfig, TraversalOptions};
pub use error::{CollectionError, ConfigError, GraphError, GraphResult};
pub use graph::{Graph, Vertex};
pub use types::{CycleWitness, DedupStrategy, Direction, GraphStats, Order, Side, VertexId};
