//! Graph layer: vertex arena, mutation, cycle detection, queries, and
//! traversals.

pub mod cycles;
pub mod query;
pub mod store;
pub mod traversal;
pub mod vertex;

pub use cycles::CycleDetector;
pub use query::Neighbors;
pub use store::Graph;
pub use traversal::{
    BreadthFirst, DepthFirst, Frame, Frontier, Traverse, TryWalk, TryWithLevel, Walk, WithLevel,
};
pub use vertex::Vertex;
