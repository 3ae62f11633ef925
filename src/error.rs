//! Error types for dagraph.
//!
//! Two families: [`CollectionError`] for the growable work-list containers and
//! [`GraphError`] for graph operations. Graph errors are generic over the
//! content type so a missing key or a cycle witness hands the caller's own
//! values back instead of a rendered string.

use thiserror::Error;

use crate::types::CycleWitness;

/// Errors raised by [`GrowableStack`](crate::collections::GrowableStack) and
/// [`GrowableQueue`](crate::collections::GrowableQueue).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Malformed construction parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Pop from an empty container.
    #[error("pop from an empty collection")]
    Empty,

    /// Push against a container already grown to its maximum capacity.
    #[error("capacity exceeded: container is bounded at {max} items")]
    CapacityExceeded { max: usize },

    /// Doubling the capacity would leave the addressable index range.
    #[error("capacity overflow while growing from {capacity} items")]
    Overflow { capacity: usize },
}

/// Errors raised by [`Graph`](crate::graph::Graph) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<K> {
    /// The operation referenced content that is not registered.
    #[error("node {0:?} is not in the graph")]
    MissingNode(K),

    /// An inserted edge closed a cycle. The edge stays installed.
    #[error("edge insertion created a cycle: {0}")]
    Cycle(CycleWitness<K>),

    /// A traversal work-list could not be built or grown.
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

impl<K> GraphError<K> {
    /// The cycle witness, if this is a [`GraphError::Cycle`].
    pub fn cycle(&self) -> Option<&CycleWitness<K>> {
        match self {
            Self::Cycle(witness) => Some(witness),
            _ => None,
        }
    }

    /// Whether this error is a [`GraphError::Cycle`].
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle(_))
    }
}

/// Errors raised while loading a [`GraphConfig`](crate::config::GraphConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Convenience alias used by the collections.
pub type Result<T, E = CollectionError> = std::result::Result<T, E>;

/// Convenience alias for graph operations over content type `K`.
pub type GraphResult<T, K> = std::result::Result<T, GraphError<K>>;
