//! Graph configuration.

pub mod schema;

pub use schema::{GraphConfig, TraversalOptions};
