//! Generation-banded layout for family tree diagrams.
//!
//! This module turns a family graph into a positioned diagram: the tree
//! builder creates the initial graph from person records, the position
//! calculator places each generation on its own band, and `LayoutService`
//! memoizes both behind bounded FIFO caches.

pub mod builder;
pub mod cache;
pub mod options;
pub mod positions;
pub mod service;

pub use builder::{build_from_persons, relationship_edges};
pub use cache::FifoCache;
pub use options::{LayoutDirection, LayoutOptions, NodeSpacing};
pub use positions::calculate_positions;
pub use service::{CacheStats, LayoutService, LayoutServiceConfig};
