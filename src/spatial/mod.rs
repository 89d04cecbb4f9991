//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree based spatial index so the renderer can map
//! pointer coordinates back to the node under the cursor.

mod rtree;

pub use rtree::SpatialIndex;
