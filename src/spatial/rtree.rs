//! Hit testing over a laid-out tree.
//!
//! Each node is stored as its position tagged with the node id, so pointer
//! coordinates from the renderer map back to the node under the cursor.

use rstar::primitives::GeomWithData;
use rstar::{PointDistance, RTree, AABB};

use crate::graph::{LayoutNode, Position};

type NodeSite = GeomWithData<[f64; 2], String>;

/// R*-tree over node positions, rebuilt wholesale after each layout.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<NodeSite>,
}

impl SpatialIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the positions of `nodes`.
    pub fn rebuild(&mut self, nodes: &[LayoutNode]) {
        let sites = nodes
            .iter()
            .map(|node| NodeSite::new([node.position.x, node.position.y], node.id.clone()))
            .collect();
        self.tree = RTree::bulk_load(sites);
    }

    /// Id of the node closest to `at`, if it lies within `max_distance`.
    pub fn node_at(&self, at: Position, max_distance: f64) -> Option<&str> {
        let point = [at.x, at.y];
        self.tree
            .nearest_neighbor(&point)
            .filter(|site| site.distance_2(&point) <= max_distance * max_distance)
            .map(|site| site.data.as_str())
    }

    /// Ids of all nodes inside the box spanned by two corners.
    pub fn nodes_in(&self, corner: Position, opposite: Position) -> Vec<&str> {
        let area = AABB::from_corners([corner.x, corner.y], [opposite.x, opposite.y]);
        self.tree
            .locate_in_envelope(&area)
            .map(|site| site.data.as_str())
            .collect()
    }
}
