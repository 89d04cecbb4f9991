//! FamilyTreeData - the (nodes, edges) aggregate handed between stages.

use serde::{Deserialize, Serialize};

use super::edge::LayoutEdge;
use super::node::LayoutNode;
use crate::error::LayoutError;

/// A family graph: person nodes plus typed relation edges.
///
/// Values are treated as immutable by the layout stages; repositioning
/// produces a new tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyTreeData {
    #[serde(default)]
    pub nodes: Vec<LayoutNode>,
    #[serde(default)]
    pub edges: Vec<LayoutEdge>,
}

impl FamilyTreeData {
    /// Create a tree from its parts.
    pub fn new(nodes: Vec<LayoutNode>, edges: Vec<LayoutEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Decode a tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the tree as JSON.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string(self)?)
    }

    /// True when there are neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// The node flagged as root, if any.
    pub fn root(&self) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.data.is_root)
    }

    /// Bounding box of all node positions as (min_x, min_y, max_x, max_y).
    ///
    /// Returns None for a tree without nodes.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.nodes.first()?.position;
        let init = (first.x, first.y, first.x, first.y);

        Some(self.nodes.iter().fold(init, |(min_x, min_y, max_x, max_y), node| {
            let p = node.position;
            (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
        }))
    }
}
