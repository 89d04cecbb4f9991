//! Structural validation of a family tree before layout.
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 1. An empty tree (no nodes, no edges) is valid.
//! 2. Every node needs an id, a finite position and a person.
//! 3. A tree without edges is valid once its nodes pass.
//! 4. Every edge needs an id, a source and a target.
//! 5. Both endpoints must name nodes of the same tree.
//!
//! Node and edge type tags and relation types are closed enums, so they are
//! already checked when a tree is decoded.

use std::collections::HashSet;

use super::tree::FamilyTreeData;
use crate::error::LayoutError;

/// Validate a tree, failing on the first structural problem found.
pub fn validate(tree: &FamilyTreeData) -> Result<(), LayoutError> {
    if tree.nodes.is_empty() && tree.edges.is_empty() {
        return Ok(());
    }

    for node in &tree.nodes {
        if node.id.is_empty() {
            return Err(LayoutError::invalid_node(&node.id, "missing id"));
        }
        if !node.position.is_finite() {
            return Err(LayoutError::invalid_node(&node.id, "position is not finite"));
        }
        if node.data.person.is_none() {
            return Err(LayoutError::invalid_node(&node.id, "missing person"));
        }
    }

    if tree.edges.is_empty() {
        return Ok(());
    }

    let node_ids: HashSet<&str> = tree.nodes.iter().map(|node| node.id.as_str()).collect();

    for edge in &tree.edges {
        if edge.id.is_empty() {
            return Err(LayoutError::invalid_edge(&edge.id, "missing id"));
        }
        if edge.source.is_empty() {
            return Err(LayoutError::invalid_edge(&edge.id, "missing source"));
        }
        if edge.target.is_empty() {
            return Err(LayoutError::invalid_edge(&edge.id, "missing target"));
        }
        if !node_ids.contains(edge.source.as_str()) {
            return Err(LayoutError::MissingNode(edge.source.clone()));
        }
        if !node_ids.contains(edge.target.as_str()) {
            return Err(LayoutError::MissingNode(edge.target.clone()));
        }
    }

    Ok(())
}

/// Decode a tree from JSON and validate it.
///
/// Relation types outside the permitted set surface here as decode errors
/// carrying the "Invalid relation type" message.
pub fn validate_json(json: &str) -> Result<FamilyTreeData, LayoutError> {
    let tree = FamilyTreeData::from_json(json)?;
    validate(&tree)?;
    Ok(tree)
}
