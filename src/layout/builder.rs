//! Initial tree construction from person and relationship records.

use crate::graph::{FamilyTreeData, LayoutEdge, LayoutNode, Person, Position, Relationship};

/// Gap between placeholder positions handed out before the first layout pass.
pub const PLACEHOLDER_SPACING: f64 = 100.0;

/// Build an unpositioned tree with one node per person, in input order.
///
/// The person whose id matches `root_person_id` is generation 0 and flagged
/// as root; everyone else is generation 1. Relationships are not consulted,
/// so the tree has no edges. Node `i` is parked at `(0, i * 100)` until a
/// layout pass positions it.
pub fn build_from_persons(persons: &[Person], root_person_id: &str) -> FamilyTreeData {
    let nodes = persons
        .iter()
        .enumerate()
        .map(|(i, person)| {
            let is_root = person.id == root_person_id;
            let mut node = LayoutNode::new(person.clone(), if is_root { 0 } else { 1 });
            node.data.is_root = is_root;
            node.position = Position::new(0.0, i as f64 * PLACEHOLDER_SPACING);
            node
        })
        .collect();

    FamilyTreeData::new(nodes, Vec::new())
}

/// Convert relationship records into family-relation edges.
///
/// `person1_id` becomes the source and `person2_id` the target, so a
/// parent-child record must list the parent first. Each edge is labelled with
/// its relation type.
pub fn relationship_edges(relationships: &[Relationship]) -> Vec<LayoutEdge> {
    relationships
        .iter()
        .map(|rel| {
            LayoutEdge::new(&rel.id, &rel.person1_id, &rel.person2_id, rel.relation_type)
                .with_label(rel.relation_type.label())
        })
        .collect()
}
