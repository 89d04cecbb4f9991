//! Family graph data model and structural checks.
//!
//! This module provides the person/relationship records supplied upstream,
//! the node/edge/tree types the layout engine works on, the validator that
//! rejects malformed trees, and a petgraph-backed relationship index.

mod edge;
mod engine;
mod node;
mod person;
mod tree;
mod validate;

pub use edge::{EdgeData, EdgeKind, LayoutEdge, RelationType};
pub use engine::FamilyGraph;
pub use node::{LayoutNode, NodeData, NodeKind, Position};
pub use person::{Gender, Person, Relationship};
pub use tree::FamilyTreeData;
pub use validate::{validate, validate_json};
