//! Error type for tree validation and (de)serialization.
//!
//! Validation failures are structural: an upstream producer handed over a
//! graph that cannot be laid out. They are reported, never auto-corrected.

/// Errors raised while validating or decoding a family tree.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A node is missing a required field or carries a non-finite position.
    #[error("Invalid node structure ({id}): {reason}")]
    InvalidNode {
        /// Offending node id (may be empty).
        id: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// An edge is missing a required field.
    #[error("Invalid edge structure ({id}): {reason}")]
    InvalidEdge {
        /// Offending edge id (may be empty).
        id: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// An edge endpoint does not name a node of the same tree.
    #[error("Edge references non-existent node: {0}")]
    MissingNode(String),

    /// A relation type outside {parent-child, spouse, sibling}.
    #[error("Invalid relation type: {0}")]
    InvalidRelationType(String),

    /// Malformed JSON input.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    pub(crate) fn invalid_node(id: &str, reason: &'static str) -> Self {
        Self::InvalidNode {
            id: id.to_string(),
            reason,
        }
    }

    pub(crate) fn invalid_edge(id: &str, reason: &'static str) -> Self {
        Self::InvalidEdge {
            id: id.to_string(),
            reason,
        }
    }
}
