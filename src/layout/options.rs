//! Layout direction and spacing options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Diagram orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Top to bottom: generations grow downward.
    #[default]
    TB,
    /// Bottom to top: generations grow upward.
    BT,
    /// Left to right: generations grow rightward.
    LR,
    /// Right to left: generations grow leftward.
    RL,
}

impl LayoutDirection {
    /// Generations vary along Y, siblings along X.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::TB | Self::BT)
    }

    /// Wire name ("TB", "BT", "LR", "RL").
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TB => "TB",
            Self::BT => "BT",
            Self::LR => "LR",
            Self::RL => "RL",
        }
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gap between neighbouring nodes of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeSpacing {
    /// Used by vertical layouts (TB/BT).
    pub horizontal: f64,
    /// Used by horizontal layouts (LR/RL).
    pub vertical: f64,
}

impl Default for NodeSpacing {
    fn default() -> Self {
        Self {
            horizontal: 200.0,
            vertical: 150.0,
        }
    }
}

/// Configuration for position computation.
///
/// Zero or negative spacings are accepted; they collapse or mirror the
/// diagram but never fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub direction: LayoutDirection,
    pub node_spacing: NodeSpacing,
    pub generation_spacing: f64,
}

impl LayoutOptions {
    /// Default spacings with the given direction.
    pub fn with_direction(direction: LayoutDirection) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Gap between siblings along the cross axis of this direction.
    #[inline]
    pub fn sibling_spacing(&self) -> f64 {
        if self.direction.is_vertical() {
            self.node_spacing.horizontal
        } else {
            self.node_spacing.vertical
        }
    }

    /// Cache-key form: `direction:horizontal:vertical:generation`.
    pub fn fingerprint(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.direction,
            self.node_spacing.horizontal,
            self.node_spacing.vertical,
            self.generation_spacing
        )
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::TB,
            node_spacing: NodeSpacing::default(),
            generation_spacing: 200.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LayoutOptions::default();
        assert_eq!(options.direction, LayoutDirection::TB);
        assert_eq!(options.node_spacing.horizontal, 200.0);
        assert_eq!(options.node_spacing.vertical, 150.0);
        assert_eq!(options.generation_spacing, 200.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let options: LayoutOptions = serde_json::from_str(r#"{"direction":"LR"}"#).unwrap();
        assert_eq!(options.direction, LayoutDirection::LR);
        assert_eq!(options.generation_spacing, 200.0);
        assert_eq!(options.node_spacing, NodeSpacing::default());
    }

    #[test]
    fn test_sibling_spacing_follows_direction() {
        assert_eq!(LayoutOptions::with_direction(LayoutDirection::TB).sibling_spacing(), 200.0);
        assert_eq!(LayoutOptions::with_direction(LayoutDirection::BT).sibling_spacing(), 200.0);
        assert_eq!(LayoutOptions::with_direction(LayoutDirection::LR).sibling_spacing(), 150.0);
        assert_eq!(LayoutOptions::with_direction(LayoutDirection::RL).sibling_spacing(), 150.0);
    }

    #[test]
    fn test_fingerprint_distinguishes_options() {
        let tb = LayoutOptions::with_direction(LayoutDirection::TB);
        let lr = LayoutOptions::with_direction(LayoutDirection::LR);
        assert_ne!(tb.fingerprint(), lr.fingerprint());

        let mut wider = tb;
        wider.node_spacing.horizontal = 250.0;
        assert_ne!(tb.fingerprint(), wider.fingerprint());
        assert_eq!(tb.fingerprint(), LayoutOptions::default().fingerprint());
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "direction": "RL",
            "nodeSpacing": { "horizontal": 10, "vertical": 20 },
            "generationSpacing": 30
        }"#;
        let options: LayoutOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.direction, LayoutDirection::RL);
        assert_eq!(options.sibling_spacing(), 20.0);
        assert_eq!(options.generation_spacing, 30.0);
    }
}
