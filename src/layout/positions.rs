//! Generation-banded position calculator.
//!
//! Nodes are grouped by generation. Each generation becomes a band along the
//! main axis at `generation * generation_spacing`, and the nodes of a band are
//! spread along the cross axis at `sibling_spacing` intervals, centred on 0.
//!
//! | direction | main axis | cross axis | flip        |
//! |-----------|-----------|------------|-------------|
//! | TB        | y         | x          | none        |
//! | BT        | y         | x          | y negated   |
//! | LR        | x         | y          | none        |
//! | RL        | x         | y          | x negated   |

use std::collections::HashMap;

use super::options::{LayoutDirection, LayoutOptions};
use crate::graph::{LayoutNode, Position};

/// Compute a position for every node.
///
/// The input is left untouched; the output holds fresh copies with only
/// `position` changed. Output is grouped by generation in order of first
/// appearance, and within a generation nodes keep their input order.
pub fn calculate_positions(nodes: &[LayoutNode], options: &LayoutOptions) -> Vec<LayoutNode> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let spacing = options.sibling_spacing();
    let mut positioned = Vec::with_capacity(nodes.len());

    for (generation, band) in generation_bands(nodes) {
        let total_span = (band.len() - 1) as f64 * spacing;
        let start_offset = -total_span / 2.0;
        let main = generation as f64 * options.generation_spacing;

        for (i, node) in band.into_iter().enumerate() {
            let cross = start_offset + i as f64 * spacing;
            positioned.push(node.with_position(place(options.direction, main, cross)));
        }
    }

    positioned
}

/// Group nodes by generation, keeping first-appearance order of generations
/// and input order within each generation.
fn generation_bands(nodes: &[LayoutNode]) -> Vec<(i32, Vec<&LayoutNode>)> {
    let mut slot_of: HashMap<i32, usize> = HashMap::new();
    let mut bands: Vec<(i32, Vec<&LayoutNode>)> = Vec::new();

    for node in nodes {
        let generation = node.generation();
        let slot = *slot_of.entry(generation).or_insert_with(|| {
            bands.push((generation, Vec::new()));
            bands.len() - 1
        });
        bands[slot].1.push(node);
    }

    bands
}

/// Map (main, cross) onto screen axes for a direction.
#[inline]
fn place(direction: LayoutDirection, main: f64, cross: f64) -> Position {
    match direction {
        LayoutDirection::TB => Position::new(cross, main),
        LayoutDirection::BT => Position::new(cross, -main),
        LayoutDirection::LR => Position::new(main, cross),
        LayoutDirection::RL => Position::new(-main, cross),
    }
}
