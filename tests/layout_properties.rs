//! Property-based invariant tests for the generation-banded layout.
//!
//! These hold for any node set, generation assignment and options:
//!
//! 1. Every input node appears exactly once in the output.
//! 2. Position calculation is deterministic.
//! 3. Each generation band is centred: min + max == 0 on the cross axis.
//! 4. Single-node bands sit exactly at cross-axis 0.
//! 5. Nodes of one generation share the main-axis coordinate.
//! 6. Main-axis order follows generation order for each direction.
//! 7. Layouts of builder output pass the validator.
//! 8. The service returns the same Arc for structurally identical input.

#![cfg(not(target_arch = "wasm32"))]

use std::collections::HashMap;
use std::sync::Arc;

use family_tree_layout_wasm::graph::{validate, FamilyTreeData, LayoutNode, Person};
use family_tree_layout_wasm::layout::{
    build_from_persons, calculate_positions, LayoutDirection, LayoutOptions, LayoutService,
    NodeSpacing,
};
use proptest::prelude::*;

// Helpers

fn direction_strategy() -> impl Strategy<Value = LayoutDirection> {
    prop_oneof![
        Just(LayoutDirection::TB),
        Just(LayoutDirection::BT),
        Just(LayoutDirection::LR),
        Just(LayoutDirection::RL),
    ]
}

fn options_strategy() -> impl Strategy<Value = LayoutOptions> {
    (direction_strategy(), 1.0f64..=500.0, 1.0f64..=500.0, 1.0f64..=500.0).prop_map(
        |(direction, horizontal, vertical, generation_spacing)| LayoutOptions {
            direction,
            node_spacing: NodeSpacing { horizontal, vertical },
            generation_spacing,
        },
    )
}

/// Node lists with unique ids and generations in -5..=5.
fn nodes_strategy(max_len: usize) -> impl Strategy<Value = Vec<LayoutNode>> {
    proptest::collection::vec(-5i32..=5, 0..=max_len).prop_map(|generations| {
        generations
            .into_iter()
            .enumerate()
            .map(|(i, generation)| {
                let person = Person::new(format!("p{i}"), format!("First{i}"), "Last");
                LayoutNode::new(person, generation)
            })
            .collect()
    })
}

/// (main, cross) coordinates of a node for the given direction.
fn axes(node: &LayoutNode, direction: LayoutDirection) -> (f64, f64) {
    if direction.is_vertical() {
        (node.position.y, node.position.x)
    } else {
        (node.position.x, node.position.y)
    }
}

fn by_generation(nodes: &[LayoutNode]) -> HashMap<i32, Vec<&LayoutNode>> {
    let mut bands: HashMap<i32, Vec<&LayoutNode>> = HashMap::new();
    for node in nodes {
        bands.entry(node.generation()).or_default().push(node);
    }
    bands
}

// Properties

proptest! {
    #[test]
    fn every_node_exactly_once(nodes in nodes_strategy(40), options in options_strategy()) {
        let result = calculate_positions(&nodes, &options);
        prop_assert_eq!(result.len(), nodes.len());

        let mut ids: Vec<_> = result.iter().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), nodes.len());
    }

    #[test]
    fn deterministic(nodes in nodes_strategy(40), options in options_strategy()) {
        prop_assert_eq!(
            calculate_positions(&nodes, &options),
            calculate_positions(&nodes, &options)
        );
    }

    #[test]
    fn bands_are_centred(nodes in nodes_strategy(40), options in options_strategy()) {
        let result = calculate_positions(&nodes, &options);
        for (generation, band) in by_generation(&result) {
            let crosses: Vec<f64> = band.iter().map(|n| axes(n, options.direction).1).collect();
            let min = crosses.iter().copied().fold(f64::INFINITY, f64::min);
            let max = crosses.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(
                (min + max).abs() < 1e-6,
                "generation {} not centred: min={} max={}", generation, min, max
            );
            if band.len() == 1 {
                prop_assert_eq!(crosses[0], 0.0);
            }
        }
    }

    #[test]
    fn band_shares_main_axis(nodes in nodes_strategy(40), options in options_strategy()) {
        let result = calculate_positions(&nodes, &options);
        for (generation, band) in by_generation(&result) {
            let expected = generation as f64 * options.generation_spacing;
            for node in band {
                let main = axes(node, options.direction).0;
                prop_assert_eq!(main.abs(), expected.abs());
            }
        }
    }

    #[test]
    fn main_axis_is_monotonic(nodes in nodes_strategy(40), options in options_strategy()) {
        let result = calculate_positions(&nodes, &options);
        let mut mains: Vec<(i32, f64)> = by_generation(&result)
            .into_iter()
            .map(|(generation, band)| (generation, axes(band[0], options.direction).0))
            .collect();
        mains.sort_by_key(|&(generation, _)| generation);

        let increasing = matches!(options.direction, LayoutDirection::TB | LayoutDirection::LR);
        for pair in mains.windows(2) {
            let (lower, upper) = (pair[0].1, pair[1].1);
            if increasing {
                prop_assert!(upper > lower, "{:?}", mains);
            } else {
                prop_assert!(upper < lower, "{:?}", mains);
            }
        }
    }

    #[test]
    fn builder_output_layout_validates(
        count in 0usize..30,
        root in 0usize..30,
        options in options_strategy(),
    ) {
        let persons: Vec<Person> = (0..count)
            .map(|i| Person::new(format!("id-{i}"), "A", "B"))
            .collect();
        let tree = build_from_persons(&persons, &format!("id-{root}"));
        prop_assert!(validate(&tree).is_ok());

        let service = LayoutService::new();
        let laid_out = service.generate_layout(&tree, &options);
        prop_assert!(validate(&laid_out).is_ok());
        prop_assert_eq!(laid_out.nodes.len(), count);
    }

    #[test]
    fn repeat_layout_hits_cache(nodes in nodes_strategy(20), options in options_strategy()) {
        prop_assume!(!nodes.is_empty());
        let service = LayoutService::new();
        let tree = FamilyTreeData::new(nodes, Vec::new());

        let first = service.generate_layout(&tree, &options);
        let second = service.generate_layout(&tree.clone(), &options);
        prop_assert!(Arc::ptr_eq(&first, &second));
    }
}

#[test]
fn empty_tree_layout_is_empty_for_every_direction() {
    let service = LayoutService::new();
    for direction in [
        LayoutDirection::TB,
        LayoutDirection::BT,
        LayoutDirection::LR,
        LayoutDirection::RL,
    ] {
        let options = LayoutOptions::with_direction(direction);
        let result = service.generate_layout(&FamilyTreeData::default(), &options);
        assert!(result.nodes.is_empty());
        assert!(result.edges.is_empty());
    }
}
