//! Property-based integration tests for the pricing engine.
//!
//! These tests verify that universal properties hold across randomly generated
//! trees and selection paths, using the `proptest` crate.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use valvequote_core::pricing::{
    add_child, delete_node, get_node_at_path, resolve_path, resolve_selection, update_field,
    validate, CascadingSelector, NodeField, PricingNode, PricingTree, TreeValidationError,
};

// =============================================================================
// Generators
// =============================================================================

/// Gives siblings distinct names so generated trees are valid.
fn uniquely_named(nodes: Vec<PricingNode>) -> Vec<PricingNode> {
    nodes
        .into_iter()
        .enumerate()
        .map(|(i, mut node)| {
            node.name = format!("Option {}", i + 1);
            node
        })
        .collect()
}

fn arb_price() -> impl Strategy<Value = Decimal> {
    (0u32..100_000).prop_map(|cents| Decimal::new(cents as i64, 2))
}

fn arb_node() -> impl Strategy<Value = PricingNode> {
    let leaf = arb_price().prop_map(|price| PricingNode::leaf("leaf", price));
    leaf.prop_recursive(4, 48, 4, |inner| {
        (arb_price(), proptest::collection::vec(inner, 1..4)).prop_map(|(price, children)| {
            PricingNode::branch("branch", price, "Next Level", uniquely_named(children))
        })
    })
}

/// Generates a valid cumulative tree with up to four root options.
fn arb_tree() -> impl Strategy<Value = PricingTree> {
    proptest::collection::vec(arb_node(), 0..5)
        .prop_map(|children| PricingTree::new("Valve Type", uniquely_named(children)))
}

/// Paths may point past the end of any level and run deeper than the tree.
fn arb_path() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0usize..5, 0..8)
}

fn node_mut<'a>(tree: &'a mut PricingTree, path: &[usize]) -> &'a mut PricingNode {
    let (first, rest) = path.split_first().unwrap();
    let mut node = &mut tree.children[*first];
    for index in rest {
        node = &mut node.children[*index];
    }
    node
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Generated trees satisfy every structural rule.
    #[test]
    fn prop_generated_trees_are_valid(tree in arb_tree()) {
        prop_assert_eq!(validate(&tree), Ok(()));
    }

    /// A negative price anywhere makes validation fail at exactly that node.
    #[test]
    fn prop_negative_price_is_rejected(tree in arb_tree(), path in arb_path()) {
        let resolved = resolve_path(&tree, &path).path;
        prop_assume!(!resolved.is_empty());

        let mut broken = tree.clone();
        node_mut(&mut broken, &resolved).price = Some(Decimal::NEGATIVE_ONE);
        match validate(&broken) {
            Err(TreeValidationError::NegativePrice { path, .. }) => prop_assert_eq!(path, resolved),
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    /// A resolved path is always a prefix of the requested one and never deeper than the tree.
    #[test]
    fn prop_resolution_truncates_to_prefix(tree in arb_tree(), path in arb_path()) {
        let resolution = resolve_path(&tree, &path);
        prop_assert!(path.starts_with(&resolution.path));
        prop_assert!(resolution.path.len() <= tree.max_depth());
        prop_assert!(get_node_at_path(&tree, &resolution.path).is_ok() || resolution.path.is_empty());
    }

    /// Clearing level k keeps exactly the first k choices.
    #[test]
    fn prop_clearing_level_is_exact(tree in arb_tree(), path in arb_path()) {
        let selector = CascadingSelector::with_path(Arc::new(tree), &path);
        let full = selector.path().to_vec();
        for k in 0..=full.len() {
            let mut s = selector.clone();
            prop_assert_eq!(s.set_selection(k, None), &full[..k]);
        }
    }

    /// Resolution is deterministic.
    #[test]
    fn prop_resolution_is_idempotent(tree in arb_tree(), path in arb_path()) {
        prop_assert_eq!(resolve_path(&tree, &path), resolve_path(&tree, &path));
        prop_assert_eq!(resolve_selection(&tree, &path), resolve_selection(&tree, &path));
    }

    /// The cumulative total is the sum of the prices of the traversed nodes.
    #[test]
    fn prop_total_is_sum_along_path(tree in arb_tree(), path in arb_path()) {
        match resolve_selection(&tree, &path) {
            None => prop_assert!(resolve_path(&tree, &path).path.is_empty()),
            Some(selection) => {
                let expected: Decimal = (1..=selection.path.len())
                    .map(|depth| get_node_at_path(&tree, &selection.path[..depth]).unwrap().price_or_zero())
                    .sum();
                prop_assert_eq!(selection.total, expected);
                prop_assert_eq!(selection.breakdown.entries.len(), selection.path.len());
            }
        }
    }

    /// An empty tree never yields a selection.
    #[test]
    fn prop_empty_tree_has_no_selection(path in arb_path()) {
        prop_assert!(resolve_selection(&PricingTree::default(), &path).is_none());
    }

    /// A price edit changes only the edited node's contribution.
    #[test]
    fn prop_price_edit_round_trip(tree in arb_tree(), path in arb_path(), new_price in arb_price()) {
        let resolved = resolve_path(&tree, &path).path;
        prop_assume!(!resolved.is_empty());

        let before = resolve_selection(&tree, &resolved).unwrap().total;
        let old_price = get_node_at_path(&tree, &resolved).unwrap().price_or_zero();
        let edited = update_field(&tree, &resolved, NodeField::Price(new_price)).unwrap();

        prop_assert_eq!(get_node_at_path(&edited, &resolved).unwrap().price, Some(new_price));
        let after = resolve_selection(&edited, &resolved).unwrap().total;
        prop_assert_eq!(after - before, new_price - old_price);
    }

    /// Adding then deleting a child restores the original tree.
    #[test]
    fn prop_add_then_delete_restores_tree(tree in arb_tree(), path in arb_path()) {
        let parent = resolve_path(&tree, &path).path;
        let added = add_child(&tree, &parent).unwrap();

        let siblings = if parent.is_empty() {
            added.children.len()
        } else {
            get_node_at_path(&added, &parent).unwrap().children.len()
        };
        let mut new_path = parent.clone();
        new_path.push(siblings - 1);
        prop_assert_eq!(get_node_at_path(&added, &new_path).unwrap().price, Some(Decimal::ZERO));

        let restored = delete_node(&added, &new_path).unwrap();
        prop_assert_eq!(restored, tree);
    }
}
