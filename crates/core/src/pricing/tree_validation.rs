//! Structural validation and path lookup for pricing trees.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::pricing_errors::{PricingError, TreeValidationError};
use super::pricing_model::{NodePath, PricingMode, PricingNode, PricingTree};

/// Checks that a tree is well formed before it is saved or offered for selection.
///
/// Nodes are visited depth-first in display order and the first problem found is
/// returned, so the administrator sees the topmost offending item.
pub fn validate(tree: &PricingTree) -> Result<(), TreeValidationError> {
    if !tree.children.is_empty() && tree.root_title.trim().is_empty() {
        return Err(TreeValidationError::MissingRootTitle);
    }
    let mut path = Vec::new();
    validate_siblings(&tree.children, tree.mode, &mut path)
}

fn validate_siblings(
    nodes: &[PricingNode],
    mode: PricingMode,
    path: &mut Vec<usize>,
) -> Result<(), TreeValidationError> {
    let mut seen = HashSet::with_capacity(nodes.len());
    for node in nodes {
        let name = node.name.trim();
        if !name.is_empty() && !seen.insert(name) {
            return Err(TreeValidationError::DuplicateSiblingName {
                parent_path: path.clone(),
                name: name.to_string(),
            });
        }
    }

    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        validate_node(node, mode, path)?;
        validate_siblings(&node.children, mode, path)?;
        path.pop();
    }
    Ok(())
}

fn validate_node(
    node: &PricingNode,
    mode: PricingMode,
    path: &[usize],
) -> Result<(), TreeValidationError> {
    if node.name.trim().is_empty() {
        return Err(TreeValidationError::EmptyName {
            path: path.to_vec(),
        });
    }

    let price_required = match mode {
        PricingMode::Cumulative => true,
        PricingMode::LeafOnly => node.is_leaf(),
    };
    let price_ok = match node.price {
        Some(price) => price >= Decimal::ZERO,
        None => !price_required,
    };
    if !price_ok {
        return Err(TreeValidationError::NegativePrice {
            path: path.to_vec(),
            name: node.name.clone(),
        });
    }

    if let Some(casting) = &node.casting {
        let negative = [casting.weight, casting.machining_charge]
            .iter()
            .flatten()
            .any(|v| *v < Decimal::ZERO);
        if negative {
            return Err(TreeValidationError::NegativeCastingAttribute {
                path: path.to_vec(),
                name: node.name.clone(),
            });
        }
    }

    if !node.is_leaf() && node.next_level_title.trim().is_empty() {
        return Err(TreeValidationError::MissingLevelTitle {
            path: path.to_vec(),
            name: node.name.clone(),
        });
    }
    Ok(())
}

/// Walks child indices from the root. The empty path is not a node.
pub fn get_node_at_path<'a>(
    tree: &'a PricingTree,
    path: &NodePath,
) -> Result<&'a PricingNode, PricingError> {
    let not_found = || PricingError::NotFound(path.to_vec());
    let (first, rest) = path.split_first().ok_or_else(not_found)?;
    let mut current = tree.children.get(*first).ok_or_else(not_found)?;
    for index in rest {
        current = current.children.get(*index).ok_or_else(not_found)?;
    }
    Ok(current)
}

/// Children listed under the node at `path`; the empty path yields the root items.
pub(crate) fn children_at_path_mut<'a>(
    tree: &'a mut PricingTree,
    path: &NodePath,
) -> Option<&'a mut Vec<PricingNode>> {
    let mut children = &mut tree.children;
    for index in path {
        children = &mut children.get_mut(*index)?.children;
    }
    Some(children)
}

pub(crate) fn get_node_at_path_mut<'a>(
    tree: &'a mut PricingTree,
    path: &NodePath,
) -> Option<&'a mut PricingNode> {
    let (last, parent) = path.split_last()?;
    children_at_path_mut(tree, parent)?.get_mut(*last)
}

/// Translates a name-addressed path into the canonical index path.
///
/// Sibling names are unique in a valid tree, which keeps this lookup unambiguous.
pub fn find_path_by_names<S: AsRef<str>>(tree: &PricingTree, names: &[S]) -> Option<Vec<usize>> {
    let mut path = Vec::with_capacity(names.len());
    let mut level = &tree.children;
    for name in names {
        let wanted = name.as_ref().trim();
        let index = level.iter().position(|n| n.name.trim() == wanted)?;
        path.push(index);
        level = &level[index].children;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::CastingAttributes;
    use rust_decimal_macros::dec;

    fn valve_tree() -> PricingTree {
        PricingTree::new(
            "Valve Type",
            vec![
                PricingNode::branch(
                    "Ball Valves",
                    dec!(500),
                    "Material",
                    vec![PricingNode::branch(
                        "Stainless Steel",
                        dec!(300),
                        "Size",
                        vec![PricingNode::leaf("2-inch", dec!(200))],
                    )],
                ),
                PricingNode::branch(
                    "Gate Valves",
                    dec!(400),
                    "Pressure",
                    vec![
                        PricingNode::leaf("Standard", dec!(600)),
                        PricingNode::leaf("High Pressure", dec!(1200)),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_valid_tree_passes() {
        assert_eq!(validate(&valve_tree()), Ok(()));
    }

    #[test]
    fn test_empty_tree_without_title_is_valid() {
        assert_eq!(validate(&PricingTree::default()), Ok(()));
    }

    #[test]
    fn test_missing_root_title() {
        let mut tree = valve_tree();
        tree.root_title = "  ".to_string();
        assert_eq!(validate(&tree), Err(TreeValidationError::MissingRootTitle));
    }

    #[test]
    fn test_blank_name_reports_path() {
        let mut tree = valve_tree();
        tree.children[1].children[0].name = String::new();
        assert_eq!(
            validate(&tree),
            Err(TreeValidationError::EmptyName { path: vec![1, 0] })
        );
    }

    #[test]
    fn test_negative_and_absent_price() {
        let mut tree = valve_tree();
        tree.children[0].children[0].price = Some(dec!(-1));
        assert!(matches!(
            validate(&tree),
            Err(TreeValidationError::NegativePrice { ref path, .. }) if path == &vec![0, 0]
        ));

        let mut tree = valve_tree();
        tree.children[0].price = None;
        assert!(matches!(
            validate(&tree),
            Err(TreeValidationError::NegativePrice { .. })
        ));
    }

    #[test]
    fn test_leaf_only_mode_allows_unpriced_categories() {
        let mut tree = valve_tree().with_mode(PricingMode::LeafOnly);
        tree.children[0].price = None;
        tree.children[1].price = None;
        assert_eq!(validate(&tree), Ok(()));

        tree.children[1].children[1].price = None;
        assert!(matches!(
            validate(&tree),
            Err(TreeValidationError::NegativePrice { ref name, .. }) if name == "High Pressure"
        ));
    }

    #[test]
    fn test_missing_level_title() {
        let mut tree = valve_tree();
        tree.children[1].next_level_title = String::new();
        assert!(matches!(
            validate(&tree),
            Err(TreeValidationError::MissingLevelTitle { ref name, .. }) if name == "Gate Valves"
        ));
    }

    #[test]
    fn test_leaf_does_not_need_level_title() {
        let tree = PricingTree::new("Size", vec![PricingNode::leaf("2-inch", dec!(10))]);
        assert_eq!(validate(&tree), Ok(()));
    }

    #[test]
    fn test_duplicate_sibling_names() {
        let mut tree = valve_tree();
        tree.children[1].children[1].name = "Standard ".to_string();
        assert_eq!(
            validate(&tree),
            Err(TreeValidationError::DuplicateSiblingName {
                parent_path: vec![1],
                name: "Standard".to_string(),
            })
        );
    }

    #[test]
    fn test_same_name_in_different_branches_is_fine() {
        let tree = PricingTree::new(
            "Type",
            vec![
                PricingNode::branch("A", dec!(0), "Size", vec![PricingNode::leaf("2-inch", dec!(1))]),
                PricingNode::branch("B", dec!(0), "Size", vec![PricingNode::leaf("2-inch", dec!(2))]),
            ],
        );
        assert_eq!(validate(&tree), Ok(()));
    }

    #[test]
    fn test_negative_casting_attribute() {
        let mut tree = valve_tree();
        tree.children[1].children[0].casting = Some(CastingAttributes::new(dec!(-2), dec!(10)));
        assert!(matches!(
            validate(&tree),
            Err(TreeValidationError::NegativeCastingAttribute { .. })
        ));
    }

    #[test]
    fn test_get_node_at_path() {
        let tree = valve_tree();
        assert_eq!(get_node_at_path(&tree, &[0, 0, 0]).unwrap().name, "2-inch");
        assert_eq!(get_node_at_path(&tree, &[1]).unwrap().name, "Gate Valves");
        assert_eq!(
            get_node_at_path(&tree, &[1, 5]),
            Err(PricingError::NotFound(vec![1, 5]))
        );
        assert_eq!(get_node_at_path(&tree, &[]), Err(PricingError::NotFound(vec![])));
    }

    #[test]
    fn test_find_path_by_names() {
        let tree = valve_tree();
        assert_eq!(
            find_path_by_names(&tree, &["Gate Valves", "High Pressure"]),
            Some(vec![1, 1])
        );
        assert_eq!(find_path_by_names(&tree, &["Butterfly"]), None);
        assert_eq!(find_path_by_names::<&str>(&tree, &[]), Some(vec![]));
    }
}
