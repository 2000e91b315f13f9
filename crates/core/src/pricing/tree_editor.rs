//! Copy-on-write structural edits for pricing trees.
//!
//! Every operation takes the current tree by reference and returns a new tree,
//! so a failed edit leaves the caller's tree untouched and readers of the old
//! tree never observe a half-applied change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pricing_errors::TreeEditError;
use super::pricing_model::{CastingAttributes, NodePath, PricingNode, PricingTree};
use super::tree_validation::{children_at_path_mut, get_node_at_path_mut};
use crate::constants::DEFAULT_NODE_NAME;

/// A single editable attribute of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum NodeField {
    Name(String),
    Price(Decimal),
    NextLevelTitle(String),
    Casting(Option<CastingAttributes>),
}

/// Serializable edit command, as sent by an admin form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreeEdit {
    AddChild { parent_path: Vec<usize> },
    UpdateField { path: Vec<usize>, field: NodeField },
    DeleteNode { path: Vec<usize> },
    MoveNode { path: Vec<usize>, new_index: usize },
    SetRootTitle { title: String },
}

/// Applies one edit command.
pub fn apply_edit(tree: &PricingTree, edit: &TreeEdit) -> Result<PricingTree, TreeEditError> {
    match edit {
        TreeEdit::AddChild { parent_path } => add_child(tree, parent_path),
        TreeEdit::UpdateField { path, field } => update_field(tree, path, field.clone()),
        TreeEdit::DeleteNode { path } => delete_node(tree, path),
        TreeEdit::MoveNode { path, new_index } => move_node(tree, path, *new_index),
        TreeEdit::SetRootTitle { title } => Ok(set_root_title(tree, title)),
    }
}

/// Appends a fresh node (default name, price 0, no title) under `parent_path`.
/// The empty path appends a root item.
pub fn add_child(tree: &PricingTree, parent_path: &NodePath) -> Result<PricingTree, TreeEditError> {
    let mut next = tree.clone();
    let siblings = children_at_path_mut(&mut next, parent_path)
        .ok_or_else(|| TreeEditError::InvalidPath(parent_path.to_vec()))?;

    let name = unique_default_name(siblings);
    siblings.push(PricingNode {
        name,
        price: Some(Decimal::ZERO),
        ..Default::default()
    });
    Ok(next)
}

/// Sets one attribute of the node at `path`.
pub fn update_field(
    tree: &PricingTree,
    path: &NodePath,
    field: NodeField,
) -> Result<PricingTree, TreeEditError> {
    match &field {
        NodeField::Price(price) if *price < Decimal::ZERO => {
            return Err(TreeEditError::InvalidPrice(price.to_string()));
        }
        NodeField::Casting(Some(casting)) => {
            for value in [casting.weight, casting.machining_charge].into_iter().flatten() {
                if value < Decimal::ZERO {
                    return Err(TreeEditError::InvalidPrice(value.to_string()));
                }
            }
        }
        _ => {}
    }

    let mut next = tree.clone();
    let node = get_node_at_path_mut(&mut next, path)
        .ok_or_else(|| TreeEditError::InvalidPath(path.to_vec()))?;
    match field {
        NodeField::Name(name) => node.name = name,
        NodeField::Price(price) => node.price = Some(price),
        NodeField::NextLevelTitle(title) => node.next_level_title = title,
        NodeField::Casting(casting) => node.casting = casting,
    }
    Ok(next)
}

/// Removes the node at `path` together with its whole subtree.
pub fn delete_node(tree: &PricingTree, path: &NodePath) -> Result<PricingTree, TreeEditError> {
    let (last, parent) = path.split_last().ok_or(TreeEditError::CannotDeleteRoot)?;
    let mut next = tree.clone();
    let siblings = children_at_path_mut(&mut next, parent)
        .filter(|s| *last < s.len())
        .ok_or_else(|| TreeEditError::InvalidPath(path.to_vec()))?;
    siblings.remove(*last);
    Ok(next)
}

/// Moves a node to `new_index` among its siblings. Indices past the end move it last.
pub fn move_node(
    tree: &PricingTree,
    path: &NodePath,
    new_index: usize,
) -> Result<PricingTree, TreeEditError> {
    let (last, parent) = path
        .split_last()
        .ok_or_else(|| TreeEditError::InvalidPath(path.to_vec()))?;
    let mut next = tree.clone();
    let siblings = children_at_path_mut(&mut next, parent)
        .filter(|s| *last < s.len())
        .ok_or_else(|| TreeEditError::InvalidPath(path.to_vec()))?;
    let node = siblings.remove(*last);
    let target = new_index.min(siblings.len());
    siblings.insert(target, node);
    Ok(next)
}

pub fn set_root_title(tree: &PricingTree, title: &str) -> PricingTree {
    PricingTree {
        root_title: title.to_string(),
        ..tree.clone()
    }
}

fn unique_default_name(siblings: &[PricingNode]) -> String {
    let taken = |candidate: &str| siblings.iter().any(|n| n.name.trim() == candidate);
    if !taken(DEFAULT_NODE_NAME) {
        return DEFAULT_NODE_NAME.to_string();
    }
    (2..)
        .map(|n| format!("{} {}", DEFAULT_NODE_NAME, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| DEFAULT_NODE_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{get_node_at_path, validate, PricingError};
    use rust_decimal_macros::dec;

    fn sample() -> PricingTree {
        PricingTree::new(
            "Valve Type",
            vec![
                PricingNode::branch(
                    "Ball Valves",
                    dec!(500),
                    "Size",
                    vec![
                        PricingNode::leaf("2-inch", dec!(200)),
                        PricingNode::leaf("4-inch", dec!(350)),
                    ],
                ),
                PricingNode::leaf("Gate Valves", dec!(600)),
            ],
        )
    }

    #[test]
    fn test_add_child_to_root_and_nested() {
        let tree = sample();
        let added = add_child(&tree, &[]).unwrap();
        assert_eq!(added.children.len(), 3);
        let node = &added.children[2];
        assert_eq!(node.name, DEFAULT_NODE_NAME);
        assert_eq!(node.price, Some(Decimal::ZERO));
        assert!(node.next_level_title.is_empty());

        let nested = add_child(&tree, &[0]).unwrap();
        assert_eq!(nested.children[0].children.len(), 3);
        // original untouched
        assert_eq!(tree.children[0].children.len(), 2);
    }

    #[test]
    fn test_add_child_names_stay_unique() {
        let tree = add_child(&sample(), &[1]).unwrap();
        let tree = add_child(&tree, &[1]).unwrap();
        let tree = add_child(&tree, &[1]).unwrap();
        let names: Vec<_> = tree.children[1].children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["New Item", "New Item 2", "New Item 3"]);
    }

    #[test]
    fn test_add_child_invalid_path() {
        assert_eq!(
            add_child(&sample(), &[7]),
            Err(TreeEditError::InvalidPath(vec![7]))
        );
    }

    #[test]
    fn test_update_fields() {
        let tree = sample();
        let tree = update_field(&tree, &[0, 1], NodeField::Name("6-inch".into())).unwrap();
        let tree = update_field(&tree, &[0, 1], NodeField::Price(dec!(410))).unwrap();
        let tree = update_field(&tree, &[0], NodeField::NextLevelTitle("Bore".into())).unwrap();

        let node = get_node_at_path(&tree, &[0, 1]).unwrap();
        assert_eq!(node.name, "6-inch");
        assert_eq!(node.price, Some(dec!(410)));
        assert_eq!(tree.children[0].next_level_title, "Bore");
        // sibling untouched
        assert_eq!(tree.children[0].children[0], PricingNode::leaf("2-inch", dec!(200)));
    }

    #[test]
    fn test_update_rejects_negative_price_without_touching_tree() {
        let tree = sample();
        let result = update_field(&tree, &[1], NodeField::Price(dec!(-5)));
        assert_eq!(result, Err(TreeEditError::InvalidPrice("-5".into())));
        assert_eq!(tree, sample());
    }

    #[test]
    fn test_update_rejects_negative_casting() {
        let result = update_field(
            &sample(),
            &[1],
            NodeField::Casting(Some(CastingAttributes::new(dec!(3), dec!(-1)))),
        );
        assert!(matches!(result, Err(TreeEditError::InvalidPrice(_))));
    }

    #[test]
    fn test_update_invalid_path() {
        assert_eq!(
            update_field(&sample(), &[], NodeField::Name("x".into())),
            Err(TreeEditError::InvalidPath(vec![]))
        );
        assert_eq!(
            update_field(&sample(), &[0, 9], NodeField::Name("x".into())),
            Err(TreeEditError::InvalidPath(vec![0, 9]))
        );
    }

    #[test]
    fn test_delete_node_removes_subtree() {
        let tree = delete_node(&sample(), &[0]).unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].name, "Gate Valves");
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_delete_root_and_bad_path() {
        assert_eq!(delete_node(&sample(), &[]), Err(TreeEditError::CannotDeleteRoot));
        assert_eq!(
            delete_node(&sample(), &[0, 2]),
            Err(TreeEditError::InvalidPath(vec![0, 2]))
        );
    }

    #[test]
    fn test_move_node() {
        let tree = move_node(&sample(), &[0, 1], 0).unwrap();
        assert_eq!(tree.children[0].children[0].name, "4-inch");
        let tree = move_node(&tree, &[0], 99).unwrap();
        assert_eq!(tree.children[1].name, "Ball Valves");
    }

    #[test]
    fn test_edit_commands_round_trip_through_json() {
        let edit: TreeEdit = serde_json::from_str(
            r#"{"type":"UPDATE_FIELD","path":[1],"field":{"field":"price","value":750}}"#,
        )
        .unwrap();
        let tree = apply_edit(&sample(), &edit).unwrap();
        assert_eq!(tree.children[1].price, Some(dec!(750)));

        let tree = apply_edit(&tree, &TreeEdit::SetRootTitle { title: "Family".into() }).unwrap();
        assert_eq!(tree.root_title, "Family");
    }

    #[test]
    fn test_adding_child_to_leaf_needs_title_before_save() {
        let tree = add_child(&sample(), &[1]).unwrap();
        assert!(validate(&tree).is_err());
        let tree = update_field(&tree, &[1], NodeField::NextLevelTitle("Pressure".into())).unwrap();
        assert_eq!(validate(&tree), Ok(()));
        assert!(matches!(
            get_node_at_path(&tree, &[1, 1]),
            Err(PricingError::NotFound(_))
        ));
    }
}
