
//! Cascading dropdown resolution over a pricing tree.
//!
//! A selection path is resolved level by level from the root. Indices that no
//! longer point at a node (after the catalog was edited, or after an earlier level
//! changed) end the walk and the rest of the path is dropped without an error.

use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price_aggregator::{BreakdownEntry, SelectionBreakdown};
use super::pricing_model::{CastingAttributes, NodePath, PricingMode, PricingNode, PricingTree};
use crate::utils::decimal_serde;

/// One rendered dropdown: its label, option names, and the chosen option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownLevel {
    pub label: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
}

/// Full outcome of walking a path, including levels with nothing chosen yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resolution {
    /// The usable prefix of the requested path.
    pub path: Vec<usize>,
    pub levels: Vec<DropdownLevel>,
    pub breakdown: SelectionBreakdown,
    /// True when the last chosen node is a leaf.
    pub is_complete: bool,
    /// Casting data of the last chosen node.
    pub terminal_casting: Option<CastingAttributes>,
}

/// A priced selection ready for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSelection {
    pub path: Vec<usize>,
    pub breakdown: SelectionBreakdown,
    #[serde(with = "decimal_serde")]
    pub total: Decimal,
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_casting: Option<CastingAttributes>,
}

fn options_of(label: &str, nodes: &[PricingNode]) -> DropdownLevel {
    DropdownLevel {
        label: label.to_string(),
        options: nodes.iter().map(|n| n.name.clone()).collect(),
        selected: None,
    }
}

fn contribution(node: &PricingNode, mode: PricingMode) -> Decimal {
    match mode {
        PricingMode::Cumulative => node.price_or_zero(),
        PricingMode::LeafOnly if node.is_leaf() => node.price_or_zero(),
        PricingMode::LeafOnly => Decimal::ZERO,
    }
}

/// Walks `path` through `tree`, truncating at the first index that does not resolve.
pub fn resolve_path(tree: &PricingTree, path: &NodePath) -> Resolution {
    let mut resolution = Resolution::default();
    if tree.is_empty() {
        return resolution;
    }

    let mut level_label = tree.root_title.as_str();
    let mut siblings = &tree.children;
    let mut entries = Vec::with_capacity(path.len());
    let mut last: Option<&PricingNode> = None;
    resolution.levels.push(options_of(level_label, siblings));

    for (depth, &index) in path.iter().enumerate() {
        let Some(node) = siblings.get(index) else {
            debug!(
                "Dropping stale selection {:?} at level {} (path {:?})",
                &path[depth..],
                depth,
                path
            );
            break;
        };

        if let Some(level) = resolution.levels.last_mut() {
            level.selected = Some(index);
        }
        entries.push(BreakdownEntry {
            level_label: level_label.to_string(),
            chosen_name: node.name.clone(),
            price: contribution(node, tree.mode),
        });
        resolution.path.push(index);
        last = Some(node);

        if node.is_leaf() {
            if depth + 1 < path.len() {
                debug!(
                    "Selection {:?} runs past leaf \"{}\", truncating",
                    path, node.name
                );
            }
            break;
        }
        level_label = node.next_level_title.as_str();
        siblings = &node.children;
        resolution.levels.push(options_of(level_label, siblings));
    }

    resolution.breakdown = SelectionBreakdown::from_entries(entries);
    resolution.is_complete = last.map(PricingNode::is_leaf).unwrap_or(false);
    resolution.terminal_casting = last.and_then(|n| n.casting.clone());
    resolution
}

/// Resolves `path` and returns a priced result, or `None` for "no selection".
///
/// In leaf-only mode a result exists only once the path reaches a leaf.
pub fn resolve_selection(tree: &PricingTree, path: &NodePath) -> Option<ResolvedSelection> {
    resolve_path(tree, path).into_selection(tree.mode)
}

impl Resolution {
    fn into_selection(self, mode: PricingMode) -> Option<ResolvedSelection> {
        if self.breakdown.is_empty() {
            return None;
        }
        if mode == PricingMode::LeafOnly && !self.is_complete {
            return None;
        }
        let total = self.breakdown.total;
        Some(ResolvedSelection {
            path: self.path,
            breakdown: self.breakdown,
            total,
            is_complete: self.is_complete,
            terminal_casting: self.terminal_casting,
        })
    }
}

/// Selection state for one catalog.
///
/// Holds a shared, read-only tree and the current path; every change recomputes
/// levels and breakdown before returning, so no stale state is observable.
#[derive(Debug, Clone)]
pub struct CascadingSelector {
    tree: Arc<PricingTree>,
    resolution: Resolution,
}

impl CascadingSelector {
    pub fn new(tree: Arc<PricingTree>) -> Self {
        Self::with_path(tree, &[])
    }

    /// Starts from a previously stored path; unusable indices are dropped.
    pub fn with_path(tree: Arc<PricingTree>, path: &NodePath) -> Self {
        let resolution = resolve_path(&tree, path);
        Self { tree, resolution }
    }

    pub fn tree(&self) -> &PricingTree {
        &self.tree
    }

    pub fn path(&self) -> &[usize] {
        &self.resolution.path
    }

    pub fn levels(&self) -> &[DropdownLevel] {
        &self.resolution.levels
    }

    pub fn breakdown(&self) -> &SelectionBreakdown {
        &self.resolution.breakdown
    }

    pub fn is_complete(&self) -> bool {
        self.resolution.is_complete
    }

    /// Chooses `option` at `level`, discarding every deeper choice. `None` clears
    /// the level. Choosing at a level that is not displayed yet is ignored.
    pub fn set_selection(&mut self, level: usize, option: Option<usize>) -> &[usize] {
        let current = &self.resolution.path;
        if level > current.len() {
            debug!(
                "Ignoring selection at level {} beyond current depth {}",
                level,
                current.len()
            );
            return self.path();
        }

        let mut next: Vec<usize> = current[..level].to_vec();
        next.extend(option);
        self.resolution = resolve_path(&self.tree, &next);
        self.path()
    }

    /// Swaps in an edited tree and re-resolves the current path against it.
    pub fn replace_tree(&mut self, tree: Arc<PricingTree>) {
        let path = std::mem::take(&mut self.resolution.path);
        self.resolution = resolve_path(&tree, &path);
        self.tree = tree;
    }

    /// The priced selection, or `None` when nothing usable is chosen.
    pub fn result(&self) -> Option<ResolvedSelection> {
        self.resolution.clone().into_selection(self.tree.mode)
    }
}
