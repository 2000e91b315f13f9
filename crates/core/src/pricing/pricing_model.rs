//! Domain models for pricing trees.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::decimal_serde_option;

/// Index-based address of a node: one child index per level, starting at the root.
///
/// An empty path addresses the tree root itself.
pub type NodePath = [usize];

/// How node prices combine along a selection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingMode {
    /// Every traversed node adds its own price. Partial paths are usable.
    #[default]
    Cumulative,
    /// Only the terminal leaf carries the price. Category nodes are free and
    /// a path is priced only once it reaches a leaf.
    LeafOnly,
}

/// Physical data used by the casting group formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CastingAttributes {
    #[serde(default, with = "decimal_serde_option")]
    pub weight: Option<Decimal>,
    #[serde(default, with = "decimal_serde_option")]
    pub machining_charge: Option<Decimal>,
}

impl CastingAttributes {
    pub fn new(weight: Decimal, machining_charge: Decimal) -> Self {
        Self {
            weight: Some(weight),
            machining_charge: Some(machining_charge),
        }
    }

    /// Weight, with missing values counted as zero.
    pub fn weight_or_zero(&self) -> Decimal {
        self.weight.unwrap_or(Decimal::ZERO)
    }

    /// Machining charge, with missing values counted as zero.
    pub fn machining_charge_or_zero(&self) -> Decimal {
        self.machining_charge.unwrap_or(Decimal::ZERO)
    }
}

/// One selectable option at one level of a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PricingNode {
    pub name: String,
    #[serde(default, with = "decimal_serde_option")]
    pub price: Option<Decimal>,
    /// Label of the dropdown listing this node's children.
    #[serde(default)]
    pub next_level_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casting: Option<CastingAttributes>,
    #[serde(default)]
    pub children: Vec<PricingNode>,
}

impl PricingNode {
    /// Creates a leaf with the given price.
    pub fn leaf(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            ..Default::default()
        }
    }

    /// Creates a category node whose children are listed under `next_level_title`.
    pub fn branch(
        name: impl Into<String>,
        price: Decimal,
        next_level_title: impl Into<String>,
        children: Vec<PricingNode>,
    ) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            next_level_title: next_level_title.into(),
            casting: None,
            children,
        }
    }

    pub fn with_casting(mut self, casting: CastingAttributes) -> Self {
        self.casting = Some(casting);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Price with missing values counted as zero.
    pub fn price_or_zero(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }

    /// Number of leaves beneath (and including) this node.
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(PricingNode::leaf_count).sum()
        }
    }

    /// Height of the subtree rooted here; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(PricingNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Root of one pricing catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PricingTree {
    /// Label of the first dropdown.
    #[serde(default)]
    pub root_title: String,
    #[serde(default)]
    pub mode: PricingMode,
    #[serde(default)]
    pub children: Vec<PricingNode>,
}

impl PricingTree {
    pub fn new(root_title: impl Into<String>, children: Vec<PricingNode>) -> Self {
        Self {
            root_title: root_title.into(),
            mode: PricingMode::Cumulative,
            children,
        }
    }

    pub fn with_mode(mut self, mode: PricingMode) -> Self {
        self.mode = mode;
        self
    }

    /// A tree without children cannot be used for selection.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Longest root-to-leaf path length.
    pub fn max_depth(&self) -> usize {
        self.children
            .iter()
            .map(PricingNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Number of selectable end options in the whole catalog.
    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(PricingNode::leaf_count).sum()
    }
}
