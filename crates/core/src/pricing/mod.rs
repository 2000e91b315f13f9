//! Hierarchical pricing engine: tree model, validation, copy-on-write editing,
//! cascading selection and price aggregation.

mod cascading_selector;
mod price_aggregator;
mod pricing_errors;
mod pricing_model;
mod tree_editor;
mod tree_validation;

pub use cascading_selector::{
    resolve_path, resolve_selection, CascadingSelector, DropdownLevel, Resolution,
    ResolvedSelection,
};
pub use price_aggregator::{
    breakdown_total, casting_total, sum_subtotals, BreakdownEntry, CastingTotal,
    SelectionBreakdown,
};
pub use pricing_errors::{PricingError, TreeEditError, TreeValidationError};
pub use pricing_model::{CastingAttributes, NodePath, PricingMode, PricingNode, PricingTree};
pub use tree_editor::{
    add_child, apply_edit, delete_node, move_node, set_root_title, update_field, NodeField,
    TreeEdit,
};
pub use tree_validation::{find_path_by_names, get_node_at_path, validate};
