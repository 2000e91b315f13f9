use thiserror::Error;

/// Renders a node path for error messages, e.g. `[0, 2, 1]`.
fn fmt_path(path: &[usize]) -> String {
    format!("{:?}", path)
}

/// Structural problems that block a tree from being saved or used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeValidationError {
    #[error("Tree has items but no root level title")]
    MissingRootTitle,

    #[error("Item at {} has a blank name", fmt_path(.path))]
    EmptyName { path: Vec<usize> },

    #[error("Item \"{name}\" at {} has a missing or negative price", fmt_path(.path))]
    NegativePrice { path: Vec<usize>, name: String },

    #[error("Item \"{name}\" at {} has a negative weight or machining charge", fmt_path(.path))]
    NegativeCastingAttribute { path: Vec<usize>, name: String },

    #[error("Category \"{name}\" at {} must have a next level title", fmt_path(.path))]
    MissingLevelTitle { path: Vec<usize>, name: String },

    #[error("Two items under {} are both named \"{name}\"", fmt_path(.parent_path))]
    DuplicateSiblingName {
        parent_path: Vec<usize>,
        name: String,
    },
}

/// Failures of structural edit operations. The input tree is never modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeEditError {
    #[error("Path {} does not resolve to an item", fmt_path(.0))]
    InvalidPath(Vec<usize>),

    #[error("Price must not be negative, got {0}")]
    InvalidPrice(String),

    #[error("The root of a tree cannot be deleted")]
    CannotDeleteRoot,
}

/// Errors raised by the pricing engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Invalid pricing tree: {0}")]
    Validation(#[from] TreeValidationError),

    #[error("Tree edit rejected: {0}")]
    Edit(#[from] TreeEditError),

    #[error("No item at path {}", fmt_path(.0))]
    NotFound(Vec<usize>),
}
