//! Domain models for pricing catalogs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CATALOG_ACTUATOR, CATALOG_BODY, CATALOG_BONNET, CATALOG_FITTINGS, CATALOG_PAINTING,
    CATALOG_TRIM_CAGE, CATALOG_TRIM_PLUG, CATALOG_TRIM_SEAT, CATALOG_TRIM_STEM,
};
use crate::pricing::PricingTree;

/// How a catalog's selections are priced on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentGroup {
    /// Weight times series rate plus machining charge.
    Casting,
    /// Sum of the selected node prices.
    #[default]
    Priced,
}

impl ComponentGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentGroup::Casting => "CASTING",
            ComponentGroup::Priced => "PRICED",
        }
    }
}

impl std::str::FromStr for ComponentGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CASTING" => Ok(ComponentGroup::Casting),
            "PRICED" => Ok(ComponentGroup::Priced),
            other => Err(format!("Unknown component group: {}", other)),
        }
    }
}

/// A persisted pricing tree with its identity and display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub group: ComponentGroup,
    pub tree: PricingTree,
    pub updated_at: NaiveDateTime,
}

/// Data for creating or replacing a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalog {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub group: ComponentGroup,
    #[serde(default)]
    pub tree: PricingTree,
}

impl NewCatalog {
    pub fn new(id: &str, name: &str, group: ComponentGroup) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            group,
            tree: PricingTree::default(),
        }
    }

    pub fn with_tree(mut self, tree: PricingTree) -> Self {
        self.tree = tree;
        self
    }
}

impl From<Catalog> for NewCatalog {
    fn from(catalog: Catalog) -> Self {
        NewCatalog {
            id: catalog.id,
            name: catalog.name,
            description: catalog.description,
            group: catalog.group,
            tree: catalog.tree,
        }
    }
}

/// The standard component catalogs of a valve quote, in quoting order.
pub fn default_catalogs() -> Vec<NewCatalog> {
    [
        (CATALOG_BODY, "Body", ComponentGroup::Casting),
        (CATALOG_BONNET, "Bonnet", ComponentGroup::Casting),
        (CATALOG_TRIM_PLUG, "Trim - Plug", ComponentGroup::Casting),
        (CATALOG_TRIM_SEAT, "Trim - Seat", ComponentGroup::Casting),
        (CATALOG_TRIM_STEM, "Trim - Stem", ComponentGroup::Casting),
        (CATALOG_TRIM_CAGE, "Trim - Cage", ComponentGroup::Casting),
        (CATALOG_FITTINGS, "Fittings", ComponentGroup::Priced),
        (CATALOG_ACTUATOR, "Actuator", ComponentGroup::Priced),
        (CATALOG_PAINTING, "Painting", ComponentGroup::Priced),
    ]
    .into_iter()
    .map(|(id, name, group)| NewCatalog::new(id, name, group))
    .collect()
}
