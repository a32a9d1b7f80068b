//! Product catalog: accepted products, the display-name index and the shared
//! id namespace.
//!
//! Products are registered in encounter order after a fixed set of defaults.
//! Buildings later claim ids from the same namespace, so the catalog also owns
//! the icon source list both kinds feed into.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::naming;
use crate::report::{SkipReason, SkipReport};
use crate::schema::{ProductData, ProductsDocument};

/// Products that the dump never lists but recipes and buildings refer to.
/// `(id, display name)`, all virtual.
pub const DEFAULT_PRODUCTS: &[(&str, &str)] = &[("worker", "Workers")];

// ===========================================================================
// Product types
// ===========================================================================

/// Product category, taken from the `<Type>ProductProto` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Countable,
    Fluid,
    Loose,
    Molten,
    Virtual,
}

impl ProductType {
    /// Every type, in category-list order.
    pub const ALL: [ProductType; 5] = [
        ProductType::Countable,
        ProductType::Fluid,
        ProductType::Loose,
        ProductType::Molten,
        ProductType::Virtual,
    ];

    /// Match a type tag as it appears in the dump (`Countable`, `Fluid`, ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            ProductType::Countable => "Countable",
            ProductType::Fluid => "Fluid",
            ProductType::Loose => "Loose",
            ProductType::Molten => "Molten",
            ProductType::Virtual => "Virtual",
        }
    }

    /// Category id in the output.
    pub fn id(self) -> &'static str {
        match self {
            ProductType::Countable => "countable",
            ProductType::Fluid => "fluid",
            ProductType::Loose => "loose",
            ProductType::Molten => "molten",
            ProductType::Virtual => "virtual",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProductType::Countable => "Unit resources",
            ProductType::Fluid => "Fluid resources",
            ProductType::Loose => "Loose resources",
            ProductType::Molten => "Molten resources",
            ProductType::Virtual => "Virtual resources",
        }
    }

    /// Id of the item whose icon represents the category.
    pub fn icon(self) -> &'static str {
        match self {
            ProductType::Countable => "iron",
            ProductType::Fluid => "water",
            ProductType::Loose => "gravel",
            ProductType::Molten => "molten-iron",
            ProductType::Virtual => "maintenance-t1",
        }
    }
}

// ===========================================================================
// Catalog entries
// ===========================================================================

/// An accepted product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub kind: ProductType,
}

/// Where the image for a product or building comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    pub id: String,
    pub source: String,
}

// ===========================================================================
// Catalog
// ===========================================================================

/// Accumulated state of one conversion run: products, name index, claimed
/// ids and icon sources.
#[derive(Debug)]
pub struct Catalog {
    version: String,
    products: Vec<Product>,
    name_index: HashMap<String, String>,
    ids: HashSet<String>,
    icons: Vec<IconSource>,
}

impl Catalog {
    /// Create a catalog holding only [`DEFAULT_PRODUCTS`].
    pub fn new(version: impl Into<String>) -> Self {
        let mut catalog = Self {
            version: version.into(),
            products: Vec::new(),
            name_index: HashMap::new(),
            ids: HashSet::new(),
            icons: Vec::new(),
        };
        for &(id, name) in DEFAULT_PRODUCTS {
            catalog.ids.insert(id.to_string());
            catalog.name_index.insert(name.to_string(), id.to_string());
            catalog.products.push(Product {
                id: id.to_string(),
                name: name.to_string(),
                kind: ProductType::Virtual,
            });
        }
        catalog
    }

    /// Build the catalog from a products document.
    pub fn build(doc: &ProductsDocument, report: &mut SkipReport) -> Self {
        let mut catalog = Self::new(doc.game_version.clone());
        for raw in &doc.products {
            catalog.insert(raw, report);
        }
        info!(
            version = %catalog.version,
            products = catalog.products.len(),
            indexed = catalog.name_index.len(),
            "product catalog built"
        );
        catalog
    }

    /// Register one raw product. Returns `false` if it was left out of the
    /// product list entirely.
    ///
    /// A product whose display name is already indexed is still listed, but
    /// its name is not indexed again and no icon is registered for it.
    pub fn insert(&mut self, raw: &ProductData, report: &mut SkipReport) -> bool {
        let Some(kind) = naming::product_type_tag(&raw.type_name).and_then(ProductType::from_tag)
        else {
            warn!(type_name = %raw.type_name, "strange product type, skipping");
            report.record(SkipReason::UnknownProductType);
            return false;
        };

        let Some(wrapped) = naming::unwrap_product_id(&raw.id) else {
            warn!(id = %raw.id, "strange product id, skipping");
            report.record(SkipReason::MalformedProductId);
            return false;
        };

        let id = naming::translate(wrapped.name);
        if id.is_empty() {
            warn!(id = %raw.id, "product id has no usable tokens, skipping");
            report.record(SkipReason::EmptyId);
            return false;
        }
        if !self.claim_id(&id) {
            warn!(%id, "duplicate product id, skipping");
            report.record(SkipReason::DuplicateId);
            return false;
        }

        self.products.push(Product {
            id: id.clone(),
            name: raw.name.clone(),
            kind,
        });

        if self.name_index.contains_key(&raw.name) {
            warn!(%id, name = %raw.name, "duplicate product name, not indexed");
            report.record(SkipReason::DuplicateName);
            return true;
        }
        self.name_index.insert(raw.name.clone(), id.clone());

        debug!(%id, name = %raw.name, kind = kind.id(), "product added");
        self.register_icon(id, raw.icon_path.clone());
        true
    }

    /// Claim an id in the shared product/building namespace. Returns `false`
    /// if it was already taken.
    pub fn claim_id(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn register_icon(&mut self, id: String, source: String) {
        self.icons.push(IconSource { id, source });
    }

    /// Look up a product id by display name.
    pub fn product_id(&self, name: &str) -> Option<&str> {
        self.name_index.get(name).map(String::as_str)
    }

    pub fn name_index(&self) -> &HashMap<String, String> {
        &self.name_index
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn icons(&self) -> &[IconSource] {
        &self.icons
    }

    /// Game version recorded from the products document.
    pub fn version(&self) -> &str {
        &self.version
    }
}

// ===========================================================================
// Tests
// ===========================================================================
