//! Ingredient resolution against the catalog's display-name index.

use std::collections::HashMap;

use crate::report::SkipReason;
use crate::schema::{IngredientData, QuantityMap};

/// A display-name reference that is not in the name index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {expected_kind} '{name}'")]
pub struct ResolveError {
    pub name: String,
    pub expected_kind: &'static str,
}

impl ResolveError {
    pub fn reason(&self) -> SkipReason {
        if self.expected_kind == MAINTENANCE_KIND {
            SkipReason::UnknownMaintenanceUnit
        } else {
            SkipReason::UnknownIngredient
        }
    }
}

pub(crate) const INGREDIENT_KIND: &str = "ingredient";
pub(crate) const MAINTENANCE_KIND: &str = "maintenance unit";

/// Look up a display name, returning a `ResolveError` if it is not indexed.
pub fn resolve_name<'a>(
    index: &'a HashMap<String, String>,
    name: &str,
    expected_kind: &'static str,
) -> Result<&'a str, ResolveError> {
    index
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| ResolveError {
            name: name.to_string(),
            expected_kind,
        })
}

/// Resolve an ingredient list into `product id -> quantity`.
///
/// All or nothing: the first unknown name fails the whole list. A name
/// listed twice keeps its last quantity.
pub fn resolve_ingredients(
    ingredients: &[IngredientData],
    index: &HashMap<String, String>,
) -> Result<QuantityMap, ResolveError> {
    ingredients
        .iter()
        .map(|ingredient| {
            resolve_name(index, &ingredient.name, INGREDIENT_KIND)
                .map(|id| (id.to_string(), ingredient.quantity.clone()))
        })
        .collect::<Result<QuantityMap, ResolveError>>()
}
