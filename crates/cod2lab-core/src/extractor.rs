//! Machine/building and recipe extraction.
//!
//! Every machine in the dump becomes a planner building whose consumption map
//! is derived from its workers, electricity draw and maintenance. Its nested
//! recipes are lifted into top-level recipes produced by that building.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::naming;
use crate::pipeline::ConvertError;
use crate::report::{SkipReason, SkipReport};
use crate::resolver::{self, ResolveError, MAINTENANCE_KIND};
use crate::schema::{MachineData, MachinesDocument, Quantity, QuantityMap, RecipeData};

/// Category id shared by every building.
pub const BUILDING_CATEGORY: &str = "buildings";

/// Consumption key for the default worker product.
pub const WORKER_ID: &str = "worker";

/// Consumption key for electric power.
pub const ELECTRICITY_ID: &str = "electricity";

// ===========================================================================
// Errors
// ===========================================================================

/// Why a building (and with it all of its recipes) was skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildingError {
    #[error("building id '{source_id}' has no usable tokens")]
    EmptyId { source_id: String },

    #[error("duplicate building id '{id}'")]
    DuplicateId { id: String },

    #[error("building '{id}': {source}")]
    Maintenance { id: String, source: ResolveError },
}

impl BuildingError {
    pub fn reason(&self) -> SkipReason {
        match self {
            BuildingError::EmptyId { .. } => SkipReason::EmptyId,
            BuildingError::DuplicateId { .. } => SkipReason::DuplicateId,
            BuildingError::Maintenance { source, .. } => source.reason(),
        }
    }
}

/// Why a single recipe was skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecipeError {
    #[error("recipe id '{source_id}' has no usable tokens")]
    EmptyId { source_id: String },

    #[error("recipe id '{base}' seen {occurrence} times, no suffix letter left")]
    SuffixExhausted { base: String, occurrence: u32 },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("recipe '{id}' has no outputs")]
    NoOutputs { id: String },
}

impl RecipeError {
    pub fn reason(&self) -> SkipReason {
        match self {
            RecipeError::EmptyId { .. } => SkipReason::EmptyId,
            RecipeError::SuffixExhausted { .. } => SkipReason::SuffixExhausted,
            RecipeError::Resolve(e) => e.reason(),
            RecipeError::NoOutputs { .. } => SkipReason::NoOutputs,
        }
    }
}

// ===========================================================================
// Extracted records
// ===========================================================================

/// A building as the planner sees it. Its category is always
/// [`BUILDING_CATEGORY`] and its speed always 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub id: String,
    pub name: String,
    pub consumption: QuantityMap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub duration: Quantity,
    pub producers: Vec<String>,
    /// Id of the item whose icon stands for the recipe.
    pub icon: String,
    pub inputs: QuantityMap,
    pub outputs: QuantityMap,
}

/// Everything extracted from the machines document.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub buildings: Vec<Building>,
    pub recipes: Vec<Recipe>,
}

// ===========================================================================
// Recipe id disambiguation
// ===========================================================================

/// Hands out recipe ids, suffixing repeats of a normalized id with a letter.
///
/// The counter is global across buildings. The first occurrence keeps the
/// bare id; occurrence `n >= 2` gets the letter with code `95 + n`, so the
/// second is `-a`, the third `-b`, up to `-z` at occurrence 27.
#[derive(Debug, Default)]
pub struct RecipeIds {
    seen: HashMap<String, u32>,
}

impl RecipeIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign an id for the next occurrence of `base`. The occurrence is
    /// counted even when this returns an error.
    pub fn assign(&mut self, base: &str) -> Result<String, RecipeError> {
        let occurrence = self.seen.entry(base.to_string()).or_insert(0);
        *occurrence += 1;
        if *occurrence == 1 {
            return Ok(base.to_string());
        }
        match suffix_letter(*occurrence) {
            Some(letter) => Ok(format!("{base}-{letter}")),
            None => Err(RecipeError::SuffixExhausted {
                base: base.to_string(),
                occurrence: *occurrence,
            }),
        }
    }
}

fn suffix_letter(occurrence: u32) -> Option<char> {
    let letter = char::from_u32(95 + occurrence)?;
    letter.is_ascii_lowercase().then_some(letter)
}

// ===========================================================================
// Extractor
// ===========================================================================

/// Walks the machines document, claiming building ids in the catalog's shared
/// namespace and resolving ingredients through its name index.
pub struct Extractor<'c> {
    catalog: &'c mut Catalog,
    recipe_ids: RecipeIds,
    extraction: Extraction,
}

impl<'c> Extractor<'c> {
    pub fn new(catalog: &'c mut Catalog) -> Self {
        Self {
            catalog,
            recipe_ids: RecipeIds::new(),
            extraction: Extraction::default(),
        }
    }

    /// Extract buildings and recipes from `doc`.
    ///
    /// Fails only if `doc` was dumped from a different game version than the
    /// catalog's products; every other problem skips a single entity.
    pub fn extract(
        mut self,
        doc: &MachinesDocument,
        report: &mut SkipReport,
    ) -> Result<Extraction, ConvertError> {
        if doc.game_version != self.catalog.version() {
            return Err(ConvertError::VersionMismatch {
                products: self.catalog.version().to_string(),
                machines: doc.game_version.clone(),
            });
        }

        for raw in &doc.machines_and_buildings {
            self.extract_machine(raw, report);
        }

        info!(
            buildings = self.extraction.buildings.len(),
            recipes = self.extraction.recipes.len(),
            "machines and recipes extracted"
        );
        Ok(self.extraction)
    }

    fn extract_machine(&mut self, raw: &MachineData, report: &mut SkipReport) {
        let building = match self.building(raw) {
            Ok(building) => building,
            Err(err) => {
                warn!(id = %raw.id, "skipping building: {err}");
                report.record(err.reason());
                return;
            }
        };
        debug!(id = %building.id, recipes = raw.recipes.len(), "building added");

        for raw_recipe in &raw.recipes {
            match self.recipe(&building.id, raw_recipe) {
                Ok(recipe) => {
                    debug!(id = %recipe.id, building = %building.id, "recipe added");
                    self.extraction.recipes.push(recipe);
                }
                Err(err) => {
                    warn!(
                        recipe = %raw_recipe.id,
                        building = %building.id,
                        "skipping recipe: {err}"
                    );
                    report.record(err.reason());
                }
            }
        }

        self.extraction.buildings.push(building);
    }

    /// Build the planner record for one machine and claim its id.
    pub(crate) fn building(&mut self, raw: &MachineData) -> Result<Building, BuildingError> {
        let id = naming::translate(&raw.id);
        if id.is_empty() {
            return Err(BuildingError::EmptyId {
                source_id: raw.id.clone(),
            });
        }
        if self.catalog.contains_id(&id) {
            return Err(BuildingError::DuplicateId { id });
        }

        let consumption = self
            .consumption(raw)
            .map_err(|source| BuildingError::Maintenance {
                id: id.clone(),
                source,
            })?;

        self.catalog.claim_id(&id);
        self.catalog.register_icon(id.clone(), raw.icon_path.clone());

        Ok(Building {
            id,
            name: raw.name.clone(),
            consumption,
        })
    }

    fn consumption(&self, raw: &MachineData) -> Result<QuantityMap, ResolveError> {
        let mut consumption = QuantityMap::new();
        if is_positive(&raw.workers) {
            consumption.insert(WORKER_ID.to_string(), raw.workers.clone());
        }
        if is_positive(&raw.electricity_consumed) {
            consumption.insert(ELECTRICITY_ID.to_string(), raw.electricity_consumed.clone());
        }
        if let Some(unit) = raw.maintenance_cost_units.as_deref().filter(|u| !u.is_empty()) {
            let unit_id = resolver::resolve_name(self.catalog.name_index(), unit, MAINTENANCE_KIND)?;
            consumption.insert(unit_id.to_string(), raw.maintenance_cost_quantity.clone());
        }
        Ok(consumption)
    }

    /// Lift one nested recipe into a top-level recipe produced by `producer`.
    pub(crate) fn recipe(&mut self, producer: &str, raw: &RecipeData) -> Result<Recipe, RecipeError> {
        let base = naming::translate(&raw.id);
        if base.is_empty() {
            return Err(RecipeError::EmptyId {
                source_id: raw.id.clone(),
            });
        }
        let id = self.recipe_ids.assign(&base)?;

        let index = self.catalog.name_index();
        let inputs = resolver::resolve_ingredients(&raw.inputs, index)?;
        let outputs = resolver::resolve_ingredients(&raw.outputs, index)?;
        if outputs.is_empty() {
            return Err(RecipeError::NoOutputs { id });
        }

        Ok(Recipe {
            id,
            name: raw.name.clone(),
            duration: raw.duration.clone(),
            producers: vec![producer.to_string()],
            icon: producer.to_string(),
            inputs,
            outputs,
        })
    }
}

fn is_positive(quantity: &Quantity) -> bool {
    quantity.as_f64().is_some_and(|q| q > 0.0)
}

// ===========================================================================
// Tests
// ===========================================================================
