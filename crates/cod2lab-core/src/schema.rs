//! Serde structs for the documents on both sides of the conversion.
//!
//! The input side mirrors the game's data dump (`products.json` and
//! `machines_and_buildings.json`); the output side is the FactorioLab data
//! set. Quantities and durations are kept as raw JSON numbers so integers
//! stay integers on the way through.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;

/// A quantity or duration exactly as the dump wrote it.
pub type Quantity = Number;

/// Product id -> quantity, ordered by id.
pub type QuantityMap = BTreeMap<String, Quantity>;

fn zero() -> Quantity {
    Number::from(0)
}

// ===========================================================================
// Input: products
// ===========================================================================

/// The products document.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsDocument {
    pub game_version: String,
    #[serde(default)]
    pub products: Vec<ProductData>,
}

/// A raw product entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductData {
    /// Type tag, e.g. `CountableProductProto`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Wrapped id, e.g. `Product_IronOre`.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon_path: String,
}

// ===========================================================================
// Input: machines and buildings
// ===========================================================================

/// The machines/buildings document.
#[derive(Debug, Clone, Deserialize)]
pub struct MachinesDocument {
    pub game_version: String,
    #[serde(default)]
    pub machines_and_buildings: Vec<MachineData>,
}

/// A raw machine or building entry with its nested recipes.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineData {
    pub id: String,
    pub name: String,
    #[serde(default = "zero")]
    pub workers: Quantity,
    #[serde(default = "zero")]
    pub electricity_consumed: Quantity,
    /// Display name of the maintenance product; `None` or empty means none.
    #[serde(default)]
    pub maintenance_cost_units: Option<String>,
    #[serde(default = "zero")]
    pub maintenance_cost_quantity: Quantity,
    #[serde(default)]
    pub icon_path: String,
    #[serde(default)]
    pub recipes: Vec<RecipeData>,
}

/// A raw recipe entry nested under a machine.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeData {
    pub id: String,
    pub name: String,
    pub duration: Quantity,
    #[serde(default)]
    pub inputs: Vec<IngredientData>,
    #[serde(default)]
    pub outputs: Vec<IngredientData>,
}

/// One ingredient, referenced by product display name.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientData {
    pub name: String,
    pub quantity: Quantity,
}

// ===========================================================================
// Output: FactorioLab data set
// ===========================================================================

/// The complete output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabData {
    /// Source system name -> game version.
    pub version: BTreeMap<String, String>,
    pub categories: Vec<CategoryEntry>,
    pub icons: Vec<IconEntry>,
    pub items: Vec<ItemEntry>,
    pub recipes: Vec<RecipeEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// An icon's place on the sprite sheet, as CSS `background-position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconEntry {
    pub id: String,
    pub position: String,
    pub color: String,
}

/// A product or building as listed by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub row: u32,
    /// Present for buildings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<MachineEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineEntry {
    pub speed: u32,
    pub consumption: QuantityMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub id: String,
    pub name: String,
    pub time: Quantity,
    pub producers: Vec<String>,
    pub row: u32,
    pub icon: String,
    #[serde(rename = "in")]
    pub inputs: QuantityMap,
    #[serde(rename = "out")]
    pub outputs: QuantityMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_defaults_for_missing_fields() {
        let json = r#"{"id": "SmelterT1", "name": "Smelter"}"#;
        let m: MachineData = serde_json::from_str(json).unwrap();
        assert_eq!(m.workers, Number::from(0));
        assert_eq!(m.electricity_consumed, Number::from(0));
        assert!(m.maintenance_cost_units.is_none());
        assert!(m.recipes.is_empty());
    }

    #[test]
    fn product_type_field_is_renamed() {
        let json = r#"{"type": "FluidProductProto", "id": "Product_Water", "name": "Water", "icon_path": "w.png"}"#;
        let p: ProductData = serde_json::from_str(json).unwrap();
        assert_eq!(p.type_name, "FluidProductProto");
    }

    #[test]
    fn quantities_keep_integer_form() {
        let json = r#"{"name": "Iron", "quantity": 3}"#;
        let i: IngredientData = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&i.quantity).unwrap(), "3");

        let json = r#"{"name": "Iron", "quantity": 1.5}"#;
        let i: IngredientData = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&i.quantity).unwrap(), "1.5");
    }

    #[test]
    fn recipe_entry_uses_in_out_keys() {
        let entry = RecipeEntry {
            id: "smelt-iron".into(),
            name: "Smelt iron".into(),
            time: Number::from(10),
            producers: vec!["smelter-t1".into()],
            row: 0,
            icon: "smelter-t1".into(),
            inputs: QuantityMap::new(),
            outputs: QuantityMap::from([("iron".to_string(), Number::from(1))]),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("in").is_some());
        assert_eq!(value["out"]["iron"], 1);
        assert!(value.get("inputs").is_none());
    }

    #[test]
    fn product_items_omit_machine() {
        let item = ItemEntry {
            id: "iron".into(),
            name: "Iron".into(),
            category: "countable".into(),
            row: 0,
            machine: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("machine").is_none());
    }
}
