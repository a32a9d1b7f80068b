//! Output assembly: categories, icon layout, items and recipes merged into
//! one [`LabData`] document.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{Catalog, IconSource, ProductType};
use crate::config::{ConvertConfig, IconLayoutConfig};
use crate::extractor::{BUILDING_CATEGORY, Building, Extraction, Recipe};
use crate::schema::{CategoryEntry, IconEntry, ItemEntry, LabData, MachineEntry, RecipeEntry};

/// An icon's source image and its pixel offset on the sprite sheet.
///
/// This is what an external sprite composer consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconPlacement {
    pub id: String,
    pub source: String,
    pub x: u64,
    pub y: u64,
}

/// An icon whose pixel offset does not fit in 64 bits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "icon '{id}' (#{index}) falls off the sprite sheet with pitch {pitch} and row height {row_height}"
)]
pub struct LayoutError {
    pub id: String,
    pub index: u64,
    pub pitch: u32,
    pub row_height: u32,
}

impl IconPlacement {
    /// CSS `background-position` for this placement.
    pub fn position(&self) -> String {
        format!("-{}px -{}px", self.x, self.y)
    }
}

/// One category per product type, in [`ProductType::ALL`] order.
pub fn categories() -> Vec<CategoryEntry> {
    ProductType::ALL
        .into_iter()
        .map(|t| CategoryEntry {
            id: t.id().to_string(),
            name: t.display_name().to_string(),
            icon: t.icon().to_string(),
        })
        .collect()
}

/// Sort icon sources by id and give each a spot on the sprite sheet.
///
/// Offsets are computed in `u64`; a layout that overflows even that fails
/// instead of wrapping.
pub fn layout_icons(
    sources: &[IconSource],
    layout: &IconLayoutConfig,
) -> Result<Vec<IconPlacement>, LayoutError> {
    let mut sorted: Vec<&IconSource> = sources.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let sheet_width = u64::from(layout.sheet_width.max(1));
    sorted
        .into_iter()
        .enumerate()
        .map(|(n, icon)| {
            let index = n as u64;
            let overflow = || LayoutError {
                id: icon.id.clone(),
                index,
                pitch: layout.pitch,
                row_height: layout.row_height,
            };
            let offset = index
                .checked_mul(u64::from(layout.pitch))
                .ok_or_else(overflow)?;
            let y = (offset / sheet_width)
                .checked_mul(u64::from(layout.row_height))
                .ok_or_else(overflow)?;
            Ok(IconPlacement {
                id: icon.id.clone(),
                source: icon.source.clone(),
                x: offset % sheet_width,
                y,
            })
        })
        .collect()
}

/// Products first, in catalog order, then buildings.
pub fn items(catalog: &Catalog, buildings: &[Building]) -> Vec<ItemEntry> {
    let products = catalog.products().iter().map(|p| ItemEntry {
        id: p.id.clone(),
        name: p.name.clone(),
        category: p.kind.id().to_string(),
        row: 0,
        machine: None,
    });
    let buildings = buildings.iter().map(|b| ItemEntry {
        id: b.id.clone(),
        name: b.name.clone(),
        category: BUILDING_CATEGORY.to_string(),
        row: 0,
        machine: Some(MachineEntry {
            speed: 1,
            consumption: b.consumption.clone(),
        }),
    });
    products.chain(buildings).collect()
}

fn recipe_entry(recipe: Recipe) -> RecipeEntry {
    RecipeEntry {
        id: recipe.id,
        name: recipe.name,
        time: recipe.duration,
        producers: recipe.producers,
        row: 0,
        icon: recipe.icon,
        inputs: recipe.inputs,
        outputs: recipe.outputs,
    }
}

/// Merge the catalog and extraction into the output document. Also returns
/// the icon placements the `icons` list was projected from.
pub fn assemble(
    catalog: &Catalog,
    extraction: Extraction,
    config: &ConvertConfig,
) -> Result<(LabData, Vec<IconPlacement>), LayoutError> {
    let placements = layout_icons(catalog.icons(), &config.layout)?;
    let icons = placements
        .iter()
        .map(|p| IconEntry {
            id: p.id.clone(),
            position: p.position(),
            color: config.layout.color.clone(),
        })
        .collect();

    let data = LabData {
        version: BTreeMap::from([(config.source_name.clone(), catalog.version().to_string())]),
        categories: categories(),
        icons,
        items: items(catalog, &extraction.buildings),
        recipes: extraction.recipes.into_iter().map(recipe_entry).collect(),
    };
    Ok((data, placements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::QuantityMap;
    use serde_json::Number;

    fn source(id: &str) -> IconSource {
        IconSource {
            id: id.to_string(),
            source: format!("{id}.png"),
        }
    }

    #[test]
    fn categories_follow_product_types() {
        let cats = categories();
        let ids: Vec<&str> = cats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["countable", "fluid", "loose", "molten", "virtual"]);
        assert_eq!(cats[0].name, "Unit resources");
        assert_eq!(cats[0].icon, "iron");
    }

    #[test]
    fn icons_are_sorted_by_id() {
        let placements = layout_icons(
            &[source("water"), source("iron"), source("gravel")],
            &IconLayoutConfig::default(),
        )
        .unwrap();
        let ids: Vec<&str> = placements.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["gravel", "iron", "water"]);
        assert_eq!(placements[0].source, "gravel.png");
        assert_eq!(placements[0].position(), "-0px -0px");
        assert_eq!(placements[1].position(), "-40px -0px");
        assert_eq!(placements[2].position(), "-80px -0px");
    }

    #[test]
    fn icons_wrap_at_sheet_width() {
        let sources: Vec<IconSource> = (0..32).map(|n| source(&format!("icon-{n:02}"))).collect();
        let placements = layout_icons(&sources, &IconLayoutConfig::default()).unwrap();
        // 30 * 40 = 1200 still fits; 31 * 40 = 1240 wraps to 24 on the next row.
        assert_eq!((placements[30].x, placements[30].y), (1200, 0));
        assert_eq!((placements[31].x, placements[31].y), (24, 64));
    }

    #[test]
    fn large_pitch_from_config_does_not_wrap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cod2lab.toml");
        std::fs::write(&path, "[layout]\npitch = 4000000000\n").unwrap();
        let config = ConvertConfig::load(&path).unwrap();

        let placements = layout_icons(
            &[source("copper"), source("iron"), source("water")],
            &config.layout,
        )
        .unwrap();
        // 4e9 = 1216 * 3289473 + 832; 8e9 = 1216 * 6578947 + 448.
        assert_eq!((placements[1].x, placements[1].y), (832, 3_289_473 * 64));
        assert_eq!((placements[2].x, placements[2].y), (448, 6_578_947 * 64));
        assert_eq!(placements[2].position(), "-448px -421052608px");
    }

    #[test]
    fn layout_beyond_u64_is_an_error() {
        let layout = IconLayoutConfig {
            sheet_width: 1,
            pitch: u32::MAX,
            row_height: u32::MAX,
            ..IconLayoutConfig::default()
        };
        let err = layout_icons(&[source("a"), source("b"), source("c")], &layout).unwrap_err();
        assert_eq!(err.id, "c");
        assert_eq!(err.index, 2);
        assert!(err.to_string().contains("falls off the sprite sheet"));
    }

    #[test]
    fn assemble_projects_everything() {
        let mut catalog = Catalog::new("0.6.3");
        catalog.register_icon("smelter-t1".to_string(), "smelter.png".to_string());
        let extraction = Extraction {
            buildings: vec![Building {
                id: "smelter-t1".to_string(),
                name: "Smelter".to_string(),
                consumption: QuantityMap::from([("worker".to_string(), Number::from(2))]),
            }],
            recipes: vec![Recipe {
                id: "smelt-iron".to_string(),
                name: "Iron smelting".to_string(),
                duration: Number::from(20),
                producers: vec!["smelter-t1".to_string()],
                icon: "smelter-t1".to_string(),
                inputs: QuantityMap::new(),
                outputs: QuantityMap::from([("worker".to_string(), Number::from(1))]),
            }],
        };

        let (data, placements) = assemble(&catalog, extraction, &ConvertConfig::default()).unwrap();
        assert_eq!(data.version["Captain of Industry"], "0.6.3");
        assert_eq!(data.categories.len(), 5);
        assert_eq!(placements.len(), 1);
        assert_eq!(data.icons[0].color, "#000000");

        assert_eq!(data.items.len(), 2);
        assert_eq!(data.items[0].id, "worker");
        assert_eq!(data.items[0].category, "virtual");
        assert!(data.items[0].machine.is_none());
        let building = &data.items[1];
        assert_eq!(building.category, "buildings");
        assert_eq!(building.machine.as_ref().unwrap().speed, 1);

        assert_eq!(data.recipes[0].time, Number::from(20));
        assert_eq!(data.recipes[0].row, 0);
    }
}
