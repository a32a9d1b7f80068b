//! End-to-end conversion: catalog, extraction, assembly.

use std::path::Path;

use tracing::{info, warn};

use crate::assembler::{self, IconPlacement, LayoutError};
use crate::catalog::Catalog;
use crate::config::ConvertConfig;
use crate::extractor::Extractor;
use crate::loader::{self, DataLoadError};
use crate::report::SkipReport;
use crate::schema::{LabData, MachinesDocument, ProductsDocument};

/// Errors that abort a conversion before anything is written.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The two documents were dumped from different game versions.
    #[error("game version mismatch: products are '{products}', machines and buildings are '{machines}'")]
    VersionMismatch { products: String, machines: String },

    /// The configured icon layout cannot place every icon.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Load(#[from] DataLoadError),
}

/// Result of a successful conversion.
#[derive(Debug)]
pub struct Conversion {
    pub data: LabData,
    /// Icon placements in output order, for a sprite sheet composer.
    pub icons: Vec<IconPlacement>,
    pub report: SkipReport,
}

/// Convert the two dump documents into a FactorioLab data set.
pub fn convert(
    products: &ProductsDocument,
    machines: &MachinesDocument,
    config: &ConvertConfig,
) -> Result<Conversion, ConvertError> {
    let mut report = SkipReport::new();
    let mut catalog = Catalog::build(products, &mut report);
    let extraction = Extractor::new(&mut catalog).extract(machines, &mut report)?;
    let (data, icons) = assembler::assemble(&catalog, extraction, config)?;

    if report.is_empty() {
        info!("conversion finished cleanly");
    } else {
        warn!(skipped = report.total(), "conversion finished with skips: {report}");
    }
    Ok(Conversion {
        data,
        icons,
        report,
    })
}

/// Load both dump documents from `input_dir` and convert them.
pub fn convert_dir(input_dir: &Path, config: &ConvertConfig) -> Result<Conversion, ConvertError> {
    let products = loader::load_products(input_dir)?;
    let machines = loader::load_machines(input_dir)?;
    convert(&products, &machines, config)
}

/// Convert the dump in `input_dir` and write the data set to `output`.
///
/// Nothing is written unless the conversion succeeds.
pub fn run(
    input_dir: &Path,
    output: &Path,
    config: &ConvertConfig,
) -> Result<Conversion, ConvertError> {
    let conversion = convert_dir(input_dir, config)?;
    loader::write_json(output, &conversion.data)?;
    info!(
        path = %output.display(),
        items = conversion.data.items.len(),
        recipes = conversion.data.recipes.len(),
        "data set written"
    );
    Ok(conversion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_mismatch_message_names_both_versions() {
        let err = ConvertError::VersionMismatch {
            products: "0.6.3".to_string(),
            machines: "0.6.4".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("0.6.3"));
        assert!(msg.contains("0.6.4"));
    }

    #[test]
    fn oversized_layout_aborts_conversion() {
        let products: ProductsDocument = serde_json::from_str(
            r#"{"game_version": "1.0", "products": [
                {"type": "CountableProductProto", "id": "Product_Copper", "name": "Copper", "icon_path": "c.png"},
                {"type": "CountableProductProto", "id": "Product_Iron", "name": "Iron", "icon_path": "i.png"},
                {"type": "FluidProductProto", "id": "Product_Water", "name": "Water", "icon_path": "w.png"}
            ]}"#,
        )
        .unwrap();
        let machines: MachinesDocument =
            serde_json::from_str(r#"{"game_version": "1.0", "machines_and_buildings": []}"#)
                .unwrap();
        let mut config = ConvertConfig::default();
        config.layout.sheet_width = 1;
        config.layout.pitch = u32::MAX;
        config.layout.row_height = u32::MAX;

        let result = convert(&products, &machines, &config);
        assert!(matches!(
            result,
            Err(ConvertError::Layout(ref e)) if e.id == "water"
        ));
    }

    #[test]
    fn empty_documents_convert() {
        let products: ProductsDocument =
            serde_json::from_str(r#"{"game_version": "1.0", "products": []}"#).unwrap();
        let machines: MachinesDocument =
            serde_json::from_str(r#"{"game_version": "1.0", "machines_and_buildings": []}"#)
                .unwrap();

        let conversion = convert(&products, &machines, &ConvertConfig::default()).unwrap();
        assert_eq!(conversion.data.items.len(), 1);
        assert!(conversion.data.recipes.is_empty());
        assert!(conversion.data.icons.is_empty());
        assert!(conversion.report.is_empty());
    }
}
