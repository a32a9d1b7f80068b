//! File plumbing: format detection, data file discovery, deserialization and
//! JSON output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::schema::{MachinesDocument, ProductsDocument};

/// Base name of the products document.
pub const PRODUCTS_FILE: &str = "products";

/// Base name of the machines/buildings document.
pub const MACHINES_FILE: &str = "machines_and_buildings";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while reading or writing data files.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The output could not be serialized.
    #[error("failed to serialize {file}: {detail}")]
    Serialize { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Formats and discovery
// ===========================================================================

/// Formats a dump or config file may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Ron,
    Toml,
}

impl Format {
    /// Every format, in the order a directory is searched.
    pub const ALL: [Format; 3] = [Format::Json, Format::Ron, Format::Toml];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Ron => "ron",
            Format::Toml => "toml",
        }
    }
}

/// Pick the format from a file's extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let ext = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .into_iter()
        .find(|f| Some(f.extension()) == ext)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

/// Locate `{base_name}.{json,ron,toml}` in `dir`.
///
/// `Ok(None)` when there is none; two candidates for one base name are
/// ambiguous and rejected.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut candidates = Format::ALL
        .into_iter()
        .map(|f| dir.join(format!("{base_name}.{}", f.extension())))
        .filter(|path| path.is_file());

    let Some(first) = candidates.next() else {
        return Ok(None);
    };
    match candidates.next() {
        Some(second) => Err(DataLoadError::ConflictingFormats { a: first, b: second }),
        None => Ok(Some(first)),
    }
}

/// Like [`find_data_file`], but a missing file is an error.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let parse_error = |detail: String| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Load the products document from `dir`.
pub fn load_products(dir: &Path) -> Result<ProductsDocument, DataLoadError> {
    deserialize_file(&require_data_file(dir, PRODUCTS_FILE)?)
}

/// Load the machines/buildings document from `dir`.
pub fn load_machines(dir: &Path) -> Result<MachinesDocument, DataLoadError> {
    deserialize_file(&require_data_file(dir, MACHINES_FILE)?)
}

// ===========================================================================
// Output
// ===========================================================================

/// Serialize `value` as JSON indented by four spaces, keeping non-ASCII
/// text as is, and write it to `path`. Missing parent directories are
/// created.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DataLoadError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| DataLoadError::Serialize {
            file: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, buf)?;
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================
