//! cod2lab -- converts a Captain of Industry data dump into a FactorioLab data set.
//!
//! The dump ships two JSON documents: one listing every product, one listing
//! every machine/building together with the recipes it runs. The conversion is
//! a single linear pass:
//!
//! 1. **Catalog** -- Products are normalized and indexed by display name
//!    ([`catalog::Catalog`]).
//! 2. **Extraction** -- Machines become planner buildings and their nested
//!    recipes become top-level recipes, with ingredients resolved through the
//!    catalog's name index ([`extractor::Extractor`]).
//! 3. **Assembly** -- Categories, icon layout, items and recipes are merged
//!    into one [`schema::LabData`] document ([`assembler::assemble`]).
//!
//! Anomalies in the dump skip only the offending product, building or recipe
//! and are logged through `tracing`. The only fatal condition is a game-version
//! mismatch between the two documents.

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod extractor;
pub mod loader;
pub mod naming;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod schema;

pub use config::ConvertConfig;
pub use loader::DataLoadError;
pub use pipeline::{convert, convert_dir, run, ConvertError, Conversion};
