//! Dinosaur catalog wiring.
//!
//! This module wraps the JSON catalog under `data/dinosaurs.json` so callers
//! can load a validated, immutable snapshot once per session. Types here
//! mirror the file's fields; callers use `Catalog` for ordered access and
//! lookup, and `FacetFilter` to express constraints on the categorical fields.

pub mod assets;
pub mod identity;
pub mod index;
pub mod model;

pub use assets::{ImageSource, resolve_image};
pub use identity::{Facet, FacetFilter, WILDCARD};
pub use index::{Catalog, DEFAULT_SCHEMA_VERSION};
pub use model::{CatalogDocument, CatalogRecord, RecordEntry};

pub use model::load_catalog_from_path;
