//! Shared library for the dinosaur catalog viewer.
//!
//! The crate loads a validated, immutable catalog once per session and exposes
//! the pure operations the presentation layer calls after every input change:
//! [`filter`] to compute the visible records and [`unique_values`] to populate
//! the diet and period options. View models and the terminal browse session
//! sit on top of those and never feed anything back into the catalog.

pub mod catalog;
pub mod config;
pub mod error;
pub mod facets;
pub mod filter;
pub mod observability;
pub mod session;
pub mod view;

mod schema_loader;

pub use catalog::{
    Catalog, CatalogDocument, CatalogRecord, DEFAULT_SCHEMA_VERSION, Facet, FacetFilter,
    ImageSource, RecordEntry, WILDCARD, load_catalog_from_path, resolve_image,
};
pub use config::{CatalogSource, ExplorerConfig, find_repo_root};
pub use error::CatalogError;
pub use facets::{FacetOptions, facet_counts, unique_values};
pub use filter::{ActiveFilter, FilterKind, FilterState, filter};
pub use session::{ExplorerSession, Outcome, ResultsView, SessionCommand, run_session};
pub use view::{DietTone, PeriodTone, RecordCard, RecordDetail, ResultSummary};

