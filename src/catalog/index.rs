//! Validated, immutable view of a dinosaur catalog.
//!
//! Loading checks the document against the catalog JSON Schema, enforces the
//! allowed `schema_version`, validates required record fields and resolves
//! image references. After that the catalog is read-only for the rest of the
//! session; the filter engine borrows records from it.

use crate::catalog::ImageSource;
use crate::catalog::model::{CatalogDocument, CatalogRecord};
use crate::error::CatalogError;
use crate::schema_loader::{
    SchemaLoadOptions, SchemaLoadResult, load_embedded_catalog_schema, load_json_schema,
};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// The only catalog layout this build understands.
pub const DEFAULT_SCHEMA_VERSION: &str = "dino_catalog_v1";

const BUILTIN_CATALOG: &str = include_str!("../../data/dinosaurs.json");
const BUILTIN_ORIGIN: &str = "<builtin>/data/dinosaurs.json";

#[derive(Debug, Clone)]
/// Ordered, validated catalog records.
pub struct Catalog {
    schema_version: String,
    origin: PathBuf,
    records: Vec<CatalogRecord>,
}

impl Catalog {
    /// Load and validate a catalog file; assets resolve next to the file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_assets(path, path.parent())
    }

    /// Load and validate a catalog file with an explicit asset root.
    pub fn load_with_assets(path: &Path, asset_root: Option<&Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("opening catalog {}", path.display()))?;
        let schema_path = resolve_catalog_schema_path(path);
        Self::parse(&data, path, asset_root, schema_path.as_deref())
    }

    /// The catalog compiled into the crate, with assets under the checkout's
    /// `data/` directory when the build recorded one.
    pub fn builtin() -> Result<Self> {
        let asset_root =
            option_env!("DINO_EXPLORER_ROOT_HINT").map(|root| Path::new(root).join("data"));
        Self::builtin_with_assets(asset_root.as_deref())
    }

    pub fn builtin_with_assets(asset_root: Option<&Path>) -> Result<Self> {
        Self::parse(BUILTIN_CATALOG, Path::new(BUILTIN_ORIGIN), asset_root, None)
    }

    /// Validate catalog JSON held in memory. `origin` only labels errors.
    pub fn from_json_str(json: &str, origin: &Path, asset_root: Option<&Path>) -> Result<Self> {
        Self::parse(json, origin, asset_root, None)
    }

    /// Wrap records that are already validated, e.g. built in code.
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        Self {
            schema_version: DEFAULT_SCHEMA_VERSION.to_string(),
            origin: PathBuf::from("<memory>"),
            records,
        }
    }

    fn parse(
        json: &str,
        origin: &Path,
        asset_root: Option<&Path>,
        schema_path: Option<&Path>,
    ) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .with_context(|| format!("parsing catalog {}", origin.display()))?;

        let schema_version = value
            .get("schema_version")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_SCHEMA_VERSION)
            .to_string();
        validate_schema_version(&schema_version)?;
        validate_against_schema(&value, origin, schema_path)?;

        let document: CatalogDocument = serde_json::from_value(value)
            .with_context(|| format!("decoding catalog {}", origin.display()))?;
        let records = build_records(document, asset_root)
            .with_context(|| format!("validating catalog {}", origin.display()))?;

        let unresolved = records
            .iter()
            .filter(|record| matches!(record.image, ImageSource::Unresolved(_)))
            .count();
        tracing::debug!(
            origin = %origin.display(),
            records = records.len(),
            unresolved_images = unresolved,
            "catalog loaded"
        );

        Ok(Self {
            schema_version,
            origin: origin.to_path_buf(),
            records,
        })
    }

    /// The schema version declared in (or defaulted for) the loaded file.
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Where the catalog came from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Records in canonical source order.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose name matches exactly.
    ///
    /// Names are not guaranteed unique; the earliest entry wins, matching the
    /// order the records are displayed in.
    pub fn find(&self, name: &str) -> Option<&CatalogRecord> {
        self.records.iter().find(|record| record.name == name)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogRecord;
    type IntoIter = std::slice::Iter<'a, CatalogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from([DEFAULT_SCHEMA_VERSION.to_string()])
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        return Err(CatalogError::UnsupportedVersion {
            found: schema_version.to_string(),
            allowed: allowed.into_iter().collect(),
        }
        .into());
    }
    Ok(())
}

fn build_records(
    document: CatalogDocument,
    asset_root: Option<&Path>,
) -> Result<Vec<CatalogRecord>, CatalogError> {
    let mut records = Vec::with_capacity(document.dinosaurs.len());
    for (idx, entry) in document.dinosaurs.into_iter().enumerate() {
        let record = CatalogRecord::from_entry(idx + 1, entry, asset_root)?;
        if let ImageSource::Unresolved(raw) = &record.image {
            tracing::warn!(record = %record.name, image = %raw, "image reference did not resolve");
        }
        records.push(record);
    }
    Ok(records)
}

fn validate_against_schema(value: &Value, origin: &Path, schema_path: Option<&Path>) -> Result<()> {
    let allowed = allowed_schema_versions();
    let options = SchemaLoadOptions {
        allowed_versions: Some(&allowed),
        ..Default::default()
    };
    let schema: SchemaLoadResult = match schema_path {
        Some(path) => load_json_schema(path, options)
            .with_context(|| format!("loading catalog schema {}", path.display()))?,
        None => load_embedded_catalog_schema(options)?,
    };
    tracing::trace!(schema_version = %schema.schema_version, "catalog schema compiled");

    if let Err(errors) = schema.compiled.validate(value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CatalogError::Schema {
            path: origin.to_path_buf(),
            details,
        }
        .into());
    }
    Ok(())
}

/// Prefer a `schema/` directory that sits beside the catalog's `data/` dir.
fn resolve_catalog_schema_path(catalog_path: &Path) -> Option<PathBuf> {
    let base = catalog_path.parent()?.parent()?;
    let candidate = base.join("schema/catalog.schema.json");
    candidate.is_file().then_some(candidate)
}
