//! Deserializable representation of `data/dinosaurs.json` and the validated
//! record type the rest of the crate works with.
//!
//! `CatalogDocument`/`RecordEntry` mirror the file as written: every field is
//! optional so that a missing required field surfaces as a `CatalogError`
//! naming the record instead of a bare serde message. `CatalogRecord` is what
//! survives validation.

use crate::catalog::assets::{ImageSource, resolve_image};
use crate::error::CatalogError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
/// Catalog file as stored on disk. Unknown top-level keys are ignored.
pub struct CatalogDocument {
    #[serde(default)]
    pub schema_version: Option<String>,
    #[serde(default)]
    pub dinosaurs: Vec<RecordEntry>,
}

#[derive(Clone, Debug, Default, Deserialize)]
/// One unvalidated entry of the `dinosaurs` collection.
pub struct RecordEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub habitat: Option<String>,
    #[serde(default)]
    pub speed: Option<String>,
    #[serde(default)]
    pub discovery: Option<String>,
    #[serde(default, rename = "funFacts")]
    pub fun_facts: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A validated catalog entry.
///
/// `name`, `period`, `diet` and `description` are guaranteed non-blank;
/// everything else may be absent and consumers substitute placeholders.
pub struct CatalogRecord {
    pub name: String,
    pub period: String,
    pub diet: String,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub description: String,
    pub image: ImageSource,
    pub habitat: Option<String>,
    pub speed: Option<String>,
    pub discovery: Option<String>,
    pub fun_facts: Option<Vec<String>>,
}

impl CatalogRecord {
    /// Build a record with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        period: impl Into<String>,
        diet: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            period: period.into(),
            diet: diet.into(),
            height: None,
            weight: None,
            description: description.into(),
            image: ImageSource::Missing,
            habitat: None,
            speed: None,
            discovery: None,
            fun_facts: None,
        }
    }

    /// Validate a raw entry and resolve its image reference.
    ///
    /// `position` is 1-based and only used for error reporting.
    pub fn from_entry(
        position: usize,
        entry: RecordEntry,
        asset_root: Option<&Path>,
    ) -> Result<Self, CatalogError> {
        let display_name = entry
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("<unnamed>")
            .to_string();
        let required = |value: Option<String>, field: &'static str| {
            value
                .filter(|text| !text.trim().is_empty())
                .ok_or_else(|| CatalogError::MissingField {
                    position,
                    name: display_name.clone(),
                    field,
                })
        };

        let name = required(entry.name, "name")?;
        let period = required(entry.period, "period")?;
        let diet = required(entry.diet, "diet")?;
        let description = required(entry.description, "description")?;
        let image = resolve_image(entry.image.as_deref(), asset_root);

        Ok(Self {
            name,
            period,
            diet,
            height: entry.height,
            weight: entry.weight,
            description,
            image,
            habitat: entry.habitat,
            speed: entry.speed,
            discovery: entry.discovery,
            fun_facts: entry.fun_facts,
        })
    }
}

/// Read and parse a catalog document from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogDocument> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document: CatalogDocument =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> RecordEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let document: CatalogDocument = serde_json::from_value(json!({
            "dinosaurs": [{
                "name": "Ankylosaurus",
                "period": "Late Cretaceous",
                "diet": "Herbivore",
                "description": "Armored",
                "clubTail": true
            }],
            "generated_by": "fixture"
        }))
        .unwrap();
        assert_eq!(document.dinosaurs.len(), 1);
        assert!(document.schema_version.is_none());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let record = CatalogRecord::from_entry(
            1,
            entry(json!({
                "name": "Iguanodon",
                "period": "Early Cretaceous",
                "diet": "Herbivore",
                "description": "Thumb spikes"
            })),
            None,
        )
        .unwrap();
        assert_eq!(record.height, None);
        assert_eq!(record.fun_facts, None);
        assert_eq!(record.image, ImageSource::Missing);
    }

    #[test]
    fn blank_required_field_is_rejected_with_context() {
        let err = CatalogRecord::from_entry(
            3,
            entry(json!({
                "name": "Allosaurus",
                "period": "Late Jurassic",
                "diet": "   ",
                "description": "Apex predator"
            })),
            None,
        )
        .unwrap_err();
        match err {
            CatalogError::MissingField {
                position,
                name,
                field,
            } => {
                assert_eq!(position, 3);
                assert_eq!(name, "Allosaurus");
                assert_eq!(field, "diet");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_name_reports_placeholder() {
        let err = CatalogRecord::from_entry(
            1,
            entry(json!({"period": "Triassic", "diet": "Omnivore", "description": "?"})),
            None,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "record #1 (<unnamed>) is missing required field 'name'"
        );
    }

    #[test]
    fn serializes_fun_facts_in_camel_case() {
        let mut record = CatalogRecord::new("Troodon", "Late Cretaceous", "Omnivore", "Big brain");
        record.fun_facts = Some(vec!["Large eyes".to_string()]);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["funFacts"][0], "Large eyes");
        assert_eq!(value["image"]["kind"], "missing");
    }
}
