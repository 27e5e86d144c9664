//! JSON Schema loading for catalog documents.
//!
//! The schema ships in `schema/catalog.schema.json` and is also compiled into
//! the crate so the built-in catalog validates without touching the disk.
//! Callers can point at an on-disk copy instead; either way the schema's
//! embedded `schema_version` is checked against the allowed set before the
//! validator is compiled.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const EMBEDDED_CATALOG_SCHEMA: &str = include_str!("../schema/catalog.schema.json");

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

/// Controls how schemas are checked before compilation.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Where to find the schema_version marker inside the schema payload.
    pub schema_version_pointer: &'a str,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

impl Default for SchemaLoadOptions<'_> {
    fn default() -> Self {
        Self {
            schema_version_pointer: "/schema_version",
            allowed_versions: None,
        }
    }
}

/// Read a schema from disk and compile it.
pub(crate) fn load_json_schema(
    path: &Path,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let file = File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
    let schema: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing schema {}", path.display()))?;
    compile_json_schema(&schema, options)
        .with_context(|| format!("compiling schema {}", path.display()))
}

/// Compile the schema bundled with the crate.
pub(crate) fn load_embedded_catalog_schema(
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let schema: Value =
        serde_json::from_str(EMBEDDED_CATALOG_SCHEMA).context("parsing embedded catalog schema")?;
    compile_json_schema(&schema, options).context("compiling embedded catalog schema")
}

fn compile_json_schema(schema: &Value, options: SchemaLoadOptions<'_>) -> Result<SchemaLoadResult> {
    let schema_version = extract_schema_version(schema, options.schema_version_pointer)
        .ok_or_else(|| anyhow!("schema missing schema_version marker"))?;

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    // The compile error borrows the schema, so flatten it to text here.
    let compiled = JSONSchema::compile(schema).map_err(|err| anyhow!("invalid schema: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn embedded_schema_compiles_with_expected_version() {
        let loaded = load_embedded_catalog_schema(SchemaLoadOptions::default())
            .expect("embedded schema compiles");
        assert_eq!(loaded.schema_version, "dino_catalog_v1");
        assert!(loaded.compiled.is_valid(&json!({"dinosaurs": []})));
        assert!(!loaded.compiled.is_valid(&json!({"records": []})));
    }

    #[test]
    fn rejects_schema_version_outside_allowed_set() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!({"schema_version": "dino_catalog_v9", "type": "object"})
        )
        .unwrap();
        let allowed = BTreeSet::from(["dino_catalog_v1".to_string()]);
        let err = load_json_schema(
            file.path(),
            SchemaLoadOptions {
                allowed_versions: Some(&allowed),
                ..Default::default()
            },
        )
        .err()
        .expect("unexpected version should fail");
        assert!(format!("{err:#}").contains("dino_catalog_v9"));
    }

    #[test]
    fn rejects_schema_without_version_marker() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", json!({"type": "object"})).unwrap();
        let err = load_json_schema(file.path(), SchemaLoadOptions::default())
            .err()
            .expect("missing marker should fail");
        assert!(format!("{err:#}").contains("schema_version"));
    }
}
