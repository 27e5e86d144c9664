//! Session configuration: which catalog to load and where its assets live.
//!
//! Resolution order for the catalog is an explicit path (CLI flag or
//! `DINO_EXPLORER_CATALOG`), then `data/dinosaurs.json` under a discovered
//! repository root, then the catalog compiled into the binary. The asset root
//! defaults to the catalog file's directory.

use crate::catalog::Catalog;
use anyhow::{Context, Result, bail};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const ROOT_ENV: &str = "DINO_EXPLORER_ROOT";
const CATALOG_RELATIVE: &str = "data/dinosaurs.json";
const SCHEMA_RELATIVE: &str = "schema/catalog.schema.json";

#[derive(Clone, Debug, Eq, PartialEq)]
/// Where the session's catalog comes from.
pub enum CatalogSource {
    File(PathBuf),
    Builtin,
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// Resolved configuration for one session.
pub struct ExplorerConfig {
    pub catalog: CatalogSource,
    pub asset_root: Option<PathBuf>,
}

impl ExplorerConfig {
    /// Resolve from explicit overrides, falling back to repository discovery.
    pub fn resolve(catalog: Option<PathBuf>, asset_root: Option<PathBuf>) -> Result<Self> {
        let catalog = match catalog {
            Some(path) => {
                if !path.is_file() {
                    bail!("catalog file not found: {}", path.display());
                }
                CatalogSource::File(path)
            }
            None => match find_repo_root() {
                Some(root) => CatalogSource::File(root.join(CATALOG_RELATIVE)),
                None => CatalogSource::Builtin,
            },
        };
        if let Some(dir) = &asset_root {
            if !dir.is_dir() {
                bail!("asset directory not found: {}", dir.display());
            }
        }
        Ok(Self {
            catalog,
            asset_root,
        })
    }

    /// Asset root actually used: explicit, else next to the catalog file.
    pub fn effective_asset_root(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.asset_root {
            return Some(dir.clone());
        }
        match &self.catalog {
            CatalogSource::File(path) => path.parent().map(Path::to_path_buf),
            CatalogSource::Builtin => None,
        }
    }

    /// Load the configured catalog. Called once per session.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            CatalogSource::File(path) => {
                let assets = self.effective_asset_root();
                Catalog::load_with_assets(path, assets.as_deref())
                    .with_context(|| format!("loading catalog {}", path.display()))
            }
            CatalogSource::Builtin => match &self.asset_root {
                Some(dir) => Catalog::builtin_with_assets(Some(dir)),
                None => Catalog::builtin(),
            }
            .context("loading built-in catalog"),
        }
    }
}

/// Returns true when `candidate` looks like the repository root.
fn is_repo_root(candidate: &Path) -> bool {
    candidate.join(CATALOG_RELATIVE).is_file() && candidate.join(SCHEMA_RELATIVE).is_file()
}

fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate a repository checkout that carries the catalog data.
///
/// Honors `DINO_EXPLORER_ROOT`, then climbs up from the current executable,
/// then falls back to the build-time hint recorded by `build.rs`.
pub fn find_repo_root() -> Option<PathBuf> {
    if let Ok(env_root) = env::var(ROOT_ENV) {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Some(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(root) = exe_path.parent().and_then(search_upwards) {
            return Some(root);
        }
    }

    option_env!("DINO_EXPLORER_ROOT_HINT").and_then(repo_root_from_hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_catalog_must_exist() {
        let dir = TempDir::new().unwrap();
        let err = ExplorerConfig::resolve(Some(dir.path().join("missing.json")), None).unwrap_err();
        assert!(err.to_string().contains("catalog file not found"));
    }

    #[test]
    fn assets_default_to_catalog_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{"dinosaurs": []}"#).unwrap();
        let config = ExplorerConfig::resolve(Some(path.clone()), None).unwrap();
        assert_eq!(config.catalog, CatalogSource::File(path));
        assert_eq!(config.effective_asset_root().as_deref(), Some(dir.path()));
        assert!(config.load_catalog().unwrap().is_empty());
    }

    #[test]
    fn explicit_asset_root_wins() {
        let dir = TempDir::new().unwrap();
        let config = ExplorerConfig {
            catalog: CatalogSource::Builtin,
            asset_root: Some(dir.path().to_path_buf()),
        };
        assert_eq!(config.effective_asset_root().as_deref(), Some(dir.path()));
        assert_eq!(config.load_catalog().unwrap().len(), 6);
    }

    #[test]
    fn repo_root_detection_requires_data_and_schema() {
        let dir = TempDir::new().unwrap();
        assert!(!is_repo_root(dir.path()));
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::create_dir_all(dir.path().join("schema")).unwrap();
        fs::write(dir.path().join(CATALOG_RELATIVE), "{}").unwrap();
        assert!(!is_repo_root(dir.path()));
        fs::write(dir.path().join(SCHEMA_RELATIVE), "{}").unwrap();
        assert!(is_repo_root(dir.path()));
        assert!(repo_root_from_hint(&dir.path().display().to_string()).is_some());
    }
}
