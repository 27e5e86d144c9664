//! Image reference resolution.
//!
//! Catalog entries carry either a remote URL or a local asset key. Keys are
//! resolved against an asset root once, at load time. A key that does not
//! resolve is kept as a sentinel so the record stays valid and the view layer
//! can show a fallback marker instead.

use serde::Serialize;
use std::path::{Path, PathBuf};

const REMOTE_PREFIXES: &[&str] = &["http://", "https://", "data:"];

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
/// Final displayable form of a record's image reference.
pub enum ImageSource {
    /// URL or inline data URI, passed through untouched.
    Remote(String),
    /// Local asset that exists under the asset root.
    Asset(PathBuf),
    /// Reference that could not be resolved; holds the original text.
    Unresolved(String),
    /// No reference in the catalog.
    Missing,
}

impl ImageSource {
    /// Whether the view layer has something it can actually display.
    pub fn is_displayable(&self) -> bool {
        matches!(self, ImageSource::Remote(_) | ImageSource::Asset(_))
    }
}

/// Resolve a raw `image` value against `asset_root`.
///
/// Never fails: anything that is neither remote nor an existing file becomes
/// `Unresolved`. Keys may not escape the asset root through `..` components.
pub fn resolve_image(raw: Option<&str>, asset_root: Option<&Path>) -> ImageSource {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return ImageSource::Missing;
    };

    if REMOTE_PREFIXES.iter().any(|prefix| {
        raw.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    }) {
        return ImageSource::Remote(raw.to_string());
    }

    let Some(root) = asset_root else {
        return ImageSource::Unresolved(raw.to_string());
    };

    let key = raw.strip_prefix("./").unwrap_or(raw);
    let candidate = root.join(key);
    match (candidate.canonicalize(), root.canonicalize()) {
        (Ok(resolved), Ok(root)) if resolved.starts_with(&root) && resolved.is_file() => {
            ImageSource::Asset(resolved)
        }
        _ => ImageSource::Unresolved(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn remote_references_pass_through() {
        let url = "https://images.example.org/trex.png?w=400";
        assert_eq!(
            resolve_image(Some(url), None),
            ImageSource::Remote(url.to_string())
        );
        assert!(matches!(
            resolve_image(Some("data:image/png;base64,AAAA"), None),
            ImageSource::Remote(_)
        ));
    }

    #[test]
    fn blank_or_absent_reference_is_missing() {
        assert_eq!(resolve_image(None, None), ImageSource::Missing);
        assert_eq!(resolve_image(Some("   "), None), ImageSource::Missing);
    }

    #[test]
    fn local_keys_resolve_under_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("images/raptor.png"), b"png").unwrap();

        let resolved = resolve_image(Some("./images/raptor.png"), Some(dir.path()));
        match resolved {
            ImageSource::Asset(path) => assert!(path.ends_with("images/raptor.png")),
            other => panic!("expected asset, got {other:?}"),
        }

        let missing = resolve_image(Some("images/none.png"), Some(dir.path()));
        assert_eq!(
            missing,
            ImageSource::Unresolved("images/none.png".to_string())
        );
        assert!(!missing.is_displayable());
    }

    #[test]
    fn keys_cannot_escape_asset_root() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("assets");
        fs::create_dir_all(&root).unwrap();
        fs::write(outer.path().join("secret.png"), b"png").unwrap();

        assert_eq!(
            resolve_image(Some("../secret.png"), Some(&root)),
            ImageSource::Unresolved("../secret.png".to_string())
        );
    }
}
