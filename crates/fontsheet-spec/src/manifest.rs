//! Build manifests: a list of font/size builds sharing one output directory.
//!
//! ```json
//! {
//!   "outputDir": "build",
//!   "clean": true,
//!   "builds": [
//!     { "name": "quan", "fontFile": "assets/fonts/quan.ttf", "fontSize": 8, "offsetOptimize": false },
//!     { "name": "roboto", "fontFile": "assets/fonts/Roboto-Regular.ttf", "fontSize": 24, "binarize": true }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::{BuildOptions, OptionsError};

/// Errors from loading or validating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manifest declares no builds")]
    NoBuilds,

    #[error("build name '{0}' must be non-empty and must not contain path separators")]
    InvalidName(String),

    #[error("duplicate build name '{0}'")]
    DuplicateName(String),

    #[error("build '{name}': unknown field '{field}'")]
    UnknownField { name: String, field: String },

    #[error("build '{name}': {source}")]
    InvalidOptions {
        name: String,
        #[source]
        source: OptionsError,
    },
}

/// Top-level manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildManifest {
    /// Directory every build writes its artifacts into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Remove `output_dir` before building.
    #[serde(default)]
    pub clean: bool,

    /// Builds, run independently of each other.
    pub builds: Vec<BuildTarget>,
}

/// One font/size build inside a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildTarget {
    /// Base name of the `.png`, `.json` and `.fnt` artifacts.
    pub name: String,

    /// Path to the font file.
    pub font_file: PathBuf,

    /// Face index inside a font collection.
    #[serde(default)]
    pub font_index: u32,

    #[serde(flatten)]
    pub options: BuildOptions,

    /// Keys no other field claimed. Any entry fails validation.
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    unknown: BTreeMap<String, serde_json::Value>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

impl BuildManifest {
    /// Parses and validates a manifest.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: BuildManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Checks names and options of every build.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.builds.is_empty() {
            return Err(ManifestError::NoBuilds);
        }
        let mut seen = HashSet::new();
        for target in &self.builds {
            if !is_valid_name(&target.name) {
                return Err(ManifestError::InvalidName(target.name.clone()));
            }
            if !seen.insert(target.name.as_str()) {
                return Err(ManifestError::DuplicateName(target.name.clone()));
            }
            if let Some(field) = target.unknown.keys().next() {
                return Err(ManifestError::UnknownField {
                    name: target.name.clone(),
                    field: field.clone(),
                });
            }
            target
                .options
                .validate()
                .map_err(|source| ManifestError::InvalidOptions {
                    name: target.name.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Rewrites relative paths so they are relative to `base_dir` (usually
    /// the directory containing the manifest file).
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        self.output_dir = resolve(base_dir, &self.output_dir);
        for target in &mut self.builds {
            target.font_file = resolve(base_dir, &target.font_file);
        }
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// True when `name` can be used as an artifact base name: non-empty, not
/// `.` or `..`, and free of path separators.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r#"{
        "outputDir": "build",
        "clean": true,
        "builds": [
            { "name": "quan", "fontFile": "fonts/quan.ttf", "fontSize": 8,
              "offsetOptimize": false, "safe1pxEdge": false },
            { "name": "roboto", "fontFile": "/abs/Roboto-Regular.ttf", "fontSize": 24,
              "prettyJson": true, "binarize": true }
        ]
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = BuildManifest::from_json(MANIFEST).unwrap();
        assert!(manifest.clean);
        assert_eq!(manifest.builds.len(), 2);

        let quan = &manifest.builds[0];
        assert_eq!(quan.name, "quan");
        assert_eq!(quan.font_index, 0);
        assert_eq!(
            quan.options,
            BuildOptions::new(8)
                .with_offset_optimize(false)
                .with_safe_edge(false)
        );

        let roboto = &manifest.builds[1];
        assert_eq!(
            roboto.options,
            BuildOptions::new(24).with_pretty_json(true).with_binarize(true)
        );
    }

    #[test]
    fn test_defaults() {
        let manifest = BuildManifest::from_json(
            r#"{"builds":[{"name":"a","fontFile":"a.ttf","fontSize":12}]}"#,
        )
        .unwrap();
        assert_eq!(manifest.output_dir, PathBuf::from("build"));
        assert!(!manifest.clean);
    }

    #[test]
    fn test_resolve_paths() {
        let mut manifest = BuildManifest::from_json(MANIFEST).unwrap();
        manifest.resolve_paths(Path::new("/project"));
        assert_eq!(manifest.output_dir, PathBuf::from("/project/build"));
        assert_eq!(
            manifest.builds[0].font_file,
            PathBuf::from("/project/fonts/quan.ttf")
        );
        assert_eq!(
            manifest.builds[1].font_file,
            PathBuf::from("/abs/Roboto-Regular.ttf")
        );
    }

    #[test]
    fn test_rejects_unknown_top_level_field() {
        let result = BuildManifest::from_json(r#"{"builds":[],"extra":1}"#);
        assert!(matches!(result, Err(ManifestError::Json(_))));
    }

    #[test]
    fn test_rejects_unknown_build_field() {
        let result = BuildManifest::from_json(
            r#"{"builds":[{"name":"a","fontFile":"a.ttf","fontSize":12,
                "safe1pxedge":false,"sheetMaxWidht":64}]}"#,
        );
        match result {
            Err(ManifestError::UnknownField { name, field }) => {
                assert_eq!(name, "a");
                assert_eq!(field, "safe1pxedge");
            }
            other => panic!("expected unknown field error, got {other:?}"),
        }
    }

    #[test]
    fn test_known_build_fields_are_not_unknown() {
        let manifest = BuildManifest::from_json(MANIFEST).unwrap();
        assert!(manifest.builds.iter().all(|target| target.unknown.is_empty()));

        let json = serde_json::to_string(&manifest).unwrap();
        assert_eq!(BuildManifest::from_json(&json).unwrap(), manifest);
    }

    #[test]
    fn test_rejects_empty_builds() {
        let result = BuildManifest::from_json(r#"{"builds":[]}"#);
        assert!(matches!(result, Err(ManifestError::NoBuilds)));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = BuildManifest::from_json(
            r#"{"builds":[
                {"name":"a","fontFile":"a.ttf","fontSize":12},
                {"name":"a","fontFile":"b.ttf","fontSize":16}
            ]}"#,
        );
        assert!(matches!(result, Err(ManifestError::DuplicateName(name)) if name == "a"));
    }

    #[test]
    fn test_rejects_path_like_names() {
        for name in ["", "..", "sub/dir", "sub\\dir"] {
            let json = format!(
                r#"{{"builds":[{{"name":{},"fontFile":"a.ttf","fontSize":12}}]}}"#,
                serde_json::to_string(name).unwrap()
            );
            assert!(
                matches!(BuildManifest::from_json(&json), Err(ManifestError::InvalidName(_))),
                "expected '{name}' to be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_invalid_options() {
        let result = BuildManifest::from_json(
            r#"{"builds":[{"name":"a","fontFile":"a.ttf","fontSize":0}]}"#,
        );
        assert!(matches!(
            result,
            Err(ManifestError::InvalidOptions {
                source: OptionsError::ZeroFontSize,
                ..
            })
        ));
    }
}
