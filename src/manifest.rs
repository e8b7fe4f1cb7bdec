//! Package manifest parsing and project classification.
//!
//! This module defines the data structures that represent a project's
//! dependency/script metadata file and the classification logic that decides
//! which Dockerfile template the project receives.
//!
//! A manifest is read once per invocation and never mutated. Classification
//! is a presence check: a project is considered front-end when either
//! `dependencies` or `devDependencies` contains a `react` key. The version
//! value is ignored, so `"react": ""` still classifies as front-end.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// File name of the Node.js package manifest.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// File name of the Flutter/Dart package manifest.
pub const FLUTTER_MANIFEST: &str = "pubspec.yaml";

/// Dependency key that marks a project as a front-end single-page app.
pub const FRONT_END_MARKER: &str = "react";

/// Entry file used when the manifest declares no `main` field.
pub const DEFAULT_ENTRY: &str = "index.js";

/// Deserialized view of a `package.json` file.
///
/// Only the fields the generator consumes are modeled; everything else in
/// the file is ignored. All fields are optional in the file, so missing
/// mappings deserialize to empty maps.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct PackageManifest {
    /// Project name (`name` field), if declared
    pub name: Option<String>,

    /// Entry file (`main` field), if declared
    pub main: Option<String>,

    /// Runtime dependencies (package name -> version requirement)
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    /// Development dependencies (package name -> version requirement)
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,

    /// npm scripts (script name -> shell command)
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Load and parse a `package.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    /// The caller is expected to have checked existence beforehand; a missing
    /// file surfaces here as a read error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Whether the project depends on a front-end framework.
    ///
    /// Checks `dependencies` and `devDependencies` for a `react` key.
    /// This is a strict key-presence check; the version value is ignored.
    #[must_use]
    pub fn is_front_end(&self) -> bool {
        self.dependencies.contains_key(FRONT_END_MARKER)
            || self.dev_dependencies.contains_key(FRONT_END_MARKER)
    }

    /// Whether the manifest declares a `start` script.
    #[must_use]
    pub fn has_start_script(&self) -> bool {
        self.scripts.contains_key("start")
    }
}

/// Enumeration of supported project kinds.
///
/// Derived once per invocation from the manifest contents and discarded
/// after the build files are generated.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    /// Front-end single-page application (React in the dependency maps)
    React,

    /// Generic Node.js server application
    Node,

    /// Flutter application (pubspec.yaml, no package.json)
    Flutter,
}

impl ProjectKind {
    /// Classify a Node.js project from its package manifest.
    #[must_use]
    pub fn classify(manifest: &PackageManifest) -> Self {
        if manifest.is_front_end() {
            Self::React
        } else {
            Self::Node
        }
    }
}

impl Display for ProjectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::React => "⚛️  React",
            Self::Node => "📦 Node.js",
            Self::Flutter => "🐦 Flutter",
        };
        write!(f, "{label}")
    }
}

/// A project manifest discovered in a target directory.
///
/// `package.json` takes priority when both manifests exist; `pubspec.yaml`
/// is only consulted when no `package.json` is present.
#[derive(Debug, Clone)]
pub enum ProjectManifest {
    /// A Node.js/React project with a parsed `package.json`
    Package {
        /// Path to the manifest file
        path: PathBuf,
        /// Parsed manifest contents
        manifest: PackageManifest,
    },

    /// A Flutter project identified by a `pubspec.yaml`
    Pubspec {
        /// Path to the manifest file
        path: PathBuf,
    },
}

impl ProjectManifest {
    /// Locate and parse the manifest in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the searched directory if neither
    /// `package.json` nor `pubspec.yaml` exists, or a parse error if
    /// `package.json` exists but is not valid JSON.
    pub fn discover(dir: &Path) -> Result<Self> {
        let package_path = dir.join(PACKAGE_MANIFEST);
        if package_path.exists() {
            let manifest = PackageManifest::load(&package_path)?;
            return Ok(Self::Package {
                path: package_path,
                manifest,
            });
        }

        let pubspec_path = dir.join(FLUTTER_MANIFEST);
        if pubspec_path.exists() {
            return Ok(Self::Pubspec { path: pubspec_path });
        }

        bail!(
            "{PACKAGE_MANIFEST} not found in: {} (and no {FLUTTER_MANIFEST} either)",
            dir.display()
        )
    }

    /// The classification for this manifest.
    #[must_use]
    pub fn kind(&self) -> ProjectKind {
        match self {
            Self::Package { manifest, .. } => ProjectKind::classify(manifest),
            Self::Pubspec { .. } => ProjectKind::Flutter,
        }
    }

    /// The project name, when the manifest declares one.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        match self {
            Self::Package { manifest, .. } => manifest.name.as_deref(),
            Self::Pubspec { .. } => None,
        }
    }

    /// Path to the discovered manifest file.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Package { path, .. } | Self::Pubspec { path } => path,
        }
    }
}

/// The ordered command used to launch the application inside the container.
///
/// Chosen once from the manifest and never mutated: `npm start` when the
/// manifest declares a `start` script, otherwise `node <main>` falling back
/// to `node index.js`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct StartDirective(Vec<String>);

impl StartDirective {
    /// Resolve the start directive from a package manifest.
    #[must_use]
    pub fn resolve(manifest: &PackageManifest) -> Self {
        if manifest.has_start_script() {
            Self(vec!["npm".to_string(), "start".to_string()])
        } else {
            let entry = manifest
                .main
                .clone()
                .unwrap_or_else(|| DEFAULT_ENTRY.to_string());
            Self(vec!["node".to_string(), entry])
        }
    }

    /// Serialize as a literal Docker exec-form array, e.g. `["npm","start"]`.
    ///
    /// Uses compact JSON serialization so the emitted `CMD` line matches the
    /// exec-form syntax Docker expects, including argument quoting.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails (practically unreachable
    /// for a vector of strings).
    pub fn to_exec_form(&self) -> Result<String> {
        serde_json::to_string(&self.0).context("Failed to serialize start directive")
    }

    /// The command elements in order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_from_json(json: &str) -> PackageManifest {
        serde_json::from_str(json).expect("test manifest should parse")
    }

    #[test]
    fn test_empty_manifest_defaults() {
        let manifest = manifest_from_json("{}");

        assert!(manifest.name.is_none());
        assert!(manifest.main.is_none());
        assert!(manifest.dependencies.is_empty());
        assert!(manifest.dev_dependencies.is_empty());
        assert!(manifest.scripts.is_empty());
    }

    #[test]
    fn test_front_end_via_dependencies() {
        let manifest = manifest_from_json(r#"{"dependencies": {"react": "^18.0.0"}}"#);
        assert!(manifest.is_front_end());
        assert_eq!(ProjectKind::classify(&manifest), ProjectKind::React);
    }

    #[test]
    fn test_front_end_via_dev_dependencies() {
        let manifest = manifest_from_json(r#"{"devDependencies": {"react": "^18.0.0"}}"#);
        assert!(manifest.is_front_end());
        assert_eq!(ProjectKind::classify(&manifest), ProjectKind::React);
    }

    #[test]
    fn test_front_end_key_presence_ignores_value() {
        // Strict presence check: an empty version string still counts.
        let manifest = manifest_from_json(r#"{"dependencies": {"react": ""}}"#);
        assert!(manifest.is_front_end());
    }

    #[test]
    fn test_not_front_end_without_react() {
        let manifest = manifest_from_json(r#"{"dependencies": {"express": "^4.18.0"}}"#);
        assert!(!manifest.is_front_end());
        assert_eq!(ProjectKind::classify(&manifest), ProjectKind::Node);
    }

    #[test]
    fn test_react_like_names_do_not_match() {
        let manifest =
            manifest_from_json(r#"{"dependencies": {"react-native": "0.73.0", "preact": "10.0.0"}}"#);
        assert!(!manifest.is_front_end());
    }

    #[test]
    fn test_start_directive_prefers_start_script() {
        let manifest = manifest_from_json(
            r#"{"main": "server.js", "scripts": {"start": "node server.js"}}"#,
        );
        let directive = StartDirective::resolve(&manifest);

        assert_eq!(directive.as_slice(), ["npm", "start"]);
    }

    #[test]
    fn test_start_directive_uses_main_field() {
        let manifest = manifest_from_json(r#"{"main": "app.js"}"#);
        let directive = StartDirective::resolve(&manifest);

        assert_eq!(directive.as_slice(), ["node", "app.js"]);
    }

    #[test]
    fn test_start_directive_default_entry() {
        let manifest = manifest_from_json("{}");
        let directive = StartDirective::resolve(&manifest);

        assert_eq!(directive.as_slice(), ["node", "index.js"]);
    }

    #[test]
    fn test_exec_form_is_compact() {
        let manifest = manifest_from_json(r#"{"scripts": {"start": "node server.js"}}"#);
        let directive = StartDirective::resolve(&manifest);

        assert_eq!(
            directive.to_exec_form().expect("serialization"),
            r#"["npm","start"]"#
        );
    }

    #[test]
    fn test_exec_form_quotes_arguments() {
        let manifest = manifest_from_json(r#"{"main": "dist/app.js"}"#);
        let directive = StartDirective::resolve(&manifest);

        assert_eq!(
            directive.to_exec_form().expect("serialization"),
            r#"["node","dist/app.js"]"#
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", ProjectKind::React), "⚛️  React");
        assert_eq!(format!("{}", ProjectKind::Node), "📦 Node.js");
        assert_eq!(format!("{}", ProjectKind::Flutter), "🐦 Flutter");
    }

    #[test]
    fn test_discover_missing_manifest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ProjectManifest::discover(dir.path()).expect_err("should fail");

        let message = err.to_string();
        assert!(message.contains("package.json not found"));
        assert!(message.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_discover_package_json_wins_over_pubspec() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("package.json"), "{}").expect("write");
        std::fs::write(dir.path().join("pubspec.yaml"), "name: app\n").expect("write");

        let found = ProjectManifest::discover(dir.path()).expect("discover");
        assert!(matches!(found, ProjectManifest::Package { .. }));
        assert_eq!(found.kind(), ProjectKind::Node);
    }

    #[test]
    fn test_discover_pubspec_fallback() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("pubspec.yaml"), "name: app\n").expect("write");

        let found = ProjectManifest::discover(dir.path()).expect("discover");
        assert!(matches!(found, ProjectManifest::Pubspec { .. }));
        assert_eq!(found.kind(), ProjectKind::Flutter);
    }

    #[test]
    fn test_discover_invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("package.json"), "{not json").expect("write");

        let err = ProjectManifest::discover(dir.path()).expect_err("should fail");
        assert!(err.to_string().contains("Failed to parse"));
    }
}
