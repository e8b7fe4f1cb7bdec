//! Structured JSON output for scripting and piping.
//!
//! This module provides serializable data structures that represent the
//! complete output of a generation run. When the `--json` flag is passed,
//! these structures are serialized to stdout as a single JSON object,
//! replacing all human-readable output.

use std::path::Path;

use serde::Serialize;

use crate::manifest::{ProjectKind, ProjectManifest};

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// The execution mode: `"generate"` or `"build"`.
    pub mode: String,

    /// Information about the inspected project.
    pub project: JsonProjectInfo,

    /// Files written by this run, in write order.
    pub artifacts: Vec<JsonArtifact>,
}

/// Information about the inspected project.
#[derive(Serialize, Debug)]
pub struct JsonProjectInfo {
    /// Project name from the manifest, or `null`.
    pub name: Option<String>,

    /// Project classification (`"react"`, `"node"`, `"flutter"`).
    #[serde(rename = "type")]
    pub kind: ProjectKind,

    /// Path to the manifest file that drove the classification.
    pub manifest_path: String,
}

/// A single file written by the run.
#[derive(Serialize, Debug)]
pub struct JsonArtifact {
    /// Artifact kind (`"dockerfile"` or `"nginx_conf"`).
    pub kind: String,

    /// Path the artifact was written to.
    pub path: String,
}

impl JsonOutput {
    /// Build a `JsonOutput` for a run that wrote the given artifacts.
    #[must_use]
    pub fn new(mode: &str, project: &ProjectManifest, artifacts: Vec<JsonArtifact>) -> Self {
        Self {
            mode: mode.to_string(),
            project: JsonProjectInfo::from_manifest(project),
            artifacts,
        }
    }
}

impl JsonProjectInfo {
    /// Convert a discovered manifest into its JSON representation.
    #[must_use]
    pub fn from_manifest(project: &ProjectManifest) -> Self {
        Self {
            name: project.project_name().map(str::to_string),
            kind: project.kind(),
            manifest_path: project.path().display().to_string(),
        }
    }
}

impl JsonArtifact {
    /// Describe a written Dockerfile.
    #[must_use]
    pub fn dockerfile(path: &Path) -> Self {
        Self {
            kind: "dockerfile".to_string(),
            path: path.display().to_string(),
        }
    }

    /// Describe a written nginx configuration.
    #[must_use]
    pub fn nginx_conf(path: &Path) -> Self {
        Self {
            kind: "nginx_conf".to_string(),
            path: path.display().to_string(),
        }
    }
}
