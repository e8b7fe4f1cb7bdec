//! Core library for the `vessel` CLI tool.
//!
//! This crate inspects a project's package manifest (`package.json`, or
//! `pubspec.yaml` for Flutter projects), classifies the project, and renders
//! container build files: a `Dockerfile` and, for production React builds,
//! an `nginx.conf`.
//!
//! ## Main Parts
//!
//! - [`manifest`] - Manifest parsing, project classification, start directives
//! - [`dockerfile`] - Dockerfile templates and rendering
//! - [`nginx`] - nginx configuration for single-page applications
//! - [`doctor`] - Read-only Docker environment diagnostics
//! - [`progress`] - Scripted build-step display (presentation only)
//! - [`config`] - Layered configuration (CLI > config file > defaults)
//! - [`output`] - Structured JSON output for scripting

pub mod config;
pub mod dockerfile;
pub mod doctor;
pub mod manifest;
pub mod nginx;
pub mod output;
pub mod progress;

pub use config::BuildOptions;
pub use manifest::{PackageManifest, ProjectKind, ProjectManifest, StartDirective};
