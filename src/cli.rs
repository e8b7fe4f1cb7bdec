//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library. It provides structured access
//! to user input and handles argument conflicts and defaults.
//!
//! Helper functions accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vessel::config::{BuildOptions, DEFAULT_BUILD_OUTPUT, FileConfig, file::expand_tilde};
use vessel::dockerfile::PRODUCTION_NODE_VERSION;

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate production build files (multi-stage Dockerfile + nginx.conf)
    Build {
        /// Directory containing the project to productionize
        ///
        /// Must contain a `package.json`. Defaults to the current directory
        /// (or the config-file `dir`) if not specified.
        dir: Option<PathBuf>,

        /// Output directory for generated files
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Node version tag for the production build stage (e.g. 16-alpine)
        #[arg(long)]
        node_version: Option<String>,
    },

    /// Check whether Docker is installed and the daemon is reachable
    Doctor,

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Without a subcommand, vessel inspects the target directory's package
/// manifest and writes a `Dockerfile` next to it. Subcommands cover
/// production build-file generation (`build`), environment diagnosis
/// (`doctor`), and configuration management (`config`).
#[derive(Parser)]
#[command(name = "vessel")]
#[command(
    about = "Generate Dockerfiles and nginx configuration from a project's package manifest (React, Node.js, Flutter)"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `build`, `doctor`, `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directory containing the project manifest
    ///
    /// The directory whose `package.json` (or `pubspec.yaml`) is inspected
    /// and where the `Dockerfile` is written. Defaults to the current
    /// directory if not specified.
    pub dir: Option<PathBuf>,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, all human-readable output (colors, progress display,
    /// emojis) is suppressed and a single JSON document is printed to stdout.
    #[arg(long, global = true)]
    pub json: bool,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Resolve the target directory from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `dir` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn directory(&self, config: &FileConfig) -> PathBuf {
        resolve_dir(self.dir.as_ref(), config)
    }
}

/// Resolve a target directory from an optional CLI path and the config file.
///
/// Priority: CLI argument > config file `dir` > current directory (`.`).
#[must_use]
pub fn resolve_dir(dir: Option<&PathBuf>, config: &FileConfig) -> PathBuf {
    if let Some(dir) = dir {
        return dir.clone();
    }

    if let Some(ref dir) = config.dir {
        return expand_tilde(dir);
    }

    PathBuf::from(".")
}

/// Resolve `build` options from CLI args and the config file.
///
/// Priority per field: CLI argument > config file > hardcoded default.
#[must_use]
pub fn build_options(
    output: Option<PathBuf>,
    node_version: Option<String>,
    config: &FileConfig,
) -> BuildOptions {
    BuildOptions {
        output: output
            .or_else(|| config.build.output.as_ref().map(|p| expand_tilde(p)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_OUTPUT)),
        node_version: node_version
            .or_else(|| config.build.node_version.clone())
            .unwrap_or_else(|| PRODUCTION_NODE_VERSION.to_string()),
    }
}
