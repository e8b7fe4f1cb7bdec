//! Configuration types for the vessel CLI.
//!
//! This module contains the resolved option structs handed from the CLI
//! layer to the operations, plus the persistent configuration file support.
//! Values are layered: CLI argument > config file > hardcoded default.

pub mod file;

use std::path::PathBuf;

pub use file::FileConfig;

/// Default output directory for production build files.
pub const DEFAULT_BUILD_OUTPUT: &str = "./vessel-output";

/// Resolved options for the `build` command.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Directory the production build files are written to
    pub output: PathBuf,

    /// Node version tag for the production build stage (e.g. `16-alpine`)
    pub node_version: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_BUILD_OUTPUT),
            node_version: crate::dockerfile::PRODUCTION_NODE_VERSION.to_string(),
        }
    }
}
