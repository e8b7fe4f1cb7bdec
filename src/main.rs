//! # vessel
//!
//! A CLI tool that inspects a project's package manifest and generates
//! container build files tailored to the project's kind.
//!
//! Projects with `react` in their dependency maps get a build-and-serve
//! Dockerfile; other Node.js projects get a generic Dockerfile launching
//! their start directive; Flutter projects (pubspec.yaml) get a fixed
//! Flutter Dockerfile. The `build` subcommand additionally produces a
//! multi-stage production Dockerfile and an nginx configuration for
//! front-end projects.
//!
//! ## Usage
//!
//! ```bash
//! # Write <dir>/Dockerfile from <dir>/package.json
//! vessel path/to/project
//!
//! # Production build files into ./vessel-output
//! vessel build path/to/project
//!
//! # Check the local Docker environment
//! vessel doctor
//! ```

mod cli;

use std::{fs, path::Path, process::exit};

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use vessel::{
    config::{BuildOptions, FileConfig},
    dockerfile, doctor,
    manifest::{ProjectManifest, StartDirective},
    nginx,
    output::{JsonArtifact, JsonOutput},
    progress,
};

/// Entry point for the vessel application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and
/// printing any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Dispatches to the subcommand handlers, or runs the core Dockerfile
/// generation when no subcommand is given.
///
/// # Errors
///
/// Returns errors from manifest discovery and parsing, template rendering,
/// file-system operations, or JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    if matches!(args.subcommand, Some(Commands::Doctor)) {
        return run_doctor();
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);

    match args.subcommand {
        Some(Commands::Build {
            dir,
            output,
            node_version,
        }) => {
            let dir = cli::resolve_dir(dir.as_ref(), &file_config);
            let options = cli::build_options(output, node_version, &file_config);
            run_build(&dir, &options, json_mode)
        }
        _ => {
            let dir = args.directory(&file_config);
            run_generate(&dir, json_mode)
        }
    }
}

// ── Core generation ─────────────────────────────────────────────────────

/// Generate `<dir>/Dockerfile` from the manifest found in `dir`.
///
/// The single linear pipeline: discover manifest, classify, render the
/// matching template, write. The write is the last step, so a failure never
/// leaves a partial artifact behind.
fn run_generate(dir: &Path, json_mode: bool) -> Result<()> {
    let project = ProjectManifest::discover(dir)?;
    let content = dockerfile::render(&project)?;
    let path = dockerfile::write(dir, &content)?;

    if json_mode {
        let output = JsonOutput::new("generate", &project, vec![JsonArtifact::dockerfile(&path)]);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Detected project type: {}", project.kind());
        println!(
            "{} {}",
            "✅ Dockerfile generated at".green(),
            path.display()
        );
    }

    Ok(())
}

// ── Production build ────────────────────────────────────────────────────

/// Generate production build files into the output directory.
///
/// Front-end projects get a multi-stage Dockerfile plus an nginx
/// configuration; generic Node.js projects get the single-stage Dockerfile.
/// The scripted step display is presentation only and runs before any file
/// is written.
fn run_build(dir: &Path, options: &BuildOptions, json_mode: bool) -> Result<()> {
    let project = ProjectManifest::discover(dir)?;

    let ProjectManifest::Package { manifest, .. } = &project else {
        bail!(
            "vessel build requires a Node.js project with a package.json in: {}",
            dir.display()
        );
    };

    if !json_mode {
        println!(
            "{}",
            format!("🚢 Starting vessel build for: {}", dir.display()).blue()
        );
        println!("Detected project type: {}", project.kind());
    }

    fs::create_dir_all(&options.output).with_context(|| {
        format!(
            "Failed to create output directory {}",
            options.output.display()
        )
    })?;

    progress::play(progress::BUILD_STEPS, json_mode);

    let mut artifacts = Vec::new();

    if manifest.is_front_end() {
        let content = dockerfile::render_production(&options.node_version);
        let dockerfile_path = dockerfile::write(&options.output, &content)?;
        artifacts.push(JsonArtifact::dockerfile(&dockerfile_path));

        let nginx_path = nginx::write(&options.output)?;
        artifacts.push(JsonArtifact::nginx_conf(&nginx_path));
    } else {
        let content = dockerfile::render_generic(&StartDirective::resolve(manifest))?;
        let dockerfile_path = dockerfile::write(&options.output, &content)?;
        artifacts.push(JsonArtifact::dockerfile(&dockerfile_path));
    }

    if json_mode {
        let output = JsonOutput::new("build", &project, artifacts);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} {}",
            "✅ Build complete! Files generated in".green(),
            options.output.display()
        );
        for artifact in &artifacts {
            println!("   {}", artifact.path);
        }
    }

    Ok(())
}

// ── Doctor ──────────────────────────────────────────────────────────────

/// Report whether Docker is installed and the daemon is reachable.
///
/// Read-only checks; nothing on the host is modified.
fn run_doctor() -> Result<()> {
    let status = doctor::diagnose();

    if status.installed {
        println!("{}", "✅ Docker CLI installed".green());
    } else {
        println!("{}", "❌ Docker CLI not found".red());
    }

    if status.running {
        println!("{}", "✅ Docker daemon is running".green());
    } else if status.installed {
        println!("{}", "❌ Docker daemon is not reachable".red());
    }

    if status.wsl2 {
        println!("{}", "ℹ️  WSL2 environment detected".cyan());
    }

    if status.available() {
        println!("{}", "✅ Docker is ready for deployment".green());
        Ok(())
    } else {
        bail!("Docker is not available; install it or start the daemon before deploying")
    }
}

// ── Config subcommand ───────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# vessel configuration
# All values shown are their defaults. Uncomment and change as needed.

# Default directory to inspect (defaults to the current directory when not set)
# dir = "."

[build]
# Output directory for generated production build files
# output = "./vessel-output"

# Node version tag for the production build stage
# node_version = "16-alpine"
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_path(val: Option<&std::path::Path>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |p| format!("\"{}\"", p.display()),
        )
    }
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }

    format!(
        "\
dir          = {dir}

[build]
output       = {output}
node_version = {node_version}",
        dir = show_path(config.dir.as_deref(), "."),
        output = show_path(config.build.output.as_deref(), "./vessel-output"),
        node_version = show_str(config.build.node_version.as_deref(), "16-alpine"),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}
