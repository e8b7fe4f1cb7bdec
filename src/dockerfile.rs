//! Dockerfile templates and rendering.
//!
//! Two mutually exclusive templates cover Node.js projects: the front-end
//! template builds the app and serves the static output, the generic template
//! launches the app with its start directive. Flutter projects get a fixed
//! template of their own, and production React builds get a multi-stage
//! Dockerfile whose runtime stage is nginx.
//!
//! Rendered content is whitespace-trimmed and written to `Dockerfile` in the
//! target directory, unconditionally overwriting any existing file. The
//! write is the last step of every operation, so partial artifacts never
//! arise.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::manifest::{ProjectManifest, StartDirective};

/// Name of the generated container build file.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Port exposed by the generated Dockerfiles.
///
/// The same constant regardless of classification; both templates
/// interpolate it.
pub const DEFAULT_PORT: u16 = 3000;

/// Base image for the single-stage Node.js templates.
pub const NODE_BASE_IMAGE: &str = "node:18-alpine";

/// Base image for the Flutter template.
pub const FLUTTER_BASE_IMAGE: &str = "cirrusci/flutter:stable";

/// Node version tag for the production build stage.
pub const PRODUCTION_NODE_VERSION: &str = "16-alpine";

/// Directory the front-end build step emits (standard CRA output).
pub const BUILD_OUTPUT_DIR: &str = "build";

/// Render the front-end template.
///
/// Installs dependencies, runs the build step, and serves the static build
/// output with `npx serve`.
#[must_use]
pub fn render_front_end() -> String {
    format!(
        "
FROM {NODE_BASE_IMAGE}
WORKDIR /app
COPY package*.json ./
RUN npm install
COPY . .
EXPOSE {DEFAULT_PORT}
RUN npm run build
CMD [\"npx\", \"serve\", \"build\"]
"
    )
    .trim()
    .to_string()
}

/// Render the generic template with the given start directive.
///
/// # Errors
///
/// Returns an error if the start directive cannot be serialized to its
/// exec-form representation.
pub fn render_generic(start: &StartDirective) -> Result<String> {
    let cmd = start.to_exec_form()?;

    Ok(format!(
        "
FROM {NODE_BASE_IMAGE}
WORKDIR /app
COPY package*.json ./
RUN npm install
COPY . .
EXPOSE {DEFAULT_PORT}
CMD {cmd}
"
    )
    .trim()
    .to_string())
}

/// Render the fixed Flutter template.
#[must_use]
pub fn render_flutter() -> String {
    format!(
        "
FROM {FLUTTER_BASE_IMAGE}

WORKDIR /app
COPY . .

RUN flutter pub get

CMD [\"flutter\", \"run\"]
"
    )
    .trim()
    .to_string()
}

/// Render the template matching the discovered manifest.
///
/// Front-end projects get the build-and-serve template regardless of their
/// scripts; everything else gets the generic template with a start directive
/// resolved from the manifest.
///
/// # Errors
///
/// Returns an error if exec-form serialization fails.
pub fn render(project: &ProjectManifest) -> Result<String> {
    match project {
        ProjectManifest::Package { manifest, .. } => {
            if manifest.is_front_end() {
                Ok(render_front_end())
            } else {
                render_generic(&StartDirective::resolve(manifest))
            }
        }
        ProjectManifest::Pubspec { .. } => Ok(render_flutter()),
    }
}

/// Render the multi-stage production template for front-end projects.
///
/// The build stage compiles the app with `npm ci` + `npm run build`; the
/// runtime stage copies the build output into an nginx image that expects
/// the [`crate::nginx`] configuration alongside the Dockerfile.
#[must_use]
pub fn render_production(node_version: &str) -> String {
    format!(
        "# Build stage
FROM node:{node_version} AS build
WORKDIR /app
COPY package*.json ./
RUN npm ci
COPY . .
RUN npm run build

# Production stage
FROM nginx:alpine
COPY --from=build /app/{BUILD_OUTPUT_DIR} /usr/share/nginx/html
COPY nginx.conf /etc/nginx/conf.d/default.conf
EXPOSE 80
CMD [\"nginx\", \"-g\", \"daemon off;\"]
"
    )
}

/// Write rendered Dockerfile content into `dir`, overwriting any existing
/// `Dockerfile`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write(dir: &Path, content: &str) -> Result<PathBuf> {
    let path = dir.join(DOCKERFILE_NAME);

    fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::PackageManifest;

    fn manifest_from_json(json: &str) -> PackageManifest {
        serde_json::from_str(json).expect("test manifest should parse")
    }

    #[test]
    fn test_front_end_template_has_build_and_serve() {
        let rendered = render_front_end();

        assert!(rendered.starts_with("FROM node:18-alpine"));
        assert!(rendered.contains("RUN npm run build"));
        assert!(rendered.contains("CMD [\"npx\", \"serve\", \"build\"]"));
        assert!(rendered.contains("EXPOSE 3000"));
        assert!(!rendered.ends_with('\n'));
    }

    #[test]
    fn test_generic_template_uses_start_script() {
        let manifest =
            manifest_from_json(r#"{"scripts": {"start": "node server.js"}}"#);
        let rendered =
            render_generic(&StartDirective::resolve(&manifest)).expect("render");

        assert!(rendered.contains(r#"CMD ["npm","start"]"#));
        assert!(!rendered.contains("RUN npm run build"));
    }

    #[test]
    fn test_generic_template_default_entry() {
        let manifest = manifest_from_json("{}");
        let rendered =
            render_generic(&StartDirective::resolve(&manifest)).expect("render");

        assert!(rendered.contains(r#"CMD ["node","index.js"]"#));
    }

    #[test]
    fn test_generic_template_main_field() {
        let manifest = manifest_from_json(r#"{"main": "app.js"}"#);
        let rendered =
            render_generic(&StartDirective::resolve(&manifest)).expect("render");

        assert!(rendered.contains(r#"CMD ["node","app.js"]"#));
    }

    #[test]
    fn test_front_end_wins_over_start_script() {
        let manifest = manifest_from_json(
            r#"{"dependencies": {"react": "^18.0.0"}, "scripts": {"start": "react-scripts start"}}"#,
        );
        let project = ProjectManifest::Package {
            path: std::path::PathBuf::from("package.json"),
            manifest,
        };
        let rendered = render(&project).expect("render");

        assert!(rendered.contains("RUN npm run build"));
        assert!(rendered.contains("CMD [\"npx\", \"serve\", \"build\"]"));
    }

    #[test]
    fn test_flutter_template() {
        let rendered = render_flutter();

        assert!(rendered.starts_with("FROM cirrusci/flutter:stable"));
        assert!(rendered.contains("RUN flutter pub get"));
        assert!(rendered.contains("CMD [\"flutter\", \"run\"]"));
    }

    #[test]
    fn test_production_template_is_multi_stage() {
        let rendered = render_production(PRODUCTION_NODE_VERSION);

        assert!(rendered.contains("FROM node:16-alpine AS build"));
        assert!(rendered.contains("RUN npm ci"));
        assert!(rendered.contains("FROM nginx:alpine"));
        assert!(rendered.contains("COPY --from=build /app/build /usr/share/nginx/html"));
        assert!(rendered.contains("EXPOSE 80"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(DOCKERFILE_NAME), "old content").expect("seed");

        let path = write(dir.path(), "new content").expect("write");

        assert_eq!(path, dir.path().join(DOCKERFILE_NAME));
        let content = std::fs::read_to_string(&path).expect("read");
        assert_eq!(content, "new content");
    }

    #[test]
    fn test_render_is_deterministic() {
        let manifest = manifest_from_json(r#"{"main": "app.js"}"#);
        let project = ProjectManifest::Package {
            path: std::path::PathBuf::from("package.json"),
            manifest,
        };

        let first = render(&project).expect("render");
        let second = render(&project).expect("render");
        assert_eq!(first, second);
    }
}
