//! nginx configuration for serving single-page applications.
//!
//! The production React Dockerfile copies this configuration into the nginx
//! runtime stage. The content is fixed: gzip compression, SPA fallback
//! routing via `try_files`, long-lived caching for static assets, and a
//! small set of security headers.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

/// Name of the generated nginx configuration file.
pub const NGINX_CONF_NAME: &str = "nginx.conf";

/// Fixed server block for single-page React apps.
pub const NGINX_CONF: &str = r#"server {
    listen 80;
    root /usr/share/nginx/html;
    index index.html;

    # Enable gzip compression
    gzip on;
    gzip_comp_level 5;
    gzip_min_length 256;
    gzip_proxied any;
    gzip_vary on;
    gzip_types
        application/javascript
        application/json
        application/x-javascript
        text/css
        text/javascript
        text/plain;

    location / {
        try_files $uri $uri/ /index.html;
    }

    # Cache static assets
    location ~* \.(jpg|jpeg|png|gif|ico|css|js)$ {
        expires 30d;
        add_header Cache-Control "public, no-transform";
    }

    # Security headers
    add_header X-Content-Type-Options nosniff;
    add_header X-Frame-Options DENY;
    add_header X-XSS-Protection "1; mode=block";
}
"#;

/// Write the nginx configuration into `dir`, overwriting any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(NGINX_CONF_NAME);

    fs::write(&path, NGINX_CONF)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
