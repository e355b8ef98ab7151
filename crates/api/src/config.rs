use inkpress_core::review::{ReviewPolicy, DEFAULT_APPROVAL_THRESHOLD};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// Review aggregation policy (approval threshold).
    pub review: ReviewPolicy,
    /// Base URL of the external document renderer service.
    pub renderer_url: String,
    /// Render request timeout in seconds. Publishing holds the issue's
    /// row lock across the render, so a stalled renderer must fail
    /// instead of blocking.
    pub renderer_timeout_secs: u64,
    /// Directory where rendered magazine PDFs are written.
    pub pdf_output_dir: String,
    /// Public URL prefix under which stored PDFs are served.
    pub pdf_public_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                        |
    /// |-----------------------------|--------------------------------|
    /// | `HOST`                      | `0.0.0.0`                      |
    /// | `PORT`                      | `3000`                         |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                           |
    /// | `REVIEW_APPROVAL_THRESHOLD` | `3.0`                          |
    /// | `RENDERER_URL`              | `http://localhost:4100`        |
    /// | `RENDERER_TIMEOUT_SECS`     | `60`                           |
    /// | `PDF_OUTPUT_DIR`            | `./storage/magazines`          |
    /// | `PDF_PUBLIC_BASE_URL`       | `/static/magazines`            |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let approval_threshold: f64 = std::env::var("REVIEW_APPROVAL_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_APPROVAL_THRESHOLD.to_string())
            .parse()
            .expect("REVIEW_APPROVAL_THRESHOLD must be a valid f64");

        let renderer_url =
            std::env::var("RENDERER_URL").unwrap_or_else(|_| "http://localhost:4100".into());

        let renderer_timeout_secs: u64 = std::env::var("RENDERER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("RENDERER_TIMEOUT_SECS must be a valid u64");

        let pdf_output_dir =
            std::env::var("PDF_OUTPUT_DIR").unwrap_or_else(|_| "./storage/magazines".into());

        let pdf_public_base_url =
            std::env::var("PDF_PUBLIC_BASE_URL").unwrap_or_else(|_| "/static/magazines".into());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            review: ReviewPolicy { approval_threshold },
            renderer_url,
            renderer_timeout_secs,
            pdf_output_dir,
            pdf_public_base_url,
        }
    }
}
