//! Connection settings and client construction.
//!
//! Settings come from the environment (or a KEY=VALUE env file) and are
//! immutable for the lifetime of the process.

use std::path::Path;

use geonode_client::GeonodeClient;
use tracing::{debug, info};

use crate::error::{GeonodectlError, Result};

pub const URL_ENV_VAR: &str = "GEONODE_API_URL";
pub const BASIC_AUTH_ENV_VAR: &str = "GEONODE_API_BASIC_AUTH";
pub const VERIFY_ENV_VAR: &str = "GEONODE_API_VERIFY";

/// User agent string for geonodectl HTTP requests
const GEONODECTL_USER_AGENT: &str = concat!("geonodectl/", env!("CARGO_PKG_VERSION"));

/// Connection settings for one GeoNode instance.
#[derive(Debug, Clone)]
pub struct GeonodeApiConf {
    pub url: String,
    pub auth_basic: String,
    pub verify: bool,
}

fn parse_verify(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1")
}

fn check_url(url: &str) -> Result<()> {
    if url.ends_with("api/v2/") {
        Ok(())
    } else {
        Err(GeonodectlError::InvalidApiUrl {
            url: url.to_string(),
        })
    }
}

impl GeonodeApiConf {
    /// Builds the settings from `GEONODE_API_URL`, `GEONODE_API_BASIC_AUTH`
    /// and optional `GEONODE_API_VERIFY`.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(URL_ENV_VAR)
            .map_err(|_| GeonodectlError::MissingEnvVar { name: URL_ENV_VAR })?;
        let auth_basic = std::env::var(BASIC_AUTH_ENV_VAR).map_err(|_| {
            GeonodectlError::MissingEnvVar {
                name: BASIC_AUTH_ENV_VAR,
            }
        })?;
        check_url(&url)?;
        let verify = std::env::var(VERIFY_ENV_VAR)
            .map(|v| parse_verify(&v))
            .unwrap_or(true);
        debug!(%url, verify, "connection settings from environment");
        Ok(Self {
            url,
            auth_basic,
            verify,
        })
    }

    /// Builds the settings from a `KEY=VALUE` file using the same variable
    /// names as the environment. Lines starting with `#` are skipped.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GeonodectlError::File {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut url = None;
        let mut auth_basic = None;
        let mut verify = true;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();
            match key.trim() {
                URL_ENV_VAR => url = Some(value),
                BASIC_AUTH_ENV_VAR => auth_basic = Some(value),
                VERIFY_ENV_VAR => verify = parse_verify(&value),
                _ => {}
            }
        }

        let url = url.ok_or(GeonodectlError::MissingEnvVar { name: URL_ENV_VAR })?;
        let auth_basic = auth_basic.ok_or(GeonodectlError::MissingEnvVar {
            name: BASIC_AUTH_ENV_VAR,
        })?;
        check_url(&url)?;
        debug!(%url, verify, file = %path.display(), "connection settings from env file");
        Ok(Self {
            url,
            auth_basic,
            verify,
        })
    }
}

/// Creates the API client. `not_verify_ssl` (the CLI flag) wins over the
/// configured verify setting.
pub fn create_client(conf: &GeonodeApiConf, not_verify_ssl: bool) -> Result<GeonodeClient> {
    let insecure = not_verify_ssl || !conf.verify;
    if insecure {
        info!("TLS certificate verification disabled");
    }
    let client = GeonodeClient::builder()
        .base_url(&conf.url)
        .auth_basic(&conf.auth_basic)
        .insecure(insecure)
        .user_agent(GEONODECTL_USER_AGENT)
        .build()?;
    debug!(url = %conf.url, "client created");
    Ok(client)
}
