//! Error types for geonodectl.
//!
//! Wraps client errors and CLI-side failures, and attaches user-actionable
//! suggestions that are printed below the error message on exit.

use geonode_client::GeonodeError;
use thiserror::Error;

/// Main error type for the geonodectl binary.
#[derive(Error, Debug)]
pub enum GeonodectlError {
    #[error("missing environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    #[error("invalid GeoNode API URL '{url}': must end with 'api/v2/'")]
    InvalidApiUrl { url: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("file error for '{path}': {message}")]
    File { path: String, message: String },

    #[error(transparent)]
    Api(#[from] GeonodeError),

    #[error("output error: {message}")]
    Output { message: String },
}

/// Result type for geonodectl operations.
pub type Result<T> = std::result::Result<T, GeonodectlError>;

impl GeonodectlError {
    /// Helpful suggestions for resolving this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            GeonodectlError::MissingEnvVar { name } => vec![
                format!("export {name} before running geonodectl"),
                "GEONODE_API_URL: https://geonode.example.com/api/v2/".to_string(),
                "GEONODE_API_BASIC_AUTH: echo -n user:password | base64".to_string(),
            ],
            GeonodectlError::InvalidApiUrl { .. } => vec![
                "provide the full v2 REST API url, e.g. https://geonode.example.com/api/v2/"
                    .to_string(),
            ],
            GeonodectlError::Api(err) if err.is_connection() => vec![
                "check that the GeoNode instance is up and reachable".to_string(),
                "check the GEONODE_API_URL environment variable".to_string(),
                "for self-signed certificates, try --not-verify-ssl".to_string(),
            ],
            GeonodectlError::Api(err) if err.is_unauthorized() => vec![
                "check the GEONODE_API_BASIC_AUTH environment variable".to_string(),
                "regenerate the token: echo -n user:password | base64".to_string(),
            ],
            GeonodectlError::Api(err) if err.is_not_found() => vec![
                "verify the pk is correct; list the resources to find it".to_string(),
            ],
            GeonodectlError::InvalidInput { .. } => vec![
                "check the command syntax: geonodectl <command> --help".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Renders the error with its suggestions for printing to stderr.
    pub fn display_with_suggestions(&self) -> String {
        let mut out = format!("error: {self}");
        for suggestion in self.suggestions() {
            out.push_str("\n  tip: ");
            out.push_str(&suggestion);
        }
        out
    }
}

impl From<serde_json::Error> for GeonodectlError {
    fn from(err: serde_json::Error) -> Self {
        GeonodectlError::Output {
            message: format!("JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for GeonodectlError {
    fn from(err: std::io::Error) -> Self {
        GeonodectlError::Output {
            message: format!("IO error: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_var_suggests_the_export() {
        let err = GeonodectlError::MissingEnvVar {
            name: "GEONODE_API_URL",
        };
        let rendered = err.display_with_suggestions();
        assert!(rendered.contains("GEONODE_API_URL"));
        assert!(rendered.contains("tip:"));
    }

    #[test]
    fn connection_errors_suggest_checking_the_url() {
        let err = GeonodectlError::Api(GeonodeError::Connection {
            url: "https://geonode.example.com/api/v2/".to_string(),
            message: "refused".to_string(),
        });
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("GEONODE_API_URL"))
        );
    }
}
