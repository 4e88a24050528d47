//! HTTP client for the GeoNode v2 REST API.
//!
//! Wraps a single `reqwest::Client` configured with Basic authentication
//! and an optional TLS-verification toggle. All methods exchange
//! `serde_json::Value` bodies verbatim; envelope unwrapping happens one
//! layer up in [`crate::resource`].

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH};
use serde_json::{Value, json};
use tracing::{debug, trace};
use url::Url;

use crate::error::{GeonodeError, Result};
use crate::params::ListParams;

/// One file part of a multipart upload. Bytes are read into memory up
/// front so no file handle outlives the request, whatever the exit path.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name, e.g. `base_file` or `doc_file`.
    pub name: &'static str,
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Content type for the part; omitted when unknown.
    pub content_type: Option<String>,
}

/// Client for a single GeoNode instance.
#[derive(Debug, Clone)]
pub struct GeonodeClient {
    http: reqwest::Client,
    base_url: Url,
    auth_header: String,
}

/// Builder for [`GeonodeClient`].
#[derive(Debug, Default)]
pub struct GeonodeClientBuilder {
    base_url: Option<String>,
    auth_basic: Option<String>,
    verify: bool,
    user_agent: Option<String>,
}

impl GeonodeClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            verify: true,
            ..Self::default()
        }
    }

    /// Full URL of the v2 API root, e.g. `https://geonode.example.com/api/v2/`.
    /// Must end in `api/v2/`.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Pre-encoded Basic auth token (the output of
    /// `echo -n user:password | base64`).
    #[must_use]
    pub fn auth_basic(mut self, token: impl Into<String>) -> Self {
        self.auth_basic = Some(token.into());
        self
    }

    /// Convenience: encode a username/password pair into the Basic token.
    #[must_use]
    pub fn credentials(mut self, username: &str, password: &str) -> Self {
        self.auth_basic = Some(BASE64.encode(format!("{username}:{password}")));
        self
    }

    /// Disable TLS certificate verification (self-signed endpoints).
    #[must_use]
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.verify = !insecure;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<GeonodeClient> {
        let url = self
            .base_url
            .ok_or_else(|| GeonodeError::InvalidInput("base URL is required".to_string()))?;
        if !url.ends_with("api/v2/") {
            return Err(GeonodeError::InvalidInput(format!(
                "GeoNode URL '{url}' does not end with 'api/v2/'; \
                 provide the full v2 API url"
            )));
        }
        let base_url = Url::parse(&url)
            .map_err(|e| GeonodeError::InvalidInput(format!("invalid base URL '{url}': {e}")))?;
        let auth_basic = self.auth_basic.ok_or_else(|| {
            GeonodeError::InvalidInput("Basic auth token is required".to_string())
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if !self.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build()?;

        Ok(GeonodeClient {
            http,
            base_url,
            auth_header: format!("Basic {auth_basic}"),
        })
    }
}

impl GeonodeClient {
    #[must_use]
    pub fn builder() -> GeonodeClientBuilder {
        GeonodeClientBuilder::new()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The GeoNode site root, i.e. the base URL with the `api/v2/` suffix
    /// stripped. Used to fetch static assets like the MapStore template.
    #[must_use]
    pub fn site_url(&self) -> String {
        let base = self.base_url.as_str();
        base.trim_end_matches("api/v2/").trim_end_matches('/').to_string()
    }

    fn endpoint_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| GeonodeError::InvalidInput(format!("invalid endpoint path '{path}': {e}")))
    }

    fn connection_error(&self, err: reqwest::Error) -> GeonodeError {
        if err.is_connect() || err.is_timeout() {
            GeonodeError::Connection {
                url: self.base_url.to_string(),
                message: err.to_string(),
            }
        } else {
            GeonodeError::Request(err)
        }
    }

    /// Maps the response status onto the error taxonomy and decodes the
    /// body. HTTP 204 is success with an empty body, not a decode error.
    async fn decode(&self, path: &str, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        trace!(%status, path, "response received");
        if status == StatusCode::NO_CONTENT {
            return Ok(json!({}));
        }
        if status.is_success() {
            return Ok(response.json().await?);
        }
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GeonodeError::Unauthorized),
            StatusCode::NOT_FOUND => Err(GeonodeError::NotFound {
                path: path.to_string(),
            }),
            _ => Err(GeonodeError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// GET an endpoint relative to the API root.
    pub async fn get(&self, path: &str, params: &ListParams) -> Result<Value> {
        let url = self.endpoint_url(path)?;
        debug!(%url, ?params, "GET");
        let mut request = self.http.get(url).header(AUTHORIZATION, &self.auth_header);
        if !params.is_empty() {
            request = request.query(&params.to_query());
        }
        let response = request.send().await.map_err(|e| self.connection_error(e))?;
        self.decode(path, response).await
    }

    /// GET with raw query pairs, for endpoints outside the list-parameter
    /// convention (e.g. `tkeywordlabels?keyword=7`).
    pub async fn get_with_query(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.endpoint_url(path)?;
        debug!(%url, ?query, "GET");
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, &self.auth_header)
            .query(query)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        self.decode(path, response).await
    }

    /// GET an absolute URL (metadata documents, static map templates) and
    /// return the raw response for the caller to consume.
    pub async fn download(&self, url: &str) -> Result<reqwest::Response> {
        debug!(url, "GET (download)");
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeonodeError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response)
    }

    /// POST a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.endpoint_url(path)?;
        debug!(%url, "POST");
        trace!(body = %body, "POST body");
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, &self.auth_header)
            .json(body)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        self.decode(path, response).await
    }

    /// POST a multipart form with plain fields and file parts.
    ///
    /// `content_length` is the summed size of the file parts; some
    /// upload-size-sensitive servers want it announced explicitly.
    pub async fn post_multipart(
        &self,
        path: &str,
        fields: &[(&'static str, String)],
        files: Vec<FilePart>,
        content_length: Option<u64>,
    ) -> Result<Value> {
        let url = self.endpoint_url(path)?;
        debug!(%url, parts = files.len(), "POST (multipart)");

        let mut form = reqwest::multipart::Form::new();
        for (name, value) in fields {
            form = form.text(*name, value.clone());
        }
        for file in files {
            let mut part =
                reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name.clone());
            if let Some(content_type) = &file.content_type {
                part = part.mime_str(content_type).map_err(|e| {
                    GeonodeError::InvalidInput(format!(
                        "invalid content type for '{}': {e}",
                        file.file_name
                    ))
                })?;
            }
            form = form.part(file.name, part);
        }

        let mut request = self
            .http
            .post(url)
            .header(AUTHORIZATION, &self.auth_header)
            .multipart(form);
        if let Some(length) = content_length {
            request = request.header(CONTENT_LENGTH, length);
        }
        let response = request.send().await.map_err(|e| self.connection_error(e))?;
        self.decode(path, response).await
    }

    /// PATCH a JSON body.
    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.endpoint_url(path)?;
        debug!(%url, "PATCH");
        trace!(body = %body, "PATCH body");
        let response = self
            .http
            .patch(url)
            .header(AUTHORIZATION, &self.auth_header)
            .json(body)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        self.decode(path, response).await
    }

    /// DELETE an endpoint. 204 responses decode to an empty object.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        let url = self.endpoint_url(path)?;
        debug!(%url, "DELETE");
        let response = self
            .http
            .delete(url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        self.decode(path, response).await
    }

    /// DELETE with a JSON body; some endpoints identify their targets in
    /// the body (e.g. linked-resource relations).
    pub async fn delete_with_body(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.endpoint_url(path)?;
        debug!(%url, "DELETE (with body)");
        trace!(body = %body, "DELETE body");
        let response = self
            .http
            .delete(url)
            .header(AUTHORIZATION, &self.auth_header)
            .json(body)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        self.decode(path, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeonodeClient {
        GeonodeClient::builder()
            .base_url("https://geonode.example.com/api/v2/")
            .auth_basic("YWRtaW46YWRtaW4=")
            .build()
            .unwrap()
    }

    #[test]
    fn builder_rejects_url_without_v2_suffix() {
        let result = GeonodeClient::builder()
            .base_url("https://geonode.example.com/")
            .auth_basic("dG9rZW4=")
            .build();
        assert!(matches!(result, Err(GeonodeError::InvalidInput(_))));
    }

    #[test]
    fn builder_requires_auth_token() {
        let result = GeonodeClient::builder()
            .base_url("https://geonode.example.com/api/v2/")
            .build();
        assert!(matches!(result, Err(GeonodeError::InvalidInput(_))));
    }

    #[test]
    fn credentials_encode_to_basic_token() {
        let client = GeonodeClient::builder()
            .base_url("https://geonode.example.com/api/v2/")
            .credentials("admin", "admin")
            .build()
            .unwrap();
        // echo -n admin:admin | base64
        assert_eq!(client.auth_header, "Basic YWRtaW46YWRtaW4=");
    }

    #[test]
    fn site_url_strips_api_suffix() {
        assert_eq!(client().site_url(), "https://geonode.example.com");
    }

    #[test]
    fn endpoint_url_joins_relative_paths() {
        let url = client().endpoint_url("datasets/7").unwrap();
        assert_eq!(url.as_str(), "https://geonode.example.com/api/v2/datasets/7");
        // a leading slash must not escape the api/v2 prefix
        let url = client().endpoint_url("/datasets/7").unwrap();
        assert_eq!(url.as_str(), "https://geonode.example.com/api/v2/datasets/7");
    }
}
