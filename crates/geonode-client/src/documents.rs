//! Documents: listing and single-file upload.

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::client::{FilePart, GeonodeClient};
use crate::error::{GeonodeError, Result};
use crate::resource::{Column, DeleteRoute, ResourceSpec, unwrap_key};

pub const DOCUMENTS: ResourceSpec = ResourceSpec {
    endpoint: "documents",
    plural_key: "documents",
    singular_key: "document",
    columns: &[
        Column::new("pk", "pk"),
        Column::new("title", "title"),
        Column::new("owner", "owner.username"),
        Column::new("date", "date"),
        Column::new("is_approved", "is_approved"),
        Column::new("is_published", "is_published"),
        Column::new("resource_type", "resource_type"),
        Column::new("detail_url", "detail_url"),
    ],
    delete_route: DeleteRoute::ResourceService,
};

const UPLOAD_PERMISSIONS: &str =
    r#"{ "users": {"AnonymousUser": ["view_resourcebase"]} , "groups":{}}"#;

/// Options for a document upload.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_path: PathBuf,
    pub charset: String,
    /// Register the document without a landing page; the file stays
    /// downloadable through its link.
    pub metadata_only: bool,
}

impl DocumentUpload {
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            charset: "UTF-8".to_string(),
            metadata_only: false,
        }
    }
}

/// Uploads a document as a single `doc_file` part with a guessed content
/// type, and returns the created document unwrapped from its envelope.
pub async fn upload(client: &GeonodeClient, opts: &DocumentUpload) -> Result<Value> {
    if !opts.file_path.exists() {
        return Err(GeonodeError::InvalidInput(format!(
            "file not found: {}",
            opts.file_path.display()
        )));
    }

    let bytes = std::fs::read(&opts.file_path)?;
    let content_length = bytes.len() as u64;
    let file_name = opts
        .file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            GeonodeError::InvalidInput(format!("'{}' has no file name", opts.file_path.display()))
        })?;
    let content_type = mime_guess::from_path(&opts.file_path)
        .first_raw()
        .map(String::from);
    debug!(file = %file_name, ?content_type, content_length, "uploading document");

    let fields = [
        ("permissions", UPLOAD_PERMISSIONS.to_string()),
        ("charset", opts.charset.clone()),
        ("metadata_only", opts.metadata_only.to_string()),
    ];
    let part = FilePart {
        name: "doc_file",
        file_name,
        bytes,
        content_type,
    };

    let response = client
        .post_multipart("documents", &fields, vec![part], Some(content_length))
        .await?;
    unwrap_key(response, DOCUMENTS.singular_key, DOCUMENTS.endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_fails_before_any_http() {
        let client = GeonodeClient::builder()
            .base_url("https://geonode.example.com/api/v2/")
            .auth_basic("dG9rZW4=")
            .build()
            .unwrap();
        let err = upload(&client, &DocumentUpload::new("/nonexistent/report.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeonodeError::InvalidInput(_)));
    }
}
