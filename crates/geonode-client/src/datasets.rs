//! Datasets: listing, metadata and multipart upload of geospatial files.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::client::{FilePart, GeonodeClient};
use crate::error::{GeonodeError, Result};
use crate::execution;
use crate::resource::{Column, DeleteRoute, ResourceSpec};

pub const DATASETS: ResourceSpec = ResourceSpec {
    endpoint: "datasets",
    plural_key: "datasets",
    singular_key: "dataset",
    columns: &[
        Column::new("pk", "pk"),
        Column::new("title", "title"),
        Column::new("owner", "owner.username"),
        Column::new("date", "date"),
        Column::new("is_approved", "is_approved"),
        Column::new("is_published", "is_published"),
        Column::new("state", "state"),
        Column::new("detail_url", "detail_url"),
    ],
    delete_route: DeleteRoute::ResourceService,
};

/// Default permission set granted on upload: anonymous read, nothing else.
const UPLOAD_PERMISSIONS: &str =
    r#"{ "users": {"AnonymousUser": ["view_resourcebase"]} , "groups":{}}"#;

/// Options for a dataset upload.
#[derive(Debug, Clone)]
pub struct DatasetUpload {
    pub file_path: PathBuf,
    pub charset: String,
    /// Upload the dataset as a timeseries.
    pub time: bool,
    /// Declare the dataset a mosaic.
    pub mosaic: bool,
    pub overwrite_existing_layer: bool,
    pub skip_existing_layers: bool,
}

impl DatasetUpload {
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            charset: "UTF-8".to_string(),
            time: false,
            mosaic: false,
            overwrite_existing_layer: false,
            skip_existing_layers: false,
        }
    }
}

fn read_part(name: &'static str, path: &Path, content_type: Option<&str>) -> Result<FilePart> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            GeonodeError::InvalidInput(format!("'{}' has no file name", path.display()))
        })?;
    Ok(FilePart {
        name,
        file_name,
        bytes,
        content_type: content_type.map(String::from),
    })
}

/// Collects the file parts for an upload.
///
/// A `.shp` base file must be accompanied by its `.dbf`, `.shx` and `.prj`
/// sidecars next to it; their absence fails here, before any HTTP request
/// is made. A `.zip` archive is sent both as `base_file` and `zip_file`.
fn collect_parts(file_path: &Path) -> Result<Vec<FilePart>> {
    if !file_path.exists() {
        return Err(GeonodeError::InvalidInput(format!(
            "file not found: {}",
            file_path.display()
        )));
    }

    if file_path.extension().and_then(|e| e.to_str()) == Some("shp") {
        let mut parts = Vec::with_capacity(4);
        parts.push(read_part("base_file", file_path, Some("application/octet-stream"))?);
        for (name, ext) in [("dbf_file", "dbf"), ("shx_file", "shx"), ("prj_file", "prj")] {
            let sidecar = file_path.with_extension(ext);
            if !sidecar.exists() {
                return Err(GeonodeError::InvalidInput(format!(
                    "shapefile sidecar not found: {} (a .shp upload needs its .dbf, .shx and .prj next to it)",
                    sidecar.display()
                )));
            }
            parts.push(read_part(name, &sidecar, Some("application/octet-stream"))?);
        }
        return Ok(parts);
    }

    let mut parts = vec![read_part("base_file", file_path, None)?];
    if file_path.extension().and_then(|e| e.to_str()) == Some("zip") {
        parts.push(read_part("zip_file", file_path, None)?);
    }
    Ok(parts)
}

/// Uploads a dataset and returns the raw `uploads/upload` response, which
/// carries the `execution_id` of the server-side import job.
pub async fn upload(client: &GeonodeClient, opts: &DatasetUpload) -> Result<Value> {
    let parts = collect_parts(&opts.file_path)?;
    let content_length: u64 = parts.iter().map(|p| p.bytes.len() as u64).sum();
    debug!(
        file = %opts.file_path.display(),
        parts = parts.len(),
        content_length,
        "uploading dataset"
    );

    let fields = [
        ("permissions", UPLOAD_PERMISSIONS.to_string()),
        ("mosaic", opts.mosaic.to_string()),
        ("time", opts.time.to_string()),
        ("charset", opts.charset.clone()),
        ("non_interactive", "true".to_string()),
        (
            "overwrite_existing_layer",
            opts.overwrite_existing_layer.to_string(),
        ),
        (
            "skip_existing_layers",
            opts.skip_existing_layers.to_string(),
        ),
    ];

    client
        .post_multipart("uploads/upload", &fields, parts, Some(content_length))
        .await
}

/// Uploads a dataset, then fetches the execution request the server
/// created for it and returns its status. The status is fetched exactly
/// once; there is no polling to completion.
pub async fn upload_and_fetch_status(
    client: &GeonodeClient,
    opts: &DatasetUpload,
) -> Result<Value> {
    let response = upload(client, opts).await?;
    let exec_id = match response.get("execution_id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => {
            return Err(GeonodeError::Protocol {
                key: "execution_id".to_string(),
                context: "uploads/upload".to_string(),
            });
        }
    };
    execution::get(client, &exec_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_fails_before_any_http() {
        let err = collect_parts(Path::new("/nonexistent/road.shp")).unwrap_err();
        assert!(matches!(err, GeonodeError::InvalidInput(_)));
    }

    #[test]
    fn shp_without_sidecars_fails_before_any_http() {
        let dir = tempfile::tempdir().unwrap();
        let shp = dir.path().join("roads.shp");
        std::fs::write(&shp, b"shp bytes").unwrap();

        let err = collect_parts(&shp).unwrap_err();
        assert!(matches!(err, GeonodeError::InvalidInput(_)));
        assert!(err.to_string().contains(".dbf"));
    }

    #[test]
    fn shp_with_sidecars_yields_four_parts() {
        let dir = tempfile::tempdir().unwrap();
        for ext in ["shp", "dbf", "shx", "prj"] {
            std::fs::write(dir.path().join(format!("roads.{ext}")), b"bytes").unwrap();
        }

        let parts = collect_parts(&dir.path().join("roads.shp")).unwrap();
        let names: Vec<_> = parts.iter().map(|p| p.name).collect();
        assert_eq!(names, ["base_file", "dbf_file", "shx_file", "prj_file"]);
        assert!(
            parts
                .iter()
                .all(|p| p.content_type.as_deref() == Some("application/octet-stream"))
        );
    }

    #[test]
    fn zip_is_sent_twice() {
        let dir = tempfile::tempdir().unwrap();
        let zip = dir.path().join("layers.zip");
        std::fs::write(&zip, b"zip bytes").unwrap();

        let parts = collect_parts(&zip).unwrap();
        let names: Vec<_> = parts.iter().map(|p| p.name).collect();
        assert_eq!(names, ["base_file", "zip_file"]);
    }

    #[test]
    fn plain_file_is_a_single_part() {
        let dir = tempfile::tempdir().unwrap();
        let tif = dir.path().join("ortho.tif");
        std::fs::write(&tif, b"tif bytes").unwrap();

        let parts = collect_parts(&tif).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].file_name, "ortho.tif");
    }
}
