//! Dataset attribute sets.
//!
//! Attributes live on a sub-endpoint of datasets for reading, while
//! attribute updates ride a regular dataset PATCH.

use std::path::Path;

use serde_json::Value;

use crate::client::GeonodeClient;
use crate::error::Result;
use crate::params::ListParams;
use crate::payload::load_json_payload;

/// The attribute set of a dataset, verbatim (an object with an
/// `attributes` array).
pub async fn get(client: &GeonodeClient, pk: u64) -> Result<Value> {
    client
        .get(&format!("datasets/{pk}/attribute_set"), &ListParams::new())
        .await
}

/// Patches a dataset with attribute changes supplied as free-form JSON.
pub async fn patch(
    client: &GeonodeClient,
    pk: u64,
    fields: Option<&str>,
    json_path: Option<&Path>,
) -> Result<Value> {
    let payload = load_json_payload(fields, json_path)?;
    client.patch(&format!("datasets/{pk}/"), &payload).await
}
