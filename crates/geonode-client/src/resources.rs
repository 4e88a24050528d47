//! The generic resource endpoint: listing across all resource types,
//! metadata document download and the linked-resources relation graph.

use serde_json::Value;

use crate::client::GeonodeClient;
use crate::error::{GeonodeError, Result};
use crate::params::ListParams;
use crate::resource::{Column, DeleteRoute, ResourceHandler, ResourceSpec};

pub const RESOURCES: ResourceSpec = ResourceSpec {
    endpoint: "resources",
    plural_key: "resources",
    singular_key: "resource",
    columns: &[
        Column::new("pk", "pk"),
        Column::new("title", "title"),
        Column::new("owner", "owner.username"),
        Column::new("resource_type", "resource_type"),
        Column::new("state", "state"),
        Column::new("detail_url", "detail_url"),
    ],
    delete_route: DeleteRoute::ResourceService,
};

/// Metadata document formats GeoNode serves per resource.
pub const SUPPORTED_METADATA_TYPES: &[&str] = &["Atom", "DIF", "Dublin Core", "FGDC", "ISO"];
pub const DEFAULT_METADATA_TYPE: &str = "ISO";

/// Downloads the metadata document of a resource in the given format.
///
/// The resource's `links` array carries one entry per metadata format;
/// the matching entry's URL is fetched and returned as text.
pub async fn metadata(client: &GeonodeClient, pk: u64, metadata_type: &str) -> Result<String> {
    let resource = ResourceHandler::new(client, &RESOURCES).get(pk).await?;
    let links = resource
        .get("links")
        .and_then(Value::as_array)
        .ok_or_else(|| GeonodeError::Protocol {
            key: "links".to_string(),
            context: format!("resources/{pk}"),
        })?;

    let url = links
        .iter()
        .find(|link| link.get("name").and_then(Value::as_str) == Some(metadata_type))
        .and_then(|link| link.get("url").and_then(Value::as_str))
        .ok_or_else(|| {
            GeonodeError::InvalidInput(format!(
                "resource {pk} has no '{metadata_type}' metadata link \
                 (supported: {})",
                SUPPORTED_METADATA_TYPES.join(", ")
            ))
        })?;

    Ok(client.download(url).await?.text().await?)
}

/// The linked-resources relation of a resource: the full response object
/// with its `linked_to` and `linked_by` arrays.
pub async fn linked_resources(
    client: &GeonodeClient,
    pk: u64,
    params: &ListParams,
) -> Result<Value> {
    let response = client
        .get(&format!("resources/{pk}/linked_resources"), params)
        .await?;
    if response.get("linked_to").is_none() {
        return Err(GeonodeError::Protocol {
            key: "linked_to".to_string(),
            context: format!("resources/{pk}/linked_resources"),
        });
    }
    Ok(response)
}

fn target_body(targets: &[u64]) -> Result<serde_json::Value> {
    if targets.is_empty() {
        return Err(GeonodeError::InvalidInput(
            "at least one target pk is required".to_string(),
        ));
    }
    Ok(serde_json::json!({ "target": targets }))
}

/// Links `targets` to the resource (`linked_to` direction).
pub async fn link_resources(client: &GeonodeClient, pk: u64, targets: &[u64]) -> Result<Value> {
    let body = target_body(targets)?;
    client
        .post(&format!("resources/{pk}/linked_resources"), &body)
        .await
}

/// Removes the link between the resource and `targets`. The targets ride
/// in the DELETE body.
pub async fn unlink_resources(client: &GeonodeClient, pk: u64, targets: &[u64]) -> Result<Value> {
    let body = target_body(targets)?;
    client
        .delete_with_body(&format!("resources/{pk}/linked_resources"), &body)
        .await
}
