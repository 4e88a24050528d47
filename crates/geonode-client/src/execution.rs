//! Execution requests: the async import/processing jobs the server
//! creates in response to uploads. Keyed by a string `exec_id`, not an
//! integer pk.

use serde_json::Value;

use crate::client::GeonodeClient;
use crate::error::Result;
use crate::params::ListParams;
use crate::resource::{Column, DeleteRoute, ResourceHandler, ResourceSpec, unwrap_key};

pub const EXECUTION_REQUESTS: ResourceSpec = ResourceSpec {
    endpoint: "executionrequest",
    plural_key: "requests",
    singular_key: "request",
    columns: &[
        Column::new("exec_id", "exec_id"),
        Column::new("name", "name"),
        Column::new("status", "status"),
        Column::new("user", "user"),
        Column::new("source", "source"),
        Column::new("created", "created"),
        Column::new("log", "log"),
    ],
    delete_route: DeleteRoute::Endpoint,
};

/// One page of execution requests.
pub async fn list(client: &GeonodeClient, params: &ListParams) -> Result<Vec<Value>> {
    ResourceHandler::new(client, &EXECUTION_REQUESTS).list(params).await
}

/// A single execution request by its id.
pub async fn get(client: &GeonodeClient, exec_id: &str) -> Result<Value> {
    let path = format!("{}/{exec_id}", EXECUTION_REQUESTS.endpoint);
    let response = client.get(&path, &ListParams::new()).await?;
    unwrap_key(
        response,
        EXECUTION_REQUESTS.singular_key,
        EXECUTION_REQUESTS.endpoint,
    )
}
