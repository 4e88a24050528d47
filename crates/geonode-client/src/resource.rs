//! Generic resource descriptor and handler.
//!
//! Every GeoNode resource type (datasets, documents, maps, users, ...)
//! follows the same list/get/create/patch/delete shape; the differences
//! are data, not behavior. A [`ResourceSpec`] captures that data once
//! (endpoint segment, envelope keys, table columns, delete route) and one
//! generic [`ResourceHandler`] executes the operations against it.

use serde_json::Value;
use tracing::warn;

use crate::client::GeonodeClient;
use crate::error::{GeonodeError, Result};
use crate::params::ListParams;

/// One column of the table a resource renders as: a display label and an
/// extraction path into the item. The path is either a single field name
/// or a dotted path into a nested object (`owner.username`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub label: &'static str,
    pub path: &'static str,
}

impl Column {
    #[must_use]
    pub const fn new(label: &'static str, path: &'static str) -> Self {
        Self { label, path }
    }
}

/// Which DELETE route a resource uses.
///
/// Resource-derived types (datasets, documents, maps, geoapps and plain
/// resources) are deleted through the resource service at
/// `resources/{pk}/delete`; standalone types like users delete directly
/// under their own endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRoute {
    Endpoint,
    ResourceService,
}

/// Immutable description of one resource type. Declared once per resource
/// as a `const` and passed to [`ResourceHandler`]; there is no handler
/// inheritance.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    /// Endpoint path segment under the API root, e.g. `datasets`.
    pub endpoint: &'static str,
    /// Envelope key wrapping the collection in list responses.
    pub plural_key: &'static str,
    /// Envelope key wrapping the item in single-object responses.
    pub singular_key: &'static str,
    /// Columns for table output of list results.
    pub columns: &'static [Column],
    pub delete_route: DeleteRoute,
}

impl ResourceSpec {
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!("{}/", self.endpoint)
    }

    #[must_use]
    pub fn item_path(&self, pk: u64) -> String {
        format!("{}/{}", self.endpoint, pk)
    }

    #[must_use]
    pub fn patch_path(&self, pk: u64) -> String {
        format!("{}/{}/", self.endpoint, pk)
    }

    #[must_use]
    pub fn delete_path(&self, pk: u64) -> String {
        match self.delete_route {
            DeleteRoute::Endpoint => format!("{}/{}", self.endpoint, pk),
            DeleteRoute::ResourceService => format!("resources/{pk}/delete"),
        }
    }
}

/// Unwraps `key` from a response object, failing loudly when it is absent.
pub fn unwrap_key(mut response: Value, key: &str, context: &str) -> Result<Value> {
    match response.get_mut(key) {
        Some(value) => Ok(value.take()),
        None => Err(GeonodeError::Protocol {
            key: key.to_string(),
            context: context.to_string(),
        }),
    }
}

/// Parses a pk spec: a single id (`"7"`), a comma-separated list
/// (`"1,2,3"`) or a dash range (`"5-10"`, inclusive on both ends).
pub fn parse_pk_spec(spec: &str) -> Result<Vec<u64>> {
    let spec = spec.trim();
    if let Some((begin, end)) = spec.split_once('-') {
        let begin: u64 = begin.trim().parse().map_err(|_| bad_pk(spec))?;
        let end: u64 = end.trim().parse().map_err(|_| bad_pk(spec))?;
        if begin > end {
            return Err(GeonodeError::InvalidInput(format!(
                "invalid pk range '{spec}': start is greater than end"
            )));
        }
        return Ok((begin..=end).collect());
    }
    if spec.contains(',') {
        return spec
            .split(',')
            .map(|pk| pk.trim().parse().map_err(|_| bad_pk(spec)))
            .collect();
    }
    Ok(vec![spec.parse().map_err(|_| bad_pk(spec))?])
}

fn bad_pk(spec: &str) -> GeonodeError {
    GeonodeError::InvalidInput(format!(
        "invalid pk '{spec}': expected an integer, a comma-separated list or a range like 5-10"
    ))
}

/// Outcome of one id within a batch delete.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub pk: u64,
    pub result: Result<()>,
}

/// Generic operations over one resource type.
pub struct ResourceHandler<'a> {
    client: &'a GeonodeClient,
    spec: &'a ResourceSpec,
}

impl<'a> ResourceHandler<'a> {
    #[must_use]
    pub fn new(client: &'a GeonodeClient, spec: &'a ResourceSpec) -> Self {
        Self { client, spec }
    }

    #[must_use]
    pub fn spec(&self) -> &ResourceSpec {
        self.spec
    }

    /// One page of the collection, unwrapped from the plural envelope key.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Value>> {
        let response = self.client.get(&self.spec.collection_path(), params).await?;
        let items = unwrap_key(response, self.spec.plural_key, self.spec.endpoint)?;
        match items {
            Value::Array(items) => Ok(items),
            _ => Err(GeonodeError::Protocol {
                key: self.spec.plural_key.to_string(),
                context: format!("{} (expected an array)", self.spec.endpoint),
            }),
        }
    }

    /// A single item, unwrapped from the singular envelope key.
    pub async fn get(&self, pk: u64) -> Result<Value> {
        let response = self
            .client
            .get(&self.spec.item_path(pk), &ListParams::new())
            .await?;
        unwrap_key(response, self.spec.singular_key, self.spec.endpoint)
    }

    /// POST the given body and unwrap the created item.
    pub async fn create(&self, body: &Value) -> Result<Value> {
        let response = self.client.post(self.spec.endpoint, body).await?;
        unwrap_key(response, self.spec.singular_key, self.spec.endpoint)
    }

    /// PATCH only the supplied fields. The server echoes the updated
    /// object; it is returned verbatim.
    pub async fn patch(&self, pk: u64, fields: &Value) -> Result<Value> {
        self.client.patch(&self.spec.patch_path(pk), fields).await
    }

    /// Delete a single id.
    pub async fn delete(&self, pk: u64) -> Result<()> {
        self.client.delete(&self.spec.delete_path(pk)).await?;
        Ok(())
    }

    /// Delete every id a pk spec resolves to, independently. A NotFound
    /// (or any other failure) on one id does not abort the rest; each
    /// outcome is reported to the caller.
    pub async fn delete_spec(&self, spec: &str) -> Result<Vec<DeleteOutcome>> {
        let pks = parse_pk_spec(spec)?;
        let mut outcomes = Vec::with_capacity(pks.len());
        for pk in pks {
            let result = self.delete(pk).await;
            if let Err(err) = &result {
                warn!(pk, %err, "delete failed, continuing with remaining ids");
            }
            outcomes.push(DeleteOutcome { pk, result });
        }
        Ok(outcomes)
    }
}
