//! Command handlers: thin shims mapping CLI verbs onto client calls and
//! rendering the result.
//!
//! The generic verbs (list, describe, patch, delete) are the same for
//! every resource and live here as free functions over a handler; the
//! per-resource modules add only what does not fit that shape.

pub mod attributes;
pub mod datasets;
pub mod documents;
pub mod execution;
pub mod geoapps;
pub mod keywords;
pub mod linked;
pub mod maps;
pub mod resources;
pub mod uploads;
pub mod users;

use geonode_client::payload::load_json_payload;
use geonode_client::{ListParams, ResourceHandler};
use serde_json::Value;

use crate::cli::{FilterArgs, PayloadArgs};
use crate::error::{GeonodectlError, Result};
use crate::output;

/// Per-invocation output and pagination settings from the global flags.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext {
    pub raw: bool,
    pub page: u32,
    pub page_size: u32,
}

impl CommandContext {
    /// List parameters from the global pagination flags plus the verb's
    /// filter arguments.
    pub fn list_params(&self, filter: &FilterArgs) -> ListParams {
        let mut params = ListParams::new().page(self.page).page_size(self.page_size);
        for (field, value) in &filter.filter {
            params = params.filter(field, value);
        }
        if let Some(search) = &filter.search {
            params = params.search(search);
        }
        if let Some(ordering) = &filter.ordering {
            params = params.ordering(ordering);
        }
        params
    }
}

/// `list`: one page, rendered as a table or raw JSON.
pub async fn list(
    handler: &ResourceHandler<'_>,
    filter: &FilterArgs,
    ctx: &CommandContext,
) -> Result<()> {
    let items = handler.list(&ctx.list_params(filter)).await?;
    if ctx.raw {
        output::print_json(&Value::Array(items))?;
    } else {
        output::print_list(&items, handler.spec().columns);
    }
    Ok(())
}

/// `describe`: full detail is always JSON; a table would truncate it.
pub async fn describe(handler: &ResourceHandler<'_>, pk: u64) -> Result<()> {
    let item = handler.get(pk).await?;
    output::print_json(&item)
}

/// `patch`: applies the free-form payload and prints the server echo.
pub async fn patch(handler: &ResourceHandler<'_>, pk: u64, payload: &PayloadArgs) -> Result<()> {
    let fields = load_json_payload(payload.fields.as_deref(), payload.json_path.as_deref())?;
    let updated = handler.patch(pk, &fields).await?;
    output::print_json(&updated)
}

/// `delete`: resolves the pk spec and reports every outcome. A failed id
/// does not stop the rest; the command only fails when nothing succeeded.
pub async fn delete(handler: &ResourceHandler<'_>, spec: &str) -> Result<()> {
    let outcomes = handler.delete_spec(spec).await?;
    let endpoint = handler.spec().endpoint;
    let mut failures = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => println!("{endpoint}: {} deleted ...", outcome.pk),
            Err(err) => {
                failures += 1;
                eprintln!("{endpoint}: {} failed: {err}", outcome.pk);
            }
        }
    }
    if failures == outcomes.len() {
        return Err(GeonodectlError::InvalidInput {
            message: format!("no {endpoint} deleted for pk spec '{spec}'"),
        });
    }
    Ok(())
}
