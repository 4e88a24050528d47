//! Dataset attribute-set command handler.

use geonode_client::attributes;
use geonode_client::{Column, GeonodeClient};
use serde_json::Value;

use super::CommandContext;
use crate::cli::AttributeCommands;
use crate::error::Result;
use crate::output;

const ATTRIBUTE_COLUMNS: &[Column] = &[
    Column::new("pk", "pk"),
    Column::new("attribute", "attribute"),
    Column::new("attribute_label", "attribute_label"),
    Column::new("description", "description"),
    Column::new("attribute_type", "attribute_type"),
];

pub async fn handle(
    client: &GeonodeClient,
    command: &AttributeCommands,
    ctx: &CommandContext,
) -> Result<()> {
    match command {
        AttributeCommands::Describe { pk } => {
            let attribute_set = attributes::get(client, *pk).await?;
            if ctx.raw {
                return output::print_json(&attribute_set);
            }
            let attributes = attribute_set
                .get("attributes")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            output::print_list(&attributes, ATTRIBUTE_COLUMNS);
            Ok(())
        }
        AttributeCommands::Patch { pk, payload } => {
            let updated = attributes::patch(
                client,
                *pk,
                payload.fields.as_deref(),
                payload.json_path.as_deref(),
            )
            .await?;
            output::print_json(&updated)
        }
    }
}
