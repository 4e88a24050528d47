//! Linked-resource command handler.

use geonode_client::resources::{RESOURCES, link_resources, linked_resources, unlink_resources};
use geonode_client::{GeonodeClient, ListParams};
use serde_json::Value;

use super::CommandContext;
use crate::cli::LinkedResourceCommands;
use crate::error::Result;
use crate::output;

pub async fn handle(
    client: &GeonodeClient,
    command: &LinkedResourceCommands,
    ctx: &CommandContext,
) -> Result<()> {
    match command {
        LinkedResourceCommands::List { pk } => {
            let linked = linked_resources(client, *pk, &ListParams::new()).await?;
            if ctx.raw {
                return output::print_json(&linked);
            }
            for relation in ["linked_to", "linked_by"] {
                println!("{relation}:");
                let items = linked
                    .get(relation)
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                output::print_list(&items, RESOURCES.columns);
            }
            Ok(())
        }
        LinkedResourceCommands::Add { pk, targets } => {
            let response = link_resources(client, *pk, targets).await?;
            output::print_json(&response)
        }
        LinkedResourceCommands::Delete { pk, targets } => {
            let response = unlink_resources(client, *pk, targets).await?;
            output::print_json(&response)
        }
    }
}
