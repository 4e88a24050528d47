//! Map command handler.

use geonode_client::maps::{self, MAPS};
use geonode_client::payload::load_optional_json_payload;
use geonode_client::{GeonodeClient, ResourceHandler};

use super::CommandContext;
use crate::cli::MapCommands;
use crate::error::Result;
use crate::output;

pub async fn handle(
    client: &GeonodeClient,
    command: &MapCommands,
    ctx: &CommandContext,
) -> Result<()> {
    let handler = ResourceHandler::new(client, &MAPS);
    match command {
        MapCommands::List(filter) => super::list(&handler, filter, ctx).await,
        MapCommands::Describe { pk } => super::describe(&handler, *pk).await,
        MapCommands::Patch { pk, payload } => super::patch(&handler, *pk, payload).await,
        MapCommands::Delete { pk } => super::delete(&handler, pk).await,
        MapCommands::Create {
            title,
            payload,
            maplayers,
        } => {
            let overrides =
                load_optional_json_payload(payload.fields.as_deref(), payload.json_path.as_deref())?;
            let map = maps::create(client, title.as_deref(), overrides, maplayers).await?;
            output::print_json(&map)
        }
    }
}
