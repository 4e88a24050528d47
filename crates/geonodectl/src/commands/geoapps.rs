//! GeoApp command handler.

use geonode_client::geoapps::GEOAPPS;
use geonode_client::{GeonodeClient, ResourceHandler};

use super::CommandContext;
use crate::cli::GeoappCommands;
use crate::error::Result;

pub async fn handle(
    client: &GeonodeClient,
    command: &GeoappCommands,
    ctx: &CommandContext,
) -> Result<()> {
    let handler = ResourceHandler::new(client, &GEOAPPS);
    match command {
        GeoappCommands::List(filter) => super::list(&handler, filter, ctx).await,
        GeoappCommands::Describe { pk } => super::describe(&handler, *pk).await,
        GeoappCommands::Patch { pk, payload } => super::patch(&handler, *pk, payload).await,
        GeoappCommands::Delete { pk } => super::delete(&handler, pk).await,
    }
}
