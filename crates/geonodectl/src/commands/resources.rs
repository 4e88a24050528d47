//! Generic resource command handler.

use geonode_client::resources::{self, RESOURCES};
use geonode_client::{GeonodeClient, ResourceHandler};

use super::CommandContext;
use crate::cli::ResourceCommands;
use crate::error::Result;

pub async fn handle(
    client: &GeonodeClient,
    command: &ResourceCommands,
    ctx: &CommandContext,
) -> Result<()> {
    let handler = ResourceHandler::new(client, &RESOURCES);
    match command {
        ResourceCommands::List(filter) => super::list(&handler, filter, ctx).await,
        ResourceCommands::Describe { pk } => super::describe(&handler, *pk).await,
        ResourceCommands::Delete { pk } => super::delete(&handler, pk).await,
        ResourceCommands::Metadata { pk, metadata_type } => {
            let metadata = resources::metadata(client, *pk, metadata_type).await?;
            println!("{metadata}");
            Ok(())
        }
    }
}
