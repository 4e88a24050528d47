//! Upload session command handler.

use geonode_client::uploads::UPLOADS;
use geonode_client::{GeonodeClient, ResourceHandler};

use super::CommandContext;
use crate::cli::UploadCommands;
use crate::error::Result;

pub async fn handle(
    client: &GeonodeClient,
    command: &UploadCommands,
    ctx: &CommandContext,
) -> Result<()> {
    let handler = ResourceHandler::new(client, &UPLOADS);
    match command {
        UploadCommands::List(filter) => super::list(&handler, filter, ctx).await,
    }
}
